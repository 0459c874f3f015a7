//! Event density mapping.
//!
//! Turns a day's raw event count into the `[0, 1]` intensity that drives
//! tile shading. The ramp is linear up to the configured sensitivity, then
//! flat at full intensity.

use crate::error::ValidationError;

/// Event count that reaches full intensity unless configured otherwise.
pub const DEFAULT_SENSITIVITY: f32 = 8.0;

/// Intensity for `count` events given a `sensitivity` (> 0).
///
/// Negative counts are treated as zero. A non-positive or NaN sensitivity
/// collapses the ramp into a step: any positive count is full intensity.
///
/// # Examples
/// ```
/// use calendar_picker::services::density::intensity;
///
/// assert_eq!(intensity(4, 8.0), 0.5);
/// assert_eq!(intensity(20, 8.0), 1.0);
/// assert_eq!(intensity(-3, 8.0), 0.0);
/// ```
pub fn intensity(count: i64, sensitivity: f32) -> f32 {
    if count <= 0 {
        return 0.0;
    }
    if !(sensitivity > 0.0) {
        return 1.0;
    }
    (count as f32 / sensitivity).clamp(0.0, 1.0)
}

/// Configured density ramp shared by every layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityMapper {
    sensitivity: f32,
}

impl DensityMapper {
    pub fn new(sensitivity: f32) -> Result<Self, ValidationError> {
        if sensitivity.is_finite() && sensitivity > 0.0 {
            Ok(Self { sensitivity })
        } else {
            Err(ValidationError::InvalidSensitivity { value: sensitivity })
        }
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn intensity(&self, count: i64) -> f32 {
        intensity(count, self.sensitivity)
    }
}

impl Default for DensityMapper {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 8.0 => 0.0 ; "no events")]
    #[test_case(4, 8.0 => 0.5 ; "half way")]
    #[test_case(8, 8.0 => 1.0 ; "at sensitivity")]
    #[test_case(30, 8.0 => 1.0 ; "clamped above sensitivity")]
    #[test_case(-5, 8.0 => 0.0 ; "negative floored")]
    #[test_case(1, 2.0 => 0.5 ; "steeper ramp")]
    #[test_case(3, 0.0 => 1.0 ; "degenerate sensitivity is a step")]
    #[test_case(0, 0.0 => 0.0 ; "degenerate sensitivity with no events")]
    fn test_intensity(count: i64, sensitivity: f32) -> f32 {
        intensity(count, sensitivity)
    }

    #[test]
    fn test_mapper_rejects_invalid_sensitivity() {
        assert!(DensityMapper::new(0.0).is_err());
        assert!(DensityMapper::new(-2.0).is_err());
        assert!(DensityMapper::new(f32::NAN).is_err());
        assert!(DensityMapper::new(f32::INFINITY).is_err());
        assert_eq!(DensityMapper::new(3.0).unwrap().sensitivity(), 3.0);
    }

    #[test]
    fn test_default_mapper_peaks_at_eight() {
        let mapper = DensityMapper::default();
        assert_eq!(mapper.intensity(8), 1.0);
        assert_eq!(mapper.intensity(2), 0.25);
    }

    #[test]
    fn test_intensity_is_monotonic_for_small_counts() {
        let mapper = DensityMapper::new(5.0).unwrap();
        let values: Vec<f32> = (-2..20).map(|count| mapper.intensity(count)).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
