//! Calendar data provider boundary.
//!
//! The picker never talks to an event store directly. Hosts hand it a
//! [`CalendarDataProvider`] and the picker asks for already-resolved counts.
//! Authorization is answered on a channel that the host polls, so the
//! request never blocks a frame.

use std::sync::mpsc::{self, Receiver};

use anyhow::Result;

use crate::models::calendar_date::CalendarDate;
use crate::models::grid::EventCounts;
use crate::utils::date::DayTruncate;

pub mod sqlite;

pub use sqlite::SqliteEventStore;

#[cfg_attr(test, mockall::automock)]
pub trait CalendarDataProvider {
    /// Ask for access to the underlying store. The answer arrives later on
    /// the returned receiver.
    fn request_authorization(&self) -> Receiver<bool>;

    /// Number of events occurring on `date`.
    fn event_count(&self, date: CalendarDate) -> Result<u32>;

    /// Counts for a batch of dates. Dates with zero events may be omitted.
    fn event_counts(&self, dates: &[CalendarDate]) -> Result<EventCounts> {
        let mut counts = EventCounts::with_capacity(dates.len());
        for &date in dates {
            let count = self.event_count(date)?;
            if count > 0 {
                counts.insert(date, count);
            }
        }
        Ok(counts)
    }
}

/// Provider backed by a map held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    counts: EventCounts,
    authorized: bool,
}

impl InMemoryProvider {
    pub fn new(counts: EventCounts) -> Self {
        Self {
            counts,
            authorized: true,
        }
    }

    /// Tally one event per instant on the day it falls on.
    pub fn from_instants<'a, T, I>(instants: I) -> Self
    where
        T: DayTruncate + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut counts = EventCounts::new();
        for instant in instants {
            *counts.entry(instant.truncate_to_day()).or_insert(0) += 1;
        }
        Self::new(counts)
    }

    /// Answer authorization requests with `authorized`.
    pub fn with_authorization(mut self, authorized: bool) -> Self {
        self.authorized = authorized;
        self
    }

    pub fn set_count(&mut self, date: CalendarDate, count: u32) {
        if count == 0 {
            self.counts.remove(&date);
        } else {
            self.counts.insert(date, count);
        }
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new(EventCounts::new())
    }
}

impl CalendarDataProvider for InMemoryProvider {
    fn request_authorization(&self) -> Receiver<bool> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.authorized);
        rx
    }

    fn event_count(&self, date: CalendarDate) -> Result<u32> {
        Ok(self.counts.get(&date).copied().unwrap_or(0))
    }
}
