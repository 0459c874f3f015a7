// Calendar Picker demo
// Hosts the picker widget in a native window

use calendar_picker::services::settings::SettingsService;
use calendar_picker::ui_egui::PickerDemoApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Calendar Picker");

    let settings = SettingsService::from_env().load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 520.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Calendar Picker",
        options,
        Box::new(|cc| Ok(Box::new(PickerDemoApp::new(&cc.egui_ctx, settings)?))),
    )
}
