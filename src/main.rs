// Aperture Time Application
// Main entry point

use aperture_time::services::settings::{
    load_settings_or_default, write_default_if_missing, SettingsService,
};
use aperture_time::ui_egui::ApertureApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Aperture Time");

    let settings_service = SettingsService::from_default_location();
    let settings = load_settings_or_default(&settings_service);
    write_default_if_missing(&settings_service, &settings);
    log::info!(
        "Loaded settings from {}: valve={}, dismiss_threshold={}",
        settings_service.path().display(),
        settings.valve_id,
        settings.dismiss_threshold
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 860.0])
            .with_min_inner_size([360.0, 720.0])
            .with_title("Aperture Time"),
        ..Default::default()
    };

    eframe::run_native(
        "Aperture Time",
        options,
        Box::new(
            move |cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
                let app = ApertureApp::new(cc, settings)?;
                Ok(Box::new(app))
            },
        ),
    )
}
