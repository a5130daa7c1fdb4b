use eframe::egui;
use flashdeck::{
    gui::{
        settings::{
            data::SETTINGS_FILE,
            SettingsData,
        },
        FlashdeckApp,
    },
    persistence::load_json_or_default,
};
use tracing::{
    error,
    info,
};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flashdeck=info")),
        )
        .with_target(false)
        .init();

    let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE).with_env_overrides();
    info!("Starting flashdeck for document {}", settings.document_id());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flashdeck")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Flashdeck",
        native_options,
        Box::new(|cc| Ok(Box::new(FlashdeckApp::new(cc, settings)?))),
    );

    if let Err(e) = &result {
        error!("Application error: {}", e);
    }
    result
}
