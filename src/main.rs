use eframe::egui;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vocab_trainer::{
    Settings,
    VocabApp,
};

fn main() -> eframe::Result {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Vocabulary Trainer")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Vocabulary Trainer",
        options,
        Box::new(|cc| Ok(Box::new(VocabApp::new(cc, settings)?))),
    )
}
