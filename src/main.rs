mod app;
mod config;
mod gallery;
mod upload;
mod utils;

use app::GoArtApp;

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goart_client=info".into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([540.0, 760.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "GO ART! Gallery",
        options,
        Box::new(|cc| Box::new(GoArtApp::new(cc))),
    ) {
        tracing::error!("failed to start the UI: {e}");
    }
}
