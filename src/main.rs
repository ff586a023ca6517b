use std::path::Path;

use tracing_subscriber::EnvFilter;

use gesturecast::config::Settings;
use gesturecast::session;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional settings file as the first argument.
    let mut settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("failed to load settings from {path}: {e}");
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };
    settings.apply_env();

    if let Err(e) = session::run(settings).await {
        tracing::error!("session failed: {e}");
        std::process::exit(1);
    }
}
