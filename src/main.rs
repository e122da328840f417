use audio_ingest::config::AppConfig;
use audio_ingest::logger;
use audio_ingest::server::{self, shutdown_signal};
use log::{error, info};

#[tokio::main]
async fn main() {
    // pick up RUST_LOG from .env before the logger reads it
    dotenv::dotenv().ok();
    logger::init_logger();
    info!("Application starting");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(&config, shutdown_signal()).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
