mod http;

use std::sync::Arc;

use show_page::config::Config;
use show_page::PageController;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup file logging + stderr
    let data_dir = show_page::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("daemon.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,show_daemon=debug,show_page=debug")
            }),
        )
        .init();

    info!("Log file: {:?}", log_path);

    let config = Config::load()?;
    info!("Config loaded from: {:?}", Config::config_path());

    let controller = Arc::new(PageController::from_config(&config)?);
    info!("Interviewee source: {}", controller.source().describe());

    if !config.site.root.exists() {
        warn!(
            "Site root {} does not exist; only the page and status API will be served",
            config.site.root.display()
        );
    }

    let app = http::router(controller, &config.site.title, &config.site.root);
    let server = http::start_server(config.http.bind_address.clone(), config.http.port, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                warn!("HTTP server task ended abnormally: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
