use anyhow::Result;
use clap::Parser;
use routeros_exporter::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Debug, Parser)]
#[command(name = "routeros-exporter", version)]
struct Cli {
    /// Path to the TOML config file (credentials, timeout ceiling, listen address)
    #[arg(short, long, value_name = "FILE", env = "CONFIG_FILE", default_value = "config.toml")]
    config: PathBuf,

    /// Listening port; overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let mut app_config = config::AppConfig::load_from_path(&cli.config)?;
    if let Some(port) = cli.port {
        anyhow::ensure!(port > 0, "--port must be between 1 and 65535");
        app_config.server.port = port;
    }
    tracing::info!(
        credentials = app_config.credentials.len(),
        timeout_ceiling_secs = app_config.probe.timeout_ceiling(),
        "Loaded config from {}",
        cli.config.display()
    );

    let exporter_metrics = Arc::new(
        self_metrics::ExporterMetrics::new()
            .map_err(|e| anyhow::anyhow!("exporter metrics: {}", e))?,
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let app = routes::app(Arc::new(app_config), exporter_metrics);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
