mod config;
mod errors;
mod label;
mod reporting;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::label::PdfLabelGenerator;
use crate::reporting::{ErrorReporter, LogReporter, WebhookReporter};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting shipping label API v{}", env!("CARGO_PKG_VERSION"));

    // Read and decode the logo once; a bad asset stops startup here
    let generator = Arc::new(PdfLabelGenerator::from_logo_path(&config.logo_path)?);

    let reporter: Arc<dyn ErrorReporter> = match &config.error_report_url {
        Some(url) => {
            info!("Reporting errors to webhook {url}");
            Arc::new(WebhookReporter::new(url.clone())?)
        }
        None => Arc::new(LogReporter),
    };

    let state = AppState {
        generator,
        reporter,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Plain HTTP; TLS is terminated in front of the service
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
