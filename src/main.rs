use anyhow::Context;
use clap::Parser;
use investor_pdf_api::config::ServiceConfig;
use investor_pdf_api::utils::{logger, validation::Validate};
use investor_pdf_api::{create_router, AppState, CliConfig, CompanyRegistry, HttpSource};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting investor-pdf-api");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let source = HttpSource::new(config.request_timeout())
        .context("failed to build HTTP client")?;
    let state = AppState::new(Arc::new(source), CompanyRegistry::default());
    let app = create_router(state);

    let addr = format!("{}:{}", config.bind_host(), config.port());
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
