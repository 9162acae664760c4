use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use page_extract::PageFetcher;
use research_client::{ResearchProvider, SonarClient};
use sourcetrace_common::Config;
use sourcetrace_engine::Pipeline;

mod rest;

pub struct AppState {
    pub provider: Arc<dyn ResearchProvider>,
    pub fetcher: PageFetcher,
    pub pipeline: Pipeline,
    pub verify_budget: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sourcetrace=info".parse()?))
        .init();

    let config = Config::from_env();

    let mut client = SonarClient::new(&config.sonar_api_key, &config.sonar_model);
    if let Some(base_url) = &config.sonar_base_url {
        client = client.with_base_url(base_url);
    }

    let state = Arc::new(AppState {
        provider: Arc::new(client),
        fetcher: PageFetcher::new(),
        pipeline: Pipeline::new(),
        verify_budget: config.verify_budget,
    });

    let app = Router::new()
        .route("/api/analyze", post(rest::api_analyze))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(addr, "sourcetrace API listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
