//! Frame Solver HTTP Server

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use frame_solver::prelude::*;

/// Listen address, read from the environment
struct ServerConfig {
    host: IpAddr,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> anyhow::Result<Self> {
        let host = match std::env::var("FRAME_SERVER_HOST") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("invalid FRAME_SERVER_HOST '{}'", value))?,
            Err(_) => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match std::env::var("FRAME_SERVER_PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("invalid FRAME_SERVER_PORT '{}'", value))?,
            Err(_) => 8086,
        };
        Ok(Self { host, port })
    }

    fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    model: ModelTables,
    #[serde(default)]
    options: Option<AnalysisOptions>,
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<AnalysisResults>,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn analyze(Json(request): Json<AnalysisRequest>) -> impl IntoResponse {
    match run_analysis(request) {
        Ok(results) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            log::warn!("Analysis request failed: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(AnalysisResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

fn run_analysis(request: AnalysisRequest) -> FrameResult<AnalysisResults> {
    let model = FrameModel::from_tables(&request.model)?;
    model.analyze_with(request.options.unwrap_or_default())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env()?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .layer(cors);

    let addr = config.addr();
    println!("Frame Solver Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Analysis:     POST /api/v1/analyze");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
