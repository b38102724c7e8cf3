//! Reverse geocoding HTTP server.
//!
//! Loads the configured boundary datasets once at startup and answers
//! point lookups scoped to a region key.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use regeo::config::Config;
use regeo::{GeoDataProvider, GeocodeError, Geocoder, NameField};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "regeo-server")]
#[command(about = "Offline reverse geocoding server")]
struct Args {
    /// Config file with the region key -> boundary file mapping
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Regeo Server");
    info!("Config: {}", args.config.display());

    let config = Config::load_from_file(&args.config)?;
    let geocoder = Geocoder::build(config.provider_entries())
        .context("Failed to load boundary datasets")?;

    let state = Arc::new(geocoder);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/r_geo_code", get(reverse_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listen = args.listen.unwrap_or(config.listen);
    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct ReverseQueryParams {
    key: String,
    longitude: f64,
    latitude: f64,
    /// Name variant: "local" (default), "name" or "en"
    lang: Option<String>,
}

#[derive(Serialize, Default)]
struct ReverseResponse {
    code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    hit: bool,
    result: String,
}

impl ReverseResponse {
    fn error(code: i32, message: String) -> Self {
        Self {
            code,
            message: Some(message),
            ..Default::default()
        }
    }
}

/// Reverse geocoding. Always answers 200; failures are reported via `code`.
async fn reverse_handler(
    State(geocoder): State<Arc<Geocoder>>,
    params: Result<Query<ReverseQueryParams>, QueryRejection>,
) -> Json<ReverseResponse> {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return Json(ReverseResponse::error(-1, rejection.body_text())),
    };

    let field = match params.lang.as_deref() {
        None => NameField::default(),
        Some(lang) => match NameField::from_param(lang) {
            Some(field) => field,
            None => return Json(ReverseResponse::error(-1, format!("unknown lang {}", lang))),
        },
    };

    match geocoder.reverse(&params.key, params.longitude, params.latitude, field) {
        Ok(result) => Json(ReverseResponse {
            hit: result.hit,
            result: result.name,
            ..Default::default()
        }),
        Err(e @ GeocodeError::UnknownKey(_)) => Json(ReverseResponse::error(-2, e.to_string())),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    keys: Vec<String>,
    ids: usize,
}

async fn health_handler(State(geocoder): State<Arc<Geocoder>>) -> Json<HealthResponse> {
    let root = geocoder.root();
    Json(HealthResponse {
        status: "ok",
        keys: root.child_keys().into_iter().map(String::from).collect(),
        ids: root.id_map().len(),
    })
}
