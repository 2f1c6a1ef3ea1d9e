use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use parcelmark_core::config::LayeredConfig;
use parcelmark_geocode::NominatimGeocoder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parcelmark_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parcelmark_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();

    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &api_config.config_path {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
    }
    let config = config.load_from_env();

    for (key, (value, source)) in config.to_inspection_map() {
        tracing::debug!(key = %key, value = %value, source = ?source, "Configuration value");
    }

    let geocoder = NominatimGeocoder::new(config.geocoder_url.value.clone())
        .context("Failed to create geocoder")?;

    tracing::info!(
        port = api_config.port,
        unit_price = config.unit_price.value,
        area_model = ?config.area_model.value,
        geocoder = %geocoder.base_url(),
        "Starting Parcelmark API server"
    );

    let state = Arc::new(
        AppState::from_config(config, Arc::new(geocoder)).context("Invalid configuration")?,
    );

    let origin = api_config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", api_config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors).layer(TraceLayer::new_for_http());

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
