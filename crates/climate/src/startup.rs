use crate::{
    engine, index_handler, precipitation, routes, stations, temperature_between,
    temperature_from, tobs, ClimateData, SqliteStore,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::api::climate_routes::precipitation,
        routes::api::climate_routes::stations,
        routes::api::climate_routes::tobs,
        routes::api::climate_routes::temperature_from,
        routes::api::climate_routes::temperature_between,
    ),
    components(
        schemas(
            engine::PrecipitationPoint,
            engine::LabeledAggregate,
            routes::ErrorBody,
        )
    ),
    tags(
        (name = "hawaii climate api", description = "a read-only api over daily precipitation and temperature observations from Hawaii weather stations")
    )
)]
struct ApiDoc;

/// Open the dataset and verify it has the tables the API reads
pub async fn open_store(database: &str, max_connections: u32) -> Result<SqliteStore, anyhow::Error> {
    let store = SqliteStore::open(database, max_connections)
        .await
        .map_err(|e| anyhow!("error opening climate dataset: {}", e))?;
    store
        .health_check()
        .await
        .map_err(|e| anyhow!("climate dataset failed health check: {}", e))?;
    Ok(store)
}

pub fn build_app_state(climate_db: Arc<dyn ClimateData>) -> AppState {
    AppState { climate_db }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, {} code: {}, time: {}", path, response.status().as_str(), response_time);

    response
}
