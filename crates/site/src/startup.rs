use crate::{
    list_pages, load_page, routes, AtlasFetch, AtlasLevel, Datasets, HttpFetcher, LoadResult,
    Page, PageDataLoader,
};
use anyhow::anyhow;
use axum::{
    body::Body, extract::Request, middleware, middleware::Next, response::IntoResponse,
    routing::get, Router,
};
use funding_atlas_core::{is_directory, path_exists};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub loader: Arc<PageDataLoader>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::pages::list::list_pages,
        routes::pages::load::load_page,
    ),
    components(
        schemas(
                routes::pages::list::PageInfo,
                LoadResult,
                Page,
                AtlasLevel
            )
    ),
    tags(
        (name = "funding atlas api", description = "page data for the funding atlas: us-atlas topologies bundled with funding statistics")
    )
)]
struct ApiDoc;

/// Pick the datasets: a configured directory wins over the bundled copies.
pub fn load_datasets(data_dir: Option<&str>) -> Result<Datasets, anyhow::Error> {
    match data_dir {
        Some(dir) => {
            if !path_exists(dir) {
                return Err(anyhow!("data directory {} does not exist", dir));
            }
            if !is_directory(dir) {
                return Err(anyhow!("data directory {} is not a directory", dir));
            }
            Datasets::from_dir(dir).map_err(|e| anyhow!("error loading datasets: {}", e))
        }
        None => Datasets::bundled().map_err(|e| anyhow!("error loading bundled datasets: {}", e)),
    }
}

pub fn build_app_state(
    static_dir: String,
    data_dir: Option<String>,
) -> Result<AppState, anyhow::Error> {
    let fetcher = Arc::new(
        HttpFetcher::new().map_err(|e| anyhow!("error setting up atlas fetcher: {}", e))?,
    );
    let datasets = load_datasets(data_dir.as_deref())?;
    Ok(app_state_with(static_dir, fetcher, datasets))
}

/// Assemble state around any fetch capability.
pub fn app_state_with(
    static_dir: String,
    fetcher: Arc<dyn AtlasFetch>,
    datasets: Datasets,
) -> AppState {
    AppState {
        static_dir,
        loader: Arc::new(PageDataLoader::new(fetcher, Arc::new(datasets))),
    }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let serve_static = ServeDir::new(&app_state.static_dir);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/api/pages", get(list_pages))
        .route("/api/pages/{page}", get(load_page))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .fallback_service(serve_static)
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
