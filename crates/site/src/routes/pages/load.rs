use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::error;
use std::sync::Arc;

use crate::{AppState, LoadResult, Page};

#[utoipa::path(
    get,
    path = "/api/pages/{page}",
    params(
         ("page" = String, Path, description = "Page to load: states or counties"),
    ),
    responses(
        (status = OK, description = "Atlas and funding data for the page", body = LoadResult),
        (status = NOT_FOUND, description = "Unknown page"),
        (status = BAD_GATEWAY, description = "Atlas could not be fetched")
    ))]
pub async fn load_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
) -> Result<Json<LoadResult>, (StatusCode, String)> {
    let page: Page = page
        .parse()
        .map_err(|e| (StatusCode::NOT_FOUND, format!("{}", e)))?;

    let result = state.loader.load(page).await.map_err(|e| {
        error!("error serving page {}: {}", page, e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    Ok(Json(result))
}
