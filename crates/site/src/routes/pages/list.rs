use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{AtlasLevel, Page};

#[derive(Debug, Serialize, ToSchema)]
pub struct PageInfo {
    pub name: String,
    pub atlas: AtlasLevel,
    pub atlas_url: String,
    pub fields: Vec<String>,
}

impl From<Page> for PageInfo {
    fn from(page: Page) -> Self {
        Self {
            name: page.name().to_owned(),
            atlas: page.atlas(),
            atlas_url: page.atlas().url(),
            fields: page.fields().iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/pages",
    responses(
        (status = OK, description = "Pages the site can load", body = Vec<PageInfo>),
    ))]
pub async fn list_pages() -> Json<Vec<PageInfo>> {
    Json(Page::ALL.into_iter().map(PageInfo::from).collect())
}
