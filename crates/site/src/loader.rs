use std::{fmt, str::FromStr, sync::Arc};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    atlas::{self, AtlasFetch, AtlasLevel},
    Datasets,
};

/// A page of the site and the data it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// State choropleth with the Michigan county drill-down.
    States,
    /// County map with expenditure, treemap and sector breakdowns.
    Counties,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::States, Page::Counties];

    pub fn name(&self) -> &'static str {
        match self {
            Page::States => "states",
            Page::Counties => "counties",
        }
    }

    pub fn atlas(&self) -> AtlasLevel {
        match self {
            Page::States => AtlasLevel::States,
            Page::Counties => AtlasLevel::Counties,
        }
    }

    /// Result fields this page fills, in serialization order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Page::States => &["usAtlas", "fundingData", "miCountyData"],
            Page::Counties => &[
                "usAtlas",
                "fundingData",
                "miCountyData",
                "expenditureData",
                "treemapData",
                "sectorData",
            ],
        }
    }

    fn includes_breakdowns(&self) -> bool {
        matches!(self, Page::Counties)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| UnknownPage(s.to_owned()))
    }
}

/// Everything the rendering layer needs for one page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    #[schema(value_type = Object)]
    pub us_atlas: Value,
    #[schema(value_type = Object)]
    pub funding_data: Arc<Value>,
    #[schema(value_type = Object)]
    pub mi_county_data: Arc<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub expenditure_data: Option<Arc<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub treemap_data: Option<Arc<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub sector_data: Option<Arc<Value>>,
}

pub struct PageDataLoader {
    fetcher: Arc<dyn AtlasFetch>,
    datasets: Arc<Datasets>,
}

impl PageDataLoader {
    pub fn new(fetcher: Arc<dyn AtlasFetch>, datasets: Arc<Datasets>) -> Self {
        Self { fetcher, datasets }
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// Fetch the page's atlas and attach its datasets.
    ///
    /// Makes exactly one request. A failed fetch is returned as is, with no
    /// retry and no partial result.
    pub async fn load(&self, page: Page) -> Result<LoadResult, atlas::Error> {
        let url = page.atlas().url();
        debug!("loading page {} with atlas {}", page, url);

        let us_atlas = self.fetcher.fetch_json(&url).await.map_err(|e| {
            error!("error loading page {}: {}", page, e);
            e
        })?;

        let datasets = &self.datasets;
        let breakdown = |data: &Arc<Value>| page.includes_breakdowns().then(|| Arc::clone(data));

        let result = LoadResult {
            us_atlas,
            funding_data: Arc::clone(&datasets.state_funding),
            mi_county_data: Arc::clone(&datasets.county_funding),
            expenditure_data: breakdown(&datasets.county_expenditures),
            treemap_data: breakdown(&datasets.treemap),
            sector_data: breakdown(&datasets.sector_monthly),
        };
        info!("loaded page {}", page);
        Ok(result)
    }
}
