//! Funding statistics shipped with the site.
//!
//! The five documents are embedded at compile time and parsed once at
//! startup. They are never mutated afterwards; pages share them through
//! `Arc` so a load hands out the same document it was given.

use std::{fs, path::Path, sync::Arc};

use log::info;
use serde_json::Value;

pub const STATE_FUNDING_FILE: &str = "state_funding.json";
pub const COUNTY_FUNDING_FILE: &str = "county_funding.json";
pub const COUNTY_EXPENDITURES_FILE: &str = "county_expenditures.json";
pub const TREEMAP_FILE: &str = "treemap_data.json";
pub const SECTOR_MONTHLY_FILE: &str = "sector_monthly.json";

const BUNDLED: [(&str, &str); 5] = [
    (
        STATE_FUNDING_FILE,
        include_str!("../data/state_funding.json"),
    ),
    (
        COUNTY_FUNDING_FILE,
        include_str!("../data/county_funding.json"),
    ),
    (
        COUNTY_EXPENDITURES_FILE,
        include_str!("../data/county_expenditures.json"),
    ),
    (TREEMAP_FILE, include_str!("../data/treemap_data.json")),
    (
        SECTOR_MONTHLY_FILE,
        include_str!("../data/sector_monthly.json"),
    ),
];

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read dataset {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {file} is not valid json: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Datasets {
    pub state_funding: Arc<Value>,
    pub county_funding: Arc<Value>,
    pub county_expenditures: Arc<Value>,
    pub treemap: Arc<Value>,
    pub sector_monthly: Arc<Value>,
}

impl Datasets {
    /// Parse the copies compiled into the binary.
    pub fn bundled() -> Result<Self, Error> {
        let [state, county, expenditures, treemap, sector] =
            BUNDLED.map(|(file, raw)| parse(file, raw));
        Ok(Self {
            state_funding: state?,
            county_funding: county?,
            county_expenditures: expenditures?,
            treemap: treemap?,
            sector_monthly: sector?,
        })
    }

    /// Read the same five files from `dir` in place of the bundled copies.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let load = |file: &str| -> Result<Arc<Value>, Error> {
            let path = dir.join(file);
            let raw = fs::read_to_string(&path).map_err(|source| Error::Read {
                file: path.display().to_string(),
                source,
            })?;
            parse(&path.display().to_string(), &raw)
        };

        let datasets = Self {
            state_funding: load(STATE_FUNDING_FILE)?,
            county_funding: load(COUNTY_FUNDING_FILE)?,
            county_expenditures: load(COUNTY_EXPENDITURES_FILE)?,
            treemap: load(TREEMAP_FILE)?,
            sector_monthly: load(SECTOR_MONTHLY_FILE)?,
        };
        info!("loaded datasets from {}", dir.display());
        Ok(datasets)
    }
}

fn parse(file: &str, raw: &str) -> Result<Arc<Value>, Error> {
    serde_json::from_str(raw)
        .map(Arc::new)
        .map_err(|source| Error::Parse {
            file: file.to_owned(),
            source,
        })
}
