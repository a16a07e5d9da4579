pub mod atlas;
pub mod datasets;
mod loader;
pub mod routes;
mod startup;
mod utils;

pub use atlas::{AtlasFetch, AtlasLevel, HttpFetcher};
pub use datasets::Datasets;
pub use loader::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
