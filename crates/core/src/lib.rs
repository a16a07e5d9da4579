//! Funding Atlas Core Library
//!
//! Shared pieces for the site service:
//! - Configuration loading (XDG-compliant)
//! - File system utilities
//! - Common constants

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{is_directory, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "funding-atlas";

/// Default site port
pub const DEFAULT_SITE_PORT: u16 = 9810;

/// CDN root of the published us-atlas topologies
pub const US_ATLAS_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3";
