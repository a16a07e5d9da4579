//! Filesystem utilities

use std::path::Path;

use log::warn;

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check if a path is a directory
///
/// Logs a warning when the path exists but is something other than a directory.
pub fn is_directory(path: &str) -> bool {
    let path = Path::new(path);
    if path.exists() && !path.is_dir() {
        warn!("{} exists but is not a directory", path.display());
        return false;
    }
    path.is_dir()
}
