use color_eyre::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::utils::file_fs::find_file_glob;
use crate::utils::url::is_local_wifi_url;

/// Lookup a file by name inside a directory
///
/// Prints the first file in `dir` whose name without extension is `prefix` and that matches one
/// of `patterns` (or the default APK/JAR/DEX patterns).
///
/// * `dir` - Directory to search, not recursive
/// * `prefix` - File name without extension
/// * `patterns` - Glob patterns, may be empty
///
/// # Errors
/// Returns errors if the directory cannot be read or a pattern is invalid.
pub(crate) fn lookup(dir: PathBuf, prefix: String, patterns: Vec<String>) -> Result<bool> {
    match find_file_glob(&dir, &prefix, patterns.as_slice())? {
        Some(path) => {
            // Use the debug representation to return the path in order to preserve non-UTF8 chars
            println!("{:?}", path);
            Ok(true)
        }
        None => {
            warn!("No file matching {} found in {}", prefix, dir.display());
            Ok(false)
        }
    }
}

/// Check whether `url` points to a host on the local network
pub(crate) fn check_url(url: String) -> Result<bool> {
    let local = is_local_wifi_url(&url);
    info!("{} is {}a local network URL", url, if local { "" } else { "not " });
    println!("{}", local);
    Ok(local)
}
