//! File system operations module.
//!
//! Path expansion for configuration values and glob based lookups of files inside a directory,
//! e.g. locating the APK/JAR/DEX payload shipped next to a module.

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use glob::Pattern;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Glob patterns searched by [`find_file_glob`] when the caller does not provide any.
pub(crate) const DEFAULT_GLOB_PATTERNS: [&str; 3] = ["*.apk", "*.jar", "*.dex"];

/// Expands a path, resolving environment variables and tilde expressions.
///
/// This function takes a path and expands any environment variables (e.g., $HOME) and tilde
/// expressions (~) within it.
///
/// # Arguments
///
/// * `path` - Any type that can be converted to a Path
/// * `env` - Optional HashMap containing environment variable pairs to prepend to the default
///           environment
///
/// # Errors
///
/// Returns an error if environment variables cannot be expanded.
pub(crate) fn expand_path<P: AsRef<Path>, S: AsRef<OsStr>>(
    path: P,
    env: Option<&HashMap<String, S>>,
) -> Result<PathBuf> {
    let home_dir = || -> Option<PathBuf> { dirs::home_dir() };

    // Create variable lookup closure that checks custom env first, then system env
    let context = |var: &str| -> Result<Option<OsString>> {
        if let Some(custom_env) = env {
            if let Some(value) = custom_env.get(var) {
                return Ok(Some(value.as_ref().into()));
            }
        }
        Ok(std::env::var_os(var))
    };

    let expanded = shellexpand::path::full_with_context(&path, home_dir, context)
        .map_err(|e| eyre!("Failed to expand path: {:?}", e))?;

    Ok(PathBuf::from(expanded))
}

/// Finds the first file in `dir` matching one of the glob `patterns` whose name without
/// extension equals `prefix`.
///
/// Entries are visited in file name order so repeated lookups are stable. If `patterns` is empty,
/// [`DEFAULT_GLOB_PATTERNS`] is used.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or a pattern is not a valid glob.
pub(crate) fn find_file_glob<P: AsRef<Path>, S: AsRef<str>>(
    dir: P,
    prefix: &str,
    patterns: &[S],
) -> Result<Option<PathBuf>> {
    let raw_patterns: Vec<&str> = if patterns.is_empty() {
        DEFAULT_GLOB_PATTERNS.to_vec()
    } else {
        patterns.iter().map(AsRef::as_ref).collect()
    };
    let patterns = raw_patterns
        .iter()
        .map(|p| Pattern::new(p).wrap_err_with(|| format!("Invalid glob pattern {}", p)))
        .collect::<Result<Vec<_>>>()?;

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())
        .wrap_err_with(|| format!("Failed to read directory {:?}", dir.as_ref()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .wrap_err_with(|| format!("Failed to read entry in {:?}", dir.as_ref()))?;
    entries.sort();

    for path in entries {
        let (Some(file_name), Some(stem)) = (path.file_name(), path.file_stem()) else {
            continue;
        };
        let file_name = file_name.to_string_lossy();

        for pattern in patterns.iter() {
            trace!(file = %file_name, pattern = %pattern, "Matching");
            if pattern.matches(&file_name) && stem == OsStr::new(prefix) {
                debug!("Found {:?} for prefix {}", path, prefix);
                return Ok(Some(path));
            }
        }
    }

    Ok(None)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_path() -> Result<()> {
        let env = HashMap::from([("MMRL_TEST_DIR".to_string(), "/opt/mmrl")]);
        let expanded = expand_path("$MMRL_TEST_DIR/feeds", Some(&env))?;
        assert_eq!(expanded, PathBuf::from("/opt/mmrl/feeds"));

        let expanded = expand_path::<&str, &str>("/plain/path", None)?;
        assert_eq!(expanded, PathBuf::from("/plain/path"));
        Ok(())
    }

    #[test]
    fn test_find_file_glob_default_patterns() -> Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join("classes.txt"), "")?;
        fs::write(temp_dir.path().join("classes.dex"), "")?;
        fs::write(temp_dir.path().join("other.apk"), "")?;

        let found = find_file_glob::<_, &str>(temp_dir.path(), "classes", &[])?;
        assert_eq!(found, Some(temp_dir.path().join("classes.dex")));
        Ok(())
    }

    #[test]
    fn test_find_file_glob_custom_patterns() -> Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join("module.zip"), "")?;
        fs::write(temp_dir.path().join("module.apk"), "")?;

        let found = find_file_glob(temp_dir.path(), "module", &["*.zip"])?;
        assert_eq!(found, Some(temp_dir.path().join("module.zip")));

        let found = find_file_glob(temp_dir.path(), "missing", &["*.zip"])?;
        assert_eq!(found, None);
        Ok(())
    }

    #[test]
    fn test_find_file_glob_prefix_must_match_stem() -> Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join("module-extra.apk"), "")?;

        let found = find_file_glob::<_, &str>(temp_dir.path(), "module", &[])?;
        assert!(found.is_none());
        Ok(())
    }

    #[test]
    fn test_find_file_glob_missing_dir() {
        let temp_dir = tempdir().unwrap();
        let result = find_file_glob::<_, &str>(temp_dir.path().join("nope"), "x", &[]);
        assert!(result.is_err());
    }
}
