//! Common utility functions module.
//!
//! Small helpers shared by the module model and the commands: presence checks for optional feed
//! values and the version display rule used for modules and their version history.

use regex::Regex;

/// Returns `true` if the optional string is present and contains non-whitespace characters.
pub(crate) fn is_not_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Returns `true` if the optional slice is present and holds at least one element.
pub(crate) fn is_not_empty<T>(value: Option<&[T]>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Runs `block` with the string if it is present and not blank.
///
/// # Examples
///
/// ```
/// let upper = if_not_blank(Some("gpl"), |s| s.to_uppercase());
/// assert_eq!(upper, Some("GPL".to_string()));
/// ```
pub(crate) fn if_not_blank<R>(value: Option<&str>, block: impl FnOnce(&str) -> R) -> Option<R> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(block(v)),
        _ => None,
    }
}

/// Combines a display version and its version code into a single human readable string.
///
/// Feed authors frequently embed the version code already, e.g. `"v1.2 (120)"`. In that case the
/// version is returned untouched, otherwise the code is appended in parentheses.
pub(crate) fn version_display(version: &str, version_code: i64) -> String {
    let pattern = format!(r"\(.*?{}.*?\)", version_code);
    // The pattern only contains an integer, so it always compiles
    let included = Regex::new(&pattern)
        .map(|re| re.is_match(version))
        .unwrap_or(false);

    if included {
        version.to_string()
    } else {
        format!("{} ({})", version, version_code)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
