use color_eyre::eyre::{WrapErr, eyre};
use color_eyre::{Result, Section};
use std::path::Path;

use crate::modules::manager::EffectiveRequirements;
use crate::modules::online::OnlineModule;
use crate::modules::repo::RepoFeed;

/// Reads `feed` and returns the module with the given `id`.
///
/// # Errors
/// Returns an error if:
/// * The feed cannot be read or parsed
/// * No module with `id` exists in the feed
pub(crate) fn load_module(feed: &Path, id: &str) -> Result<OnlineModule> {
    let repo = RepoFeed::read_feed(feed).wrap_err("Failed to load repository feed")?;

    repo.find(id).cloned().ok_or_else(|| {
        eyre!("Module {} not found in {}", id, feed.display())
            .suggestion("Run 'mmrl list <FEED>' to see the available module ids")
    })
}

/// Joins a list for display, `-` if it is absent or empty.
pub(crate) fn format_list(values: Option<&[String]>) -> String {
    match values {
        Some(v) if !v.is_empty() => v.join(", "),
        _ => "-".to_string(),
    }
}

/// One line summary of effective requirements, `None` if nothing is required at all.
pub(crate) fn summarize_requirements(req: &EffectiveRequirements) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(min) = req.min {
        parts.push(format!("min {}", min));
    }
    if let Some(require) = req.require.as_deref() {
        parts.push(format!("requires {}", format_list(Some(require))));
    }
    if let Some(arch) = req.arch.as_deref() {
        parts.push(format!("arch {}", format_list(Some(arch))));
    }
    if let Some(devices) = req.devices.as_deref() {
        parts.push(format!("devices {}", format_list(Some(devices))));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::manager::ModuleManagerSolution;

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(None), "-");
        let empty: Vec<String> = vec![];
        assert_eq!(format_list(Some(empty.as_slice())), "-");
        assert_eq!(
            format_list(Some(["arm64-v8a".to_string(), "x86_64".to_string()].as_slice())),
            "arm64-v8a, x86_64"
        );
    }

    #[test]
    fn test_summarize_requirements() {
        assert_eq!(summarize_requirements(&ModuleManagerSolution::default()), None);

        let req = ModuleManagerSolution {
            min: Some(26000),
            arch: Some(vec!["arm64-v8a".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            summarize_requirements(&req).as_deref(),
            Some("min 26000; arch arm64-v8a")
        );
    }
}
