//! Nested descriptors attached to an online module.

use serde::{Deserialize, Serialize};

use crate::utils::common::version_display;

/// Where a module is tracked from and when it was added to the repository.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackJson {
    /// Track type, e.g. `ONLINE_JSON`, `UPDATE_JSON` or `GIT`.
    #[serde(rename = "type", default)]
    pub(crate) type_name: String,
    /// Unix timestamp (seconds) at which the module was added.
    pub(crate) added: Option<f64>,
    pub(crate) source: Option<String>,
    /// Anti-features flagged by the repository maintainers.
    pub(crate) antifeatures: Option<Vec<String>>,
    pub(crate) build: Option<bool>,
}

/// One published release of a module.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VersionItem {
    #[serde(default)]
    pub(crate) timestamp: f64,
    pub(crate) version: String,
    pub(crate) version_code: i64,
    #[serde(default)]
    pub(crate) zip_url: String,
    #[serde(default)]
    pub(crate) changelog: String,
}

impl VersionItem {
    pub(crate) fn version_display(&self) -> String {
        version_display(&self.version, self.version_code)
    }
}

/// Minimum root manager versions declared by the module.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ModuleRoot {
    pub(crate) magisk: Option<String>,
    pub(crate) kernelsu: Option<String>,
    pub(crate) apatch: Option<String>,
}

/// A note the repository attaches to a module, usually a warning.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ModuleNote {
    pub(crate) title: Option<String>,
    pub(crate) color: Option<String>,
    #[serde(default)]
    pub(crate) message: String,
}

/// Capabilities a module makes use of.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModuleFeatures {
    pub(crate) service: Option<bool>,
    pub(crate) post_fs_data: Option<bool>,
    pub(crate) resetprop: Option<bool>,
    pub(crate) sepolicy: Option<bool>,
    pub(crate) zygisk: Option<bool>,
    pub(crate) apks: Option<bool>,
    pub(crate) webroot: Option<bool>,
    pub(crate) post_mount: Option<bool>,
    pub(crate) boot_completed: Option<bool>,
    pub(crate) modconf: Option<bool>,
}

impl ModuleFeatures {
    /// Names of all features explicitly enabled, in declaration order.
    pub(crate) fn enabled(&self) -> Vec<&'static str> {
        [
            ("service", self.service),
            ("postFsData", self.post_fs_data),
            ("resetprop", self.resetprop),
            ("sepolicy", self.sepolicy),
            ("zygisk", self.zygisk),
            ("apks", self.apks),
            ("webroot", self.webroot),
            ("postMount", self.post_mount),
            ("bootCompleted", self.boot_completed),
            ("modconf", self.modconf),
        ]
        .into_iter()
        .filter_map(|(name, flag)| (flag == Some(true)).then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_features_enabled() {
        let features: ModuleFeatures = serde_json::from_value(json!({
            "service": true,
            "postFsData": false,
            "zygisk": true,
            "webroot": null
        }))
        .unwrap();
        assert_eq!(features.enabled(), vec!["service", "zygisk"]);
        assert!(ModuleFeatures::default().enabled().is_empty());
    }

    #[test]
    fn test_track_defaults() {
        let track: TrackJson = serde_json::from_value(json!({ "type": "ONLINE_JSON" })).unwrap();
        assert_eq!(track.type_name, "ONLINE_JSON");
        assert!(track.added.is_none());
        assert!(track.antifeatures.is_none());
    }

    #[test]
    fn test_version_item() {
        let item: VersionItem = serde_json::from_value(json!({
            "timestamp": 1692213600.0,
            "version": "v2.1",
            "versionCode": 210,
            "zipUrl": "https://example.com/module.zip"
        }))
        .unwrap();
        assert_eq!(item.version_display(), "v2.1 (210)");
        assert!(item.changelog.is_empty());
    }
}
