//! Repository feed documents and recommended repository lists.
//!
//! Downloading feeds is the job of the sync component; this module only reads the JSON files it
//! leaves behind.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::FeedError;
use crate::modules::online::OnlineModule;

/// A repository suggested to users, as listed in the recommended repositories file.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecommendedRepo {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) maintainers: Option<Vec<String>>,
    pub(crate) submissions: Option<String>,
    pub(crate) notes: Option<String>,
}

impl RecommendedRepo {
    /// Reads a JSON array of recommended repositories from `path`.
    pub(crate) fn read_list<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, FeedError> {
        let content = read_file(path.as_ref())?;
        let repos: Vec<Self> =
            serde_json::from_str(&content).map_err(|source| FeedError::Parse {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        debug!("Read {} recommended repositories from {:?}", repos.len(), path.as_ref());
        Ok(repos)
    }
}

/// Free-form repository metadata shipped with a feed.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepoMetadata {
    pub(crate) version: Option<MetadataVersion>,
    pub(crate) timestamp: Option<f64>,
}

/// Feed format version; repositories publish it either as a number or a string.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub(crate) enum MetadataVersion {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataVersion::Number(n) => write!(f, "{}", n),
            MetadataVersion::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The repository document served by an online repository.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub(crate) struct RepoFeed {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) website: Option<String>,
    pub(crate) support: Option<String>,
    pub(crate) donate: Option<String>,
    pub(crate) submission: Option<String>,
    pub(crate) metadata: Option<RepoMetadata>,
    #[serde(default)]
    pub(crate) modules: Vec<OnlineModule>,
}

impl RepoFeed {
    /// Reads and parses the feed stored at `path`.
    pub(crate) fn read_feed<P: AsRef<Path>>(path: P) -> Result<Self, FeedError> {
        let content = read_file(path.as_ref())?;
        let feed: Self = serde_json::from_str(&content).map_err(|source| FeedError::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        debug!(
            repo = %feed.name,
            modules = feed.modules.len(),
            "Read feed from {:?}",
            path.as_ref()
        );
        Ok(feed)
    }

    pub(crate) fn find(&self, id: &str) -> Option<&OnlineModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Merges the modules of several feeds, keeping the highest `version_code` per id.
    ///
    /// On equal version codes the module seen first wins. The result is sorted by id.
    pub(crate) fn dedup_latest(feeds: &[RepoFeed]) -> Vec<OnlineModule> {
        let mut latest: HashMap<&str, &OnlineModule> = HashMap::new();

        for module in feeds.iter().flat_map(|f| f.modules.iter()) {
            let keep_current = latest
                .get(module.id.as_str())
                .is_some_and(|current| current.version_code >= module.version_code);

            if keep_current {
                trace!(id = %module.id, "Skipping older version {}", module.version_code);
            } else {
                latest.insert(module.id.as_str(), module);
            }
        }

        let mut modules: Vec<OnlineModule> = latest.into_values().cloned().collect();
        modules.sort_by(|a, b| a.id.cmp(&b.id));
        modules
    }
}

fn read_file(path: &Path) -> Result<String, FeedError> {
    std::fs::read_to_string(path).map_err(|source| FeedError::Read {
        path: PathBuf::from(path),
        source,
    })
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn module(id: &str, version_code: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": id,
            "version": format!("v{}", version_code),
            "versionCode": version_code,
            "author": "tester"
        })
    }

    #[test]
    fn test_read_feed() -> color_eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("modules.json");
        fs::write(
            &path,
            serde_json::to_string(&json!({
                "name": "Test Repo",
                "website": "https://example.com",
                "metadata": { "version": "1", "timestamp": 1700000000.0 },
                "modules": [module("a", 1), module("b", 2)]
            }))?,
        )?;

        let feed = RepoFeed::read_feed(&path)?;
        assert_eq!(feed.name, "Test Repo");
        assert_eq!(feed.modules.len(), 2);
        assert_eq!(feed.find("b").map(|m| m.version_code), Some(2));
        assert!(feed.find("c").is_none());
        Ok(())
    }

    #[test]
    fn test_read_feed_errors() -> color_eyre::Result<()> {
        let temp_dir = TempDir::new()?;

        let missing = RepoFeed::read_feed(temp_dir.path().join("missing.json"));
        assert!(matches!(missing, Err(FeedError::Read { .. })));

        let broken = temp_dir.path().join("broken.json");
        fs::write(&broken, "{ not json")?;
        let parsed = RepoFeed::read_feed(&broken);
        assert!(matches!(parsed, Err(FeedError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_metadata_version_number_or_string() {
        let numeric: RepoFeed =
            serde_json::from_value(json!({ "name": "n", "metadata": { "version": 1 } })).unwrap();
        let version = numeric.metadata.and_then(|m| m.version);
        assert_eq!(version, Some(MetadataVersion::Number(1)));
        assert_eq!(version.map(|v| v.to_string()).as_deref(), Some("1"));

        let text: RepoFeed =
            serde_json::from_value(json!({ "metadata": { "version": "1.2", "timestamp": 5 } }))
                .unwrap();
        let metadata = text.metadata.unwrap();
        assert_eq!(metadata.version, Some(MetadataVersion::Text("1.2".to_string())));
        assert_eq!(metadata.timestamp, Some(5.0));
    }

    #[test]
    fn test_dedup_latest() {
        let first: RepoFeed =
            serde_json::from_value(json!({ "modules": [module("a", 1), module("b", 5)] }))
                .unwrap();
        let second: RepoFeed =
            serde_json::from_value(json!({ "modules": [module("a", 3), module("b", 4)] }))
                .unwrap();

        let merged = RepoFeed::dedup_latest(&[first, second]);
        let versions: Vec<(&str, i64)> = merged
            .iter()
            .map(|m| (m.id.as_str(), m.version_code))
            .collect();
        assert_eq!(versions, vec![("a", 3), ("b", 5)]);
    }

    #[test]
    fn test_read_recommended_repos() -> color_eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("recommended.json");
        fs::write(
            &path,
            serde_json::to_string(&json!([
                {
                    "name": "Magisk Modules Alt Repo",
                    "url": "https://example.com/json/modules.json",
                    "maintainers": ["someone"]
                },
                { "name": "Minimal", "url": "https://example.org/modules.json" }
            ]))?,
        )?;

        let repos = RecommendedRepo::read_list(&path)?;
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].maintainers.as_deref(), Some(["someone".to_string()].as_slice()));
        assert!(repos[1].notes.is_none());
        Ok(())
    }
}
