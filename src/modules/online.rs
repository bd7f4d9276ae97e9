//! Metadata of a module published in an online repository.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::modules::manager::{self, EffectiveRequirements, ModuleManager, Platform};
use crate::modules::track::{ModuleFeatures, ModuleNote, ModuleRoot, TrackJson, VersionItem};
use crate::utils::common::{is_not_blank, is_not_empty, version_display};

/// Display preferences deciding which optional affordances of a module are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RepositoryMenu {
    pub(crate) show_icon: bool,
    pub(crate) show_cover: bool,
}

impl Default for RepositoryMenu {
    fn default() -> Self {
        Self {
            show_icon: true,
            show_cover: true,
        }
    }
}

/// A module as listed in a repository feed.
///
/// Records are immutable once deserialized. Two records are equal if and only if their `id`s
/// are equal, so a newer release of a module compares equal to the older one.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OnlineModule {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) version_code: i64,
    pub(crate) author: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) track: TrackJson,
    #[serde(default)]
    pub(crate) versions: Vec<VersionItem>,

    pub(crate) max_api: Option<i32>,
    pub(crate) min_api: Option<i32>,

    pub(crate) size: Option<u64>,
    pub(crate) categories: Option<Vec<String>>,
    pub(crate) icon: Option<String>,
    pub(crate) homepage: Option<String>,
    pub(crate) donate: Option<String>,
    pub(crate) support: Option<String>,
    pub(crate) cover: Option<String>,
    pub(crate) screenshots: Option<Vec<String>>,
    pub(crate) license: Option<String>,
    pub(crate) readme: Option<String>,
    pub(crate) verified: Option<bool>,

    pub(crate) require: Option<Vec<String>>,
    pub(crate) arch: Option<Vec<String>>,
    pub(crate) devices: Option<Vec<String>>,

    pub(crate) manager: Option<ModuleManager>,
    pub(crate) root: Option<ModuleRoot>,
    pub(crate) note: Option<ModuleNote>,
    pub(crate) features: Option<ModuleFeatures>,
}

impl OnlineModule {
    /// Version and version code combined into one human readable string.
    pub(crate) fn version_display(&self) -> String {
        version_display(&self.version, self.version_code)
    }

    // --
    // * Derived flags

    /// A license of `UNKNOWN` (any case) is a feed convention for "no license".
    pub(crate) fn has_license(&self) -> bool {
        is_not_blank(self.license.as_deref())
            && !self
                .license
                .as_deref()
                .is_some_and(|l| l.eq_ignore_ascii_case("unknown"))
    }

    pub(crate) fn has_require(&self) -> bool {
        is_not_empty(self.require.as_deref())
    }

    pub(crate) fn has_icon(&self) -> bool {
        is_not_blank(self.icon.as_deref())
    }

    pub(crate) fn has_homepage(&self) -> bool {
        is_not_blank(self.homepage.as_deref())
    }

    pub(crate) fn has_donate(&self) -> bool {
        is_not_blank(self.donate.as_deref())
    }

    pub(crate) fn has_support(&self) -> bool {
        is_not_blank(self.support.as_deref())
    }

    pub(crate) fn has_cover(&self) -> bool {
        is_not_blank(self.cover.as_deref())
    }

    pub(crate) fn has_screenshots(&self) -> bool {
        is_not_empty(self.screenshots.as_deref())
    }

    pub(crate) fn has_root(&self) -> bool {
        self.root.is_some()
    }

    pub(crate) fn has_note(&self) -> bool {
        self.note.is_some()
    }

    pub(crate) fn has_readme(&self) -> bool {
        is_not_blank(self.readme.as_deref())
    }

    pub(crate) fn has_categories(&self) -> bool {
        is_not_empty(self.categories.as_deref())
    }

    pub(crate) fn has_max_api(&self) -> bool {
        self.max_api.is_some()
    }

    pub(crate) fn has_min_api(&self) -> bool {
        self.min_api.is_some()
    }

    pub(crate) fn has_size(&self) -> bool {
        self.size.is_some()
    }

    pub(crate) fn is_verified(&self) -> bool {
        self.verified == Some(true)
    }

    /// All derived flags as `(name, value)` pairs, in a stable order.
    pub(crate) fn flags(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("license", self.has_license()),
            ("require", self.has_require()),
            ("icon", self.has_icon()),
            ("homepage", self.has_homepage()),
            ("donate", self.has_donate()),
            ("support", self.has_support()),
            ("cover", self.has_cover()),
            ("screenshots", self.has_screenshots()),
            ("root", self.has_root()),
            ("note", self.has_note()),
            ("readme", self.has_readme()),
            ("categories", self.has_categories()),
            ("max_api", self.has_max_api()),
            ("min_api", self.has_min_api()),
            ("size", self.has_size()),
            ("verified", self.is_verified()),
        ]
    }

    // --
    // * Presentation gating

    pub(crate) fn screenshots_if_any(&self) -> Option<&[String]> {
        self.screenshots.as_deref().filter(|s| !s.is_empty())
    }

    /// The icon, if icons are shown at all. The icon itself may still be absent.
    pub(crate) fn icon_if_shown(&self, menu: &RepositoryMenu) -> Option<Option<&str>> {
        menu.show_icon.then_some(self.icon.as_deref())
    }

    pub(crate) fn cover_if_shown(&self, menu: &RepositoryMenu) -> Option<&str> {
        self.cover
            .as_deref()
            .filter(|c| menu.show_cover && !c.trim().is_empty())
    }

    /// Cover and screenshots, if a shown cover or at least one screenshot exists.
    pub(crate) fn cover_or_screenshots(
        &self,
        menu: &RepositoryMenu,
    ) -> Option<(Option<&str>, Option<&[String]>)> {
        if self.cover_if_shown(menu).is_some() || self.has_screenshots() {
            Some((self.cover.as_deref(), self.screenshots.as_deref()))
        } else {
            None
        }
    }

    /// Effective installation requirements on `platform`.
    pub(crate) fn manager(&self, platform: Platform) -> EffectiveRequirements {
        manager::resolve(self, platform)
    }

    pub(crate) fn example() -> Self {
        Self {
            id: "online_example".to_string(),
            name: "Example".to_string(),
            version: "2022.08.16".to_string(),
            version_code: 1703,
            author: "Sanmer".to_string(),
            description: "This is an example!".to_string(),
            track: TrackJson {
                type_name: "ONLINE_JSON".to_string(),
                added: Some(0.0),
                antifeatures: Some(vec![]),
                ..Default::default()
            },
            versions: vec![],
            max_api: None,
            min_api: None,
            size: None,
            categories: None,
            icon: None,
            homepage: None,
            donate: None,
            support: None,
            cover: None,
            screenshots: None,
            license: Some("GPL-3.0".to_string()),
            readme: None,
            verified: None,
            require: None,
            arch: None,
            devices: None,
            manager: None,
            root: None,
            note: None,
            features: None,
        }
    }
}

impl PartialEq for OnlineModule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OnlineModule {}

impl Hash for OnlineModule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
