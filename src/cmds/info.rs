use color_eyre::Result;
use std::path::PathBuf;

use crate::cmds::common::{format_list, load_module, summarize_requirements};
use crate::config::MmrlConfig;
use crate::modules::online::OnlineModule;
use crate::utils::common::if_not_blank;

/// Show the metadata of a single module
///
/// Icons and covers are only printed if enabled in the configuration.
///
/// * `feed` - Feed file containing the module
/// * `id` - Id of the module
/// * `config` - Application configuration providing platform and display preferences
///
/// # Errors
/// Returns errors if the feed cannot be loaded or does not contain the module.
pub(crate) fn info(feed: PathBuf, id: String, config: &MmrlConfig) -> Result<bool> {
    let module = load_module(&feed, &id)?;
    print!("{}", render(&module, config));
    Ok(true)
}

fn render(module: &OnlineModule, config: &MmrlConfig) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: &str| out.push_str(&format!("{:<12} {}\n", key, value));

    line("id", &module.id);
    line("name", &module.name);
    line("version", &module.version_display());
    line("author", &module.author);
    if let Some(description) = if_not_blank(Some(module.description.as_str()), str::to_string) {
        line("description", &description);
    }
    if module.has_license() {
        line("license", module.license.as_deref().unwrap_or_default());
    }
    if let Some(Some(icon)) = module.icon_if_shown(&config.menu) {
        line("icon", icon);
    }
    if module.cover_or_screenshots(&config.menu).is_some() {
        if let Some(cover) = module.cover_if_shown(&config.menu) {
            line("cover", cover);
        }
        if let Some(screenshots) = module.screenshots_if_any() {
            line("screenshots", &screenshots.len().to_string());
        }
    }
    for (key, value) in [
        ("homepage", &module.homepage),
        ("donate", &module.donate),
        ("support", &module.support),
        ("readme", &module.readme),
    ] {
        if let Some(value) = if_not_blank(value.as_deref(), str::to_string) {
            line(key, &value);
        }
    }
    if module.has_categories() {
        line("categories", &format_list(module.categories.as_deref()));
    }
    if module.has_min_api() || module.has_max_api() {
        let bound = |api: Option<i32>| api.map_or_else(|| "-".to_string(), |a| a.to_string());
        line(
            "api",
            &format!("{} - {}", bound(module.min_api), bound(module.max_api)),
        );
    }
    if let Some(size) = module.size {
        line("size", &format!("{} bytes", size));
    }
    if let Some(features) = module.features.as_ref() {
        let enabled = features.enabled();
        if !enabled.is_empty() {
            line("features", &enabled.join(", "));
        }
    }
    if let Some(note) = module.note.as_ref() {
        match note.title.as_deref() {
            Some(title) => line("note", &format!("{}: {}", title, note.message)),
            None => line("note", &note.message),
        }
    }
    if let Some(root) = module.root.as_ref() {
        let minimums: Vec<String> = [
            ("magisk", &root.magisk),
            ("kernelsu", &root.kernelsu),
            ("apatch", &root.apatch),
        ]
        .into_iter()
        .filter_map(|(name, min)| min.as_deref().map(|m| format!("{} >= {}", name, m)))
        .collect();
        line("root", &format_list(Some(minimums.as_slice())));
    }
    if !module.track.type_name.is_empty() {
        line("track", &module.track.type_name);
    }
    line("releases", &module.versions.len().to_string());
    if let Some(latest) = module.versions.iter().max_by_key(|v| v.version_code) {
        line("latest", &latest.version_display());
    }
    line("verified", &module.is_verified().to_string());

    let flags: Vec<String> = module
        .flags()
        .into_iter()
        .filter_map(|(name, set)| set.then(|| name.to_string()))
        .collect();
    line("flags", &format_list(Some(flags.as_slice())));

    let requirements = module.manager(config.platform);
    line(
        config.platform.as_str(),
        &summarize_requirements(&requirements).unwrap_or_else(|| "no requirements".to_string()),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::manager::Platform;
    use crate::modules::online::RepositoryMenu;
    use std::path::PathBuf;

    fn config(menu: RepositoryMenu) -> MmrlConfig {
        MmrlConfig {
            config_file: PathBuf::from("/dev/null"),
            platform: Platform::Magisk,
            menu,
            logs_dir: PathBuf::from("/tmp"),
            logs_max: 1,
        }
    }

    #[test]
    fn test_render_respects_menu() {
        let module = OnlineModule {
            icon: Some("icon.png".to_string()),
            cover: Some("cover.png".to_string()),
            ..OnlineModule::example()
        };

        let shown = render(&module, &config(RepositoryMenu::default()));
        assert!(shown.contains("icon.png"));
        assert!(shown.contains("cover.png"));
        assert!(shown.contains("2022.08.16 (1703)"));
        assert!(shown.contains("GPL-3.0"));
        assert!(shown.contains("no requirements"));

        let hidden = render(
            &module,
            &config(RepositoryMenu {
                show_icon: false,
                show_cover: false,
            }),
        );
        assert!(!hidden.contains("icon.png"));
        assert!(!hidden.contains("cover.png"));
    }

    #[test]
    fn test_render_unknown_license_is_hidden() {
        let module = OnlineModule {
            license: Some("UNKNOWN".to_string()),
            ..OnlineModule::example()
        };
        let out = render(&module, &config(RepositoryMenu::default()));
        assert!(!out.contains("license"));
    }
}
