use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cmds::common::summarize_requirements;
use crate::config::MmrlConfig;
use crate::errors::join_errors;
use crate::modules::repo::RepoFeed;

/// List the modules of one or more repository feeds
///
/// Modules present in several feeds are listed once, using the release with the highest version
/// code. Requirements are resolved for the configured platform.
///
/// * `feeds` - Paths of the feed files to read
/// * `config` - Application configuration providing the platform
///
/// # Errors
/// Returns an aggregated error if any of the feeds cannot be read or parsed.
pub(crate) fn list(feeds: Vec<PathBuf>, config: &MmrlConfig) -> Result<bool> {
    let feeds = join_errors(
        feeds
            .iter()
            .map(|path| {
                RepoFeed::read_feed(path)
                    .wrap_err_with(|| format!("Failed to load feed {}", path.display()))
            })
            .collect(),
    )?;

    for feed in feeds.iter() {
        if let Some(version) = feed.metadata.as_ref().and_then(|m| m.version.as_ref()) {
            debug!(repo = %feed.name, %version, "Feed format version");
        }
    }

    let modules = RepoFeed::dedup_latest(&feeds);
    debug!(
        feeds = feeds.len(),
        modules = modules.len(),
        platform = %config.platform,
        "Merged feeds"
    );

    if modules.is_empty() {
        info!("No modules found");
        return Ok(true);
    }

    for module in modules.iter() {
        let verified = if module.is_verified() { " [verified]" } else { "" };
        println!(
            "{} - {} {} by {}{}",
            module.id,
            module.name,
            module.version_display(),
            module.author,
            verified
        );
        if let Some(summary) = summarize_requirements(&module.manager(config.platform)) {
            println!("    {}: {}", config.platform, summary);
        }
    }

    Ok(true)
}
