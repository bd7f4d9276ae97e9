use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

use crate::cmds::common::load_module;
use crate::config::MmrlConfig;
use crate::modules::manager::Platform;
use crate::modules::online::OnlineModule;

/// Print the effective installation requirements of a module as JSON
///
/// * `feed` - Feed file containing the module
/// * `id` - Id of the module
/// * `config` - Application configuration providing the platform
///
/// # Errors
/// Returns errors if the feed cannot be loaded or does not contain the module.
pub(crate) fn resolve(feed: PathBuf, id: String, config: &MmrlConfig) -> Result<bool> {
    let module = load_module(&feed, &id)?;
    debug!(id = %module.id, platform = %config.platform, "Resolving requirements");

    let output = serde_json::to_string_pretty(&to_json(&module, config.platform))
        .wrap_err("Failed to serialize requirements")?;
    println!("{}", output);

    Ok(true)
}

fn to_json(module: &OnlineModule, platform: Platform) -> serde_json::Value {
    json!({
        "id": module.id,
        "version": module.version_display(),
        "platform": platform,
        "requirements": module.manager(platform),
    })
}
