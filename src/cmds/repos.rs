use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::path::PathBuf;
use tracing::info;

use crate::cmds::common::format_list;
use crate::modules::repo::RecommendedRepo;
use crate::utils::common::if_not_blank;

/// List recommended repositories
///
/// * `file` - JSON file holding an array of recommended repositories
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub(crate) fn repos(file: PathBuf) -> Result<bool> {
    let repos =
        RecommendedRepo::read_list(&file).wrap_err("Failed to load recommended repositories")?;

    if repos.is_empty() {
        info!("No recommended repositories in {}", file.display());
        return Ok(true);
    }

    for repo in repos.iter() {
        println!("{}\n    {}", repo.name, repo.url);
        if repo.maintainers.as_ref().is_some_and(|m| !m.is_empty()) {
            println!("    maintainers: {}", format_list(repo.maintainers.as_deref()));
        }
        if let Some(submissions) = if_not_blank(repo.submissions.as_deref(), str::to_string) {
            println!("    submissions: {}", submissions);
        }
        if let Some(notes) = if_not_blank(repo.notes.as_deref(), str::to_string) {
            println!("    notes: {}", notes);
        }
    }

    Ok(true)
}
