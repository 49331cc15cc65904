use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use std::path::{Path, PathBuf};

use crate::core::listing::{class_dirs, dir_name};

/// Lets the operator pick which output run to verify when none was given on
/// the command line. Returns `None` when there is nothing to pick from.
pub fn pick_run_dir(base: &Path) -> Result<Option<PathBuf>> {
    let candidates = class_dirs(base)?;

    if candidates.is_empty() {
        eprintln!("❌ No output directories found under {}", base.display());
        return Ok(None);
    }

    let names: Vec<String> = candidates.iter().map(|path| dir_name(path)).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select an output run to verify")
        .default(0)
        .items(&names)
        .interact()?;

    Ok(Some(candidates[selection].clone()))
}
