use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use super::listing::{class_dirs, dir_name, movie_files};
use super::outdir::{self, CreateOutcome};
use super::sampler::Sampler;

/// The only recognized movie container, matched case-insensitively.
pub const MOVIE_EXT: &str = "mov";
/// All background groups collapse into this single output class.
pub const BACKGROUND_CLASS: &str = "background";

/// Flat mode: every movie directly under `root` gets a sibling output
/// directory named after its basename. A directory that already exists means
/// the video was handled by an earlier run, so the video is skipped outright.
pub fn walk_flat(root: &Path, interval: u32, sampler: &dyn Sampler) -> Result<()> {
    for video in movie_files(root)? {
        let basename = video
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_dir = root.join(&basename);

        match outdir::create(&output_dir)? {
            CreateOutcome::AlreadyExists => {
                println!("directory '{}' already exists", basename);
                continue;
            }
            CreateOutcome::Created => {
                sampler.sample(&video, &output_dir, interval, "")?;
            }
        }
    }
    Ok(())
}

/// Categorized mode configuration. All paths are explicit; nothing is
/// derived from the process's own location.
pub struct CategorizedRun {
    pub categories_root: PathBuf,
    pub background_root: PathBuf,
    pub run_root: PathBuf,
    pub interval: u32,
}

impl CategorizedRun {
    /// Creates the timestamped run directory and extracts categories, then
    /// background groups. The run directory must not already exist; a
    /// collision there aborts the whole run.
    pub fn execute(&self, sampler: &dyn Sampler) -> Result<PathBuf> {
        self.execute_at(Local::now(), sampler)
    }

    pub fn execute_at(&self, now: DateTime<Local>, sampler: &dyn Sampler) -> Result<PathBuf> {
        let run_dir = outdir::timestamped_run_dir(&self.run_root, now);
        fs::create_dir(&run_dir).with_context(|| {
            format!(
                "Run directory {} could not be created (it must not already exist)",
                run_dir.display()
            )
        })?;
        println!("📁 Output run: {}", run_dir.display());

        println!("=== Extracting category videos ===");
        self.extract_categories(&run_dir, sampler)?;
        println!("=== Category extraction complete ===");

        println!("=== Extracting background videos ===");
        self.extract_background(&run_dir, sampler)?;
        println!("=== Background extraction complete ===");

        Ok(run_dir)
    }

    /// One output directory per category. A pre-existing category directory
    /// only skips the creation, never the extraction into it.
    fn extract_categories(&self, run_dir: &Path, sampler: &dyn Sampler) -> Result<()> {
        for category_dir in class_dirs(&self.categories_root)? {
            let category = dir_name(&category_dir);
            let output_dir = run_dir.join(&category);

            if outdir::create(&output_dir)? == CreateOutcome::AlreadyExists {
                log::info!(
                    "Category directory {} already exists, extracting into it",
                    output_dir.display()
                );
            }

            for (ordinal, video) in movie_files(&category_dir)?.iter().enumerate() {
                let prefix = format!("{}{}", category, ordinal);
                sampler.sample(video, &output_dir, self.interval, &prefix)?;
            }
        }
        Ok(())
    }

    /// Background groups are a single merged class: every group's videos
    /// land in one `background` directory, kept apart only by their
    /// group-name prefixes.
    fn extract_background(&self, run_dir: &Path, sampler: &dyn Sampler) -> Result<()> {
        let background_dir = run_dir.join(BACKGROUND_CLASS);
        // Created at most once per run; an existing directory is fine
        outdir::create(&background_dir)?;

        for group_dir in class_dirs(&self.background_root)? {
            let group = dir_name(&group_dir);
            for (ordinal, video) in movie_files(&group_dir)?.iter().enumerate() {
                let prefix = format!("{}{}", group, ordinal);
                sampler.sample(video, &background_dir, self.interval, &prefix)?;
            }
        }
        Ok(())
    }
}
