mod core;
mod decoder;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::sampler::{FrameSampler, FLAT_IMAGE_EXT, RUN_IMAGE_EXT};
use crate::core::verifier;
use crate::core::walker::{self, CategorizedRun};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract frames from every video directly under a directory
    Extract {
        /// Directory holding the .mov files
        #[arg(short, long)]
        root: PathBuf,
        /// Keep every Nth frame
        #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
        interval: u32,
    },
    /// Build a labeled training run from category and background videos
    Build {
        #[arg(long, default_value = "Training/raw_categories")]
        categories_root: PathBuf,
        #[arg(long, default_value = "Training/raw_background")]
        background_root: PathBuf,
        /// Output location; the run directory gets a per-minute timestamp suffix
        #[arg(long, default_value = "Training/output")]
        run_root: PathBuf,
        /// Keep every Nth frame
        #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
        interval: u32,
    },
    /// Check every image in an output run for corruption
    Verify {
        /// Output run directory; prompts for one when omitted
        run_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { root, interval } => {
            let sampler = FrameSampler::new(FLAT_IMAGE_EXT);
            walker::walk_flat(&root, interval, &sampler)?;
        }
        Commands::Build { categories_root, background_root, run_root, interval } => {
            let run = CategorizedRun {
                categories_root,
                background_root,
                run_root,
                interval,
            };
            let sampler = FrameSampler::new(RUN_IMAGE_EXT);
            let run_dir = run.execute(&sampler)?;
            println!("✅ Training run written to {}", run_dir.display());
        }
        Commands::Verify { run_dir } => {
            let run_dir = match run_dir {
                Some(dir) => dir,
                None => match ui::interactive::pick_run_dir(Path::new("."))? {
                    Some(dir) => dir,
                    None => return Ok(()),
                },
            };

            let invalid = verifier::verify(&run_dir)?;
            if invalid.is_empty() {
                println!("✅ All images in {} decoded cleanly", run_dir.display());
            } else {
                anyhow::bail!(
                    "{} invalid image(s) found in {}",
                    invalid.len(),
                    run_dir.display()
                );
            }
        }
    }

    Ok(())
}
