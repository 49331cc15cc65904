use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of a directory-creation attempt. Callers branch on this
/// explicitly: walkers skip the video, log and continue, or abort the run
/// depending on where the collision happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Creates `path`, distinguishing "already there" from real failures.
/// Anything other than `AlreadyExists` (permissions, missing parent)
/// propagates.
pub fn create(path: &Path) -> Result<CreateOutcome> {
    match fs::create_dir(path) {
        Ok(()) => Ok(CreateOutcome::Created),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(CreateOutcome::AlreadyExists),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to create directory {}", path.display()))
        }
    }
}

/// Run directories are stamped to the minute: `<run_root>-DD.MM.YYYY-HH.MM`.
/// The timestamp is computed once per run and shared, never recomputed per
/// video.
pub fn timestamped_run_dir(run_root: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = run_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    run_root.with_file_name(format!("{}-{}", stem, now.format("%d.%m.%Y-%H.%M")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_create_reports_both_outcomes() {
        let dir = std::env::temp_dir().join("frameset_test_outdir_create");
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(create(&dir).unwrap(), CreateOutcome::Created);
        assert_eq!(create(&dir).unwrap(), CreateOutcome::AlreadyExists);
    }

    #[test]
    fn test_create_propagates_missing_parent() {
        let dir = std::env::temp_dir().join("frameset_test_outdir_missing/child");
        let _ = fs::remove_dir_all(dir.parent().unwrap());

        assert!(create(&dir).is_err());
    }

    #[test]
    fn test_run_dir_timestamp_format() {
        let now = Local.with_ymd_and_hms(2023, 6, 4, 5, 38, 0).unwrap();
        let run_dir = timestamped_run_dir(Path::new("Training/output"), now);
        assert_eq!(run_dir, PathBuf::from("Training/output-04.06.2023-05.38"));
    }
}
