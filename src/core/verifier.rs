use anyhow::Result;
use std::fmt;
use std::path::Path;

use super::listing::{class_dirs, dir_name, has_extension, sorted_entries};

/// Frame image extensions the integrity pass recognizes.
pub const IMAGE_EXTS: &[&str] = &["png", "jpg"];

/// One image that failed the integrity pass.
#[derive(Debug, Clone)]
pub struct InvalidImage {
    pub class: String,
    pub file_name: String,
    pub reason: String,
}

impl fmt::Display for InvalidImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid image: {}/{} ({})",
            self.class, self.file_name, self.reason
        )
    }
}

/// Read-only integrity pass over a produced run directory: every frame image
/// in every class directory is decoded, and any that fail to decode or have
/// a zero dimension are reported. Nothing is deleted or repaired.
pub fn verify(run_dir: &Path) -> Result<Vec<InvalidImage>> {
    let mut invalid = Vec::new();

    for class_dir in class_dirs(run_dir)? {
        let class = dir_name(&class_dir);
        println!("{}", class);

        for image_path in sorted_entries(&class_dir)? {
            if !image_path.is_file() || !has_extension(&image_path, IMAGE_EXTS) {
                continue;
            }
            if let Some(reason) = check_image(&image_path) {
                let diagnostic = InvalidImage {
                    class: class.clone(),
                    file_name: dir_name(&image_path),
                    reason,
                };
                eprintln!("{}", diagnostic);
                invalid.push(diagnostic);
            }
        }
    }

    Ok(invalid)
}

fn check_image(path: &Path) -> Option<String> {
    match image::open(path) {
        Ok(img) => {
            let (width, height) = (img.width(), img.height());
            if width == 0 || height == 0 {
                Some(format!("zero dimension {}x{}", width, height))
            } else {
                None
            }
        }
        Err(err) => Some(format!("decode failed: {}", err)),
    }
}
