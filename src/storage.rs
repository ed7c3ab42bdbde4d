//! ALFA Media Gate - Picture Storage
//!
//! Target paths for full-size photos in the package pictures directory.
//! Not used by the thumbnail capture path.

use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};

/// Pictures directory name inside the package files directory
pub const PICTURES_DIR: &str = "Pictures";

/// `<base>/Pictures/<subfolder>`, created if missing.
///
/// A failure to create the directory is logged and the path returned anyway.
pub fn pictures_dir(base: &Path, subfolder: &str) -> PathBuf {
    let dir = base.join(PICTURES_DIR).join(subfolder);

    if !dir.exists() {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            log::debug!("failed to create directory {}: {}", dir.display(), e);
        }
    }

    dir
}

/// Target file for a photo inside the pictures directory
pub fn photo_file_path(base: &Path, subfolder: &str, file_name: &str) -> PathBuf {
    pictures_dir(base, subfolder).join(file_name)
}

/// `JPEG_yyyyMMdd_HHmmss.jpg`
pub fn timestamped_photo_name(now: DateTime<Local>) -> String {
    format!("JPEG_{}.jpg", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_pictures_dir_created() {
        let dir = tempdir().unwrap();
        let path = photo_file_path(dir.path(), "Hello Camera", "shot.jpg");

        assert_eq!(path, dir.path().join("Pictures").join("Hello Camera").join("shot.jpg"));
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn test_uncreatable_dir_is_not_fatal() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let path = pictures_dir(&blocker, "sub");
        assert_eq!(path, blocker.join("Pictures").join("sub"));
        assert!(!path.exists());
    }

    #[test]
    fn test_timestamped_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(timestamped_photo_name(now), "JPEG_20240309_070501.jpg");
    }
}
