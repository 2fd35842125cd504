//! Local file saving for exported sketches.

use super::types::SubmitError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save sketches to.
    pub save_directory: PathBuf,
    /// Fixed filename prefix; a sanitized timestamp is appended.
    pub filename_prefix: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Inkpad"),
            filename_prefix: "sketch".to_string(),
        }
    }
}

/// Generates a filename from the prefix and a capture timestamp.
///
/// Colons and periods in the RFC3339 timestamp are replaced with hyphens
/// for filesystem safety, so the only period in the result introduces the
/// `.png` extension.
pub fn generate_filename(prefix: &str, timestamp: &DateTime<Utc>) -> String {
    let stamp = timestamp
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{prefix}_{stamp}.png")
}

/// Ensures the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, SubmitError> {
    if !directory.exists() {
        log::info!("Creating sketch directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    // Canonicalize to resolve relative paths
    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Saves PNG data to a file under the configured directory.
///
/// # Returns
/// Path to the saved file
pub fn save_sketch(
    image_data: &[u8],
    config: &FileSaveConfig,
    filename: &str,
) -> Result<PathBuf, SubmitError> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let file_path = directory.join(filename);

    log::info!(
        "Saving sketch to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, image_data)?;

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_contains_no_colons_or_stray_periods() {
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 27, 14, 30, 5).unwrap();
        let filename = generate_filename("sketch", &timestamp);

        assert!(filename.starts_with("sketch_2026-08-27"));
        assert!(filename.ends_with(".png"));
        assert!(!filename.contains(':'));
        assert_eq!(filename.matches('.').count(), 1);
    }

    #[test]
    fn save_writes_bytes_under_the_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().to_path_buf(),
            filename_prefix: "sketch".to_string(),
        };

        let path = save_sketch(b"png-bytes", &config, "sketch_test.png").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn missing_directories_are_created() {
        let temp = tempfile::TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let config = FileSaveConfig {
            save_directory: nested.clone(),
            filename_prefix: "sketch".to_string(),
        };

        save_sketch(b"x", &config, "sketch_test.png").unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn default_config_points_at_inkpad() {
        let config = FileSaveConfig::default();
        assert_eq!(config.filename_prefix, "sketch");
        assert!(config.save_directory.to_string_lossy().contains("Inkpad"));
    }
}
