//! Configuration data structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Surface settings: background fill and device-pixel scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Background fill color: `#rrggbb` hex or a predefined name.
    /// Also the color the erase tool paints with.
    pub background_color: String,

    /// Device-pixel scale factor applied to the backing store.
    pub scale: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            scale: 1.0,
        }
    }
}

/// Brush defaults and width bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Initial brush color: `#rrggbb` hex or a predefined name.
    pub default_color: String,

    /// Initial brush width in logical pixels.
    pub default_width: f64,

    /// Smallest width the size control can select.
    pub min_width: f64,

    /// Largest width the size control can select.
    pub max_width: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_color: "#000000".to_string(),
            default_width: 5.0,
            min_width: 1.0,
            max_width: 50.0,
        }
    }
}

/// Local export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory sketches are saved to.
    pub save_directory: PathBuf,

    /// Fixed filename prefix; a sanitized timestamp is appended.
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Inkpad"),
            filename_prefix: "sketch".to_string(),
        }
    }
}

/// Remote collection endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// HTTP endpoint submissions are POSTed to; `None` disables submission.
    pub endpoint: Option<String>,

    /// Whether an identifier (e.g. an email address) must be present
    /// before a submission is attempted.
    pub require_identifier: bool,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            require_identifier: true,
            timeout_secs: 10,
        }
    }
}
