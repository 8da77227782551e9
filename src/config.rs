//! User configuration
//!
//! Read once at startup from `<config dir>/csv-editor/config.json`, or from
//! the file named by `CSV_EDITOR_CONFIG`. Table data is never stored here.

use crate::data::{Delimiter, DelimiterChoice, ExportOptions, LineEnding, DEFAULT_EXPORT_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "csv-editor";
const CONFIG_ENV: &str = "CSV_EDITOR_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// File name suggested by the save dialog
    pub default_export_name: String,
    /// Delimiter used to read files; `auto` sniffs it
    pub delimiter: DelimiterChoice,
    /// Delimiter written on export; `auto` keeps the one the file was read with
    pub export_delimiter: DelimiterChoice,
    /// Record terminator for exported files
    pub line_ending: LineEnding,
    /// How long info/success notices stay on screen
    pub notice_seconds: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_export_name: DEFAULT_EXPORT_NAME.to_string(),
            delimiter: DelimiterChoice::Auto,
            export_delimiter: DelimiterChoice::Comma,
            line_ending: LineEnding::CrLf,
            notice_seconds: 4.0,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl EditorConfig {
    /// Location of the config file, if one can be determined.
    pub fn path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json")))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.default_export_name.trim().is_empty() {
            self.default_export_name = defaults.default_export_name;
        }
        if !self.notice_seconds.is_finite() || self.notice_seconds <= 0.0 {
            self.notice_seconds = defaults.notice_seconds;
        }
        if self.window_width.is_nan() || self.window_width < 400.0 {
            self.window_width = defaults.window_width;
        }
        if self.window_height.is_nan() || self.window_height < 300.0 {
            self.window_height = defaults.window_height;
        }
        self
    }

    /// Export settings for a file that was read with `source` as delimiter.
    pub fn export_options(&self, source: Delimiter) -> ExportOptions {
        ExportOptions {
            delimiter: self.export_delimiter.fixed().unwrap_or(source),
            line_ending: self.line_ending,
        }
    }

    /// Save dialog file name, with the extension matching the delimiter.
    /// Names with an unrelated extension are left alone.
    pub fn export_file_name(&self, delimiter: Delimiter) -> String {
        let name = Path::new(&self.default_export_name);
        let known = match name.extension().and_then(|ext| ext.to_str()) {
            None => true,
            Some(ext) => ["csv", "tsv", "tab", "psv"].contains(&ext.to_ascii_lowercase().as_str()),
        };
        if !known {
            return self.default_export_name.clone();
        }
        name.with_extension(delimiter.extension())
            .to_string_lossy()
            .into_owned()
    }
}
