/// Persisted user settings
///
/// Stored as pretty JSON in `relax_settings.json` in the working directory.
/// Missing fields fall back to their defaults so older files keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::gui::theme::AppTheme;
use crate::pipeline::processing::{InputDialect, ProcessOptions};

pub const SETTINGS_FILE: &str = "relax_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub dialect: InputDialect,
    pub row_range: String,
    pub normalize: bool,
    pub theme: AppTheme,
    /// Folder the fitting-service archive was last unpacked into
    pub results_dir: Option<PathBuf>,
    pub last_open_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dialect: InputDialect::Sdf,
            row_range: String::new(),
            normalize: false,
            theme: AppTheme::Light,
            results_dir: None,
            last_open_dir: None,
        }
    }
}

impl AppSettings {
    pub fn default_path() -> PathBuf {
        PathBuf::from(SETTINGS_FILE)
    }

    /// Load settings; never fails. A corrupt file is reported and replaced
    /// by defaults on the next save.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| format!("Serialize error: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Write error: {}", e))?;
        Ok(())
    }

    /// Options for the next run. `source_stem` is filled in per file.
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            dialect: self.dialect,
            row_range: self.row_range.clone(),
            normalize: self.normalize,
            source_stem: None,
        }
    }

    /// One-line summary for the processing log
    pub fn describe(&self) -> String {
        format!(
            "dialect={} range={} normalize={}",
            self.dialect,
            if self.row_range.trim().is_empty() {
                "all"
            } else {
                self.row_range.trim()
            },
            self.normalize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("relax_settings_{}_{}.json", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch_file("missing");
        assert_eq!(AppSettings::load(&path), AppSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_file("roundtrip");
        let settings = AppSettings {
            dialect: InputDialect::FfcIst,
            row_range: "0:349".to_string(),
            normalize: true,
            theme: AppTheme::Dark,
            results_dir: Some(PathBuf::from("/tmp/results")),
            last_open_dir: None,
        };
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path), settings);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_file("partial");
        std::fs::write(&path, r#"{"normalize": true}"#).unwrap();
        let settings = AppSettings::load(&path);
        assert!(settings.normalize);
        assert_eq!(settings.dialect, InputDialect::Sdf);
        assert!(settings.row_range.is_empty());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let path = scratch_file("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(AppSettings::load(&path), AppSettings::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_describe_and_options() {
        let settings = AppSettings {
            row_range: " 2:5 ".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.describe(), "dialect=SDF range=2:5 normalize=false");
        let options = settings.process_options();
        assert_eq!(options.row_range, " 2:5 ");
        assert_eq!(options.dialect, InputDialect::Sdf);
        assert_eq!(AppSettings::default().describe(), "dialect=SDF range=all normalize=false");
    }
}
