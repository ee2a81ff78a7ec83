use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Per-frame delay choices offered to the user, in seconds.
pub const DELAY_OPTIONS: [f64; 5] = [0.1, 0.3, 0.5, 1.0, 2.0];

/// Settings persist next to the executable between runs.
pub const SETTINGS_FILE: &str = "settings.json";

/// User preferences persisted across runs. Loaded at startup and written
/// back only after a successful export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub delay: f64,
    pub random_order: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delay: 0.5,
            random_order: false,
        }
    }
}

impl ExportSettings {
    /// Read persisted settings, falling back to defaults when the file is
    /// absent or unreadable. A read failure is logged, never surfaced.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(err) => {
                if path.exists() {
                    log::warn!("could not read settings from {}: {}", path.display(), err);
                }
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, serde_json::Error> {
        let file = fs::File::open(path).map_err(serde_json::Error::io)?;
        serde_json::from_reader(file)
    }

    /// Write the current settings. A write failure is logged, never surfaced;
    /// the export that triggered the save still reports success.
    pub fn save(&self, path: &Path) {
        if let Err(err) = self.try_save(path) {
            log::warn!("could not persist settings to {}: {}", path.display(), err);
        }
    }

    pub fn try_save(&self, path: &Path) -> Result<(), serde_json::Error> {
        let file = fs::File::create(path).map_err(serde_json::Error::io)?;
        serde_json::to_writer(file, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run_behavior() {
        let settings = ExportSettings::default();
        assert_eq!(settings.delay, 0.5);
        assert!(!settings.random_order);
    }

    #[test]
    fn absent_file_yields_defaults() {
        let settings = ExportSettings::load_or_default(Path::new("does-not-exist.json"));
        assert_eq!(settings, ExportSettings::default());
    }

    #[test]
    fn serializes_with_the_persisted_schema() {
        let settings = ExportSettings {
            delay: 1.0,
            random_order: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"delay":1.0,"random_order":true}"#);
    }

    #[test]
    fn deserializes_the_persisted_schema() {
        let settings: ExportSettings =
            serde_json::from_str(r#"{"delay":2.0,"random_order":false}"#).unwrap();
        assert_eq!(settings.delay, 2.0);
        assert!(!settings.random_order);
    }
}
