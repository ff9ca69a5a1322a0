//! Configuration persistence for regionshot settings

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Application settings persisted between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root folder every capture subfolder is created in
    pub master_folder: String,
    /// Last main window placement, `WxH+X+Y`
    pub window_geometry: Option<String>,
    /// Reserved, carried through untouched
    pub window_state: serde_json::Map<String, serde_json::Value>,
}

impl Settings {
    /// Overlay a saved record key by key; keys with the wrong type keep their default
    pub fn merge(&mut self, record: serde_json::Map<String, serde_json::Value>) {
        for (key, value) in record {
            let result = match key.as_str() {
                "master_folder" => merge_key(&mut self.master_folder, value),
                "window_geometry" => merge_key(&mut self.window_geometry, value),
                "window_state" => merge_key(&mut self.window_state, value),
                _ => {
                    log::debug!("Ignoring unknown settings key {key:?}");
                    continue;
                }
            };
            if let Err(err) = result {
                log::warn!("Ignoring settings key {key:?}: {err}");
            }
        }
    }

    /// Parsed window placement, if one was saved and is well formed
    pub fn geometry(&self) -> Option<WindowGeometry> {
        let raw = self.window_geometry.as_deref()?;
        match raw.parse() {
            Ok(geometry) => Some(geometry),
            Err(err) => {
                log::warn!("Ignoring saved window geometry {raw:?}: {err}");
                None
            }
        }
    }
}

fn merge_key<T: serde::de::DeserializeOwned>(
    slot: &mut T,
    value: serde_json::Value,
) -> Result<(), serde_json::Error> {
    *slot = serde_json::from_value(value)?;
    Ok(())
}

/// Reads and writes [`Settings`] at a fixed path
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub const FILE_NAME: &'static str = "screenshot_settings.json";
    pub const PATH_ENV: &'static str = "REGIONSHOT_SETTINGS";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$REGIONSHOT_SETTINGS`, else the platform config dir, else the working dir
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(Self::PATH_ENV) {
            return PathBuf::from(path);
        }
        match dirs::config_dir() {
            Some(dir) => dir.join("regionshot").join(Self::FILE_NAME),
            None => PathBuf::from(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk, or return defaults if unavailable
    pub fn load(&self) -> Settings {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(err) => {
                log::warn!("Error loading settings, using defaults: {err}");
                return Settings::default();
            }
        };
        let record = match serde_json::from_str::<serde_json::Value>(&contents) {
            Ok(serde_json::Value::Object(record)) => record,
            Ok(other) => {
                log::warn!(
                    "Settings in {} are not an object, using defaults: {other}",
                    self.path.display()
                );
                return Settings::default();
            }
            Err(err) => {
                log::warn!(
                    "Malformed settings in {}, using defaults: {err}",
                    self.path.display()
                );
                return Settings::default();
            }
        };
        let mut settings = Settings::default();
        settings.merge(record);
        settings
    }

    /// Save settings to disk, overwriting any previous record
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        settings.serialize(&mut serializer)?;
        std::fs::write(&self.path, buffer)?;
        log::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

/// Window size and position in the `WxH+X+Y` form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected WIDTHxHEIGHT+X+Y, got {0:?}")]
pub struct GeometryParseError(String);

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

impl FromStr for WindowGeometry {
    type Err = GeometryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GeometryParseError(s.to_string());
        let (width, rest) = s.split_once('x').ok_or_else(err)?;
        let offset_start = rest.find(['+', '-']).ok_or_else(err)?;
        let (height, offsets) = rest.split_at(offset_start);
        let (x, y) = split_offsets(offsets).ok_or_else(err)?;
        Ok(Self {
            width: width.trim().parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
            x,
            y,
        })
    }
}

/// Split `+X+Y`, `+-X+Y`, `-X-Y` and friends into two signed offsets
fn split_offsets(offsets: &str) -> Option<(i32, i32)> {
    let (x, y) = split_signed(offsets)?;
    let (y, rest) = split_signed(y)?;
    rest.is_empty().then_some((x, y))
}

fn split_signed(s: &str) -> Option<(i32, &str)> {
    let mut rest = s.strip_prefix('+').unwrap_or(s);
    let negative = rest.starts_with('-');
    if negative {
        rest = &rest[1..];
    }
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits == 0 {
        return None;
    }
    let value: i32 = rest[..digits].parse().ok()?;
    Some((if negative { -value } else { value }, &rest[digits..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("nested").join(SettingsStore::FILE_NAME))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), Settings::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(SettingsStore::new(&path).load(), Settings::default());
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"master_folder": "/tmp/shots", "extra": 1}"#).unwrap();
        let settings = SettingsStore::new(&path).load();
        assert_eq!(settings.master_folder, "/tmp/shots");
        assert_eq!(settings.window_geometry, None);
        assert!(settings.window_state.is_empty());
    }

    #[test]
    fn wrong_typed_key_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"master_folder": "/shots", "window_geometry": 0, "window_state": []}"#,
        )
        .unwrap();
        let settings = SettingsStore::new(&path).load();
        assert_eq!(settings.master_folder, "/shots");
        assert_eq!(settings.window_geometry, None);
        assert!(settings.window_state.is_empty());
    }

    #[test]
    fn non_object_record_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert_eq!(SettingsStore::new(&path).load(), Settings::default());
    }

    #[test]
    fn save_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut settings = Settings {
            master_folder: "/tmp/shots".into(),
            window_geometry: Some("400x500+10+-20".into()),
            ..Default::default()
        };
        settings
            .window_state
            .insert("maximized".into(), serde_json::Value::Bool(false));
        store.save(&settings).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, settings);
        store.save(&loaded).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn saved_file_uses_expected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&Settings::default()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["master_folder"], "");
        assert!(raw["window_geometry"].is_null());
        assert!(raw["window_state"].is_object());
    }

    #[test]
    fn geometry_round_trips() {
        for raw in ["400x500+120+80", "1024x768-1200+30", "800x600+-5+-7"] {
            let geometry: WindowGeometry = raw.parse().unwrap();
            let reparsed: WindowGeometry = geometry.to_string().parse().unwrap();
            assert_eq!(geometry, reparsed, "{raw}");
        }
        let geometry: WindowGeometry = "1024x768-1200+30".parse().unwrap();
        assert_eq!(
            geometry,
            WindowGeometry {
                width: 1024,
                height: 768,
                x: -1200,
                y: 30
            }
        );
        assert_eq!(geometry.to_string(), "1024x768-1200+30");
    }

    #[test]
    fn geometry_rejects_garbage() {
        for raw in ["", "400x500", "axb+1+2", "400x500+1", "400x500+1+2+3"] {
            assert!(raw.parse::<WindowGeometry>().is_err(), "{raw}");
        }
    }

    #[test]
    fn bad_saved_geometry_is_ignored() {
        let settings = Settings {
            window_geometry: Some("huge".into()),
            ..Default::default()
        };
        assert_eq!(settings.geometry(), None);
    }
}
