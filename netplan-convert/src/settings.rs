use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Where generated files live on the target system and how wireless
/// interfaces are driven.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Path of the ifupdown interfaces file in system mode.
    pub interfaces_path: PathBuf,
    /// Directory holding the per-interface wpa_supplicant files.
    pub wpa_supplicant_dir: PathBuf,
    /// Value of the `wpa-driver` directive.
    pub wpa_driver: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interfaces_path: PathBuf::from("/etc/network/interfaces"),
            wpa_supplicant_dir: PathBuf::from("/etc/wpa_supplicant"),
            wpa_driver: "wext".to_string(),
        }
    }
}

impl Settings {
    /// File name of the wpa_supplicant config for `interface`.
    pub fn wpa_file_name(interface: &str) -> String {
        format!("wpa_supplicant-{interface}.conf")
    }

    /// Absolute path referenced by the `wpa-conf` directive for `interface`.
    pub fn wpa_conf_path(&self, interface: &str) -> PathBuf {
        self.wpa_supplicant_dir.join(Self::wpa_file_name(interface))
    }
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from a TOML file. Keys left out keep their defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_settings(&raw, path.display().to_string())
}

/// Built-in settings shipped with the binary.
pub fn default_settings() -> Settings {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/settings/defaults.toml"
    ));
    parse_settings(embedded, "embedded settings".to_string()).unwrap_or_default()
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{default_settings, load_settings, Settings, SettingsError};

    #[test]
    fn embedded_defaults_match_builtin_defaults() {
        assert_eq!(default_settings(), Settings::default());
    }

    #[test]
    fn wpa_conf_path_uses_interface_name() {
        let settings = Settings::default();
        assert_eq!(
            settings.wpa_conf_path("wlan0"),
            PathBuf::from("/etc/wpa_supplicant/wpa_supplicant-wlan0.conf")
        );
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "wpa_driver = \"nl80211\"\n").expect("write settings");

        let settings = load_settings(&path).expect("load settings");
        assert_eq!(settings.wpa_driver, "nl80211");
        assert_eq!(
            settings.interfaces_path,
            PathBuf::from("/etc/network/interfaces")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "wpa_drvier = \"nl80211\"\n").expect("write settings");

        let err = load_settings(&path).expect_err("typo should fail");
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_settings(&PathBuf::from("/nonexistent/settings.toml"))
            .expect_err("missing file");
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
