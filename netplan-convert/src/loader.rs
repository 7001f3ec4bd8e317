use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::de::{entry_value, scalar_text};
use crate::model::{NamedInterface, NetworkConfig, SUPPORTED_VERSION};

/// Key inside `ethernets`/`wifis` that names the backend, not an interface.
const RENDERER_KEY: &str = "renderer";

/// Errors that can occur while loading a netplan document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input path does not exist.
    #[error("input file '{}' not found", path.display())]
    InputNotFound { path: PathBuf },
    /// Input exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Input is not valid YAML.
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// YAML is valid but not shaped like a netplan document.
    #[error("malformed netplan config: {0}")]
    Malformed(String),
    /// An interface body has fields of the wrong type.
    #[error("invalid configuration for interface {name}: {source}")]
    Interface {
        name: String,
        source: serde_yaml::Error,
    },
    /// `version` is present and is not 2.
    #[error("unsupported netplan version: {0}")]
    Schema(String),
}

/// Fail with [`LoadError::InputNotFound`] unless `path` exists.
pub fn ensure_input_exists(path: &Path) -> Result<(), LoadError> {
    if path.exists() {
        Ok(())
    } else {
        Err(LoadError::InputNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Read and load a netplan file.
pub fn load_file(path: &Path) -> Result<NetworkConfig, LoadError> {
    ensure_input_exists(path)?;
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load(&raw)
}

/// Parse netplan YAML into a [`NetworkConfig`].
///
/// The interface mappings may sit under a top-level `network` key or at the
/// document root. `version` is looked up at the root first and then inside
/// `network`; when absent everywhere it is assumed to be 2.
pub fn load(raw: &str) -> Result<NetworkConfig, LoadError> {
    let document: Value = serde_yaml::from_str(raw)?;
    let Value::Mapping(root) = document else {
        return Err(LoadError::Malformed(
            "document root must be a mapping".to_string(),
        ));
    };

    let empty = Mapping::new();
    let network = match root.get("network") {
        None => &root,
        Some(Value::Null) => &empty,
        Some(Value::Mapping(network)) => network,
        Some(_) => {
            return Err(LoadError::Malformed(
                "`network` must be a mapping".to_string(),
            ))
        }
    };

    if let Some(version) = root.get("version").or_else(|| network.get("version")) {
        check_version(version)?;
    }

    Ok(NetworkConfig {
        ethernets: interfaces(network, "ethernets")?,
        wifis: interfaces(network, "wifis")?,
    })
}

fn check_version(value: &Value) -> Result<(), LoadError> {
    // 2.0 compares equal to 2, a quoted "2" does not.
    if value.as_f64() == Some(SUPPORTED_VERSION as f64) {
        return Ok(());
    }
    let shown = match value {
        Value::String(s) => format!("'{s}'"),
        Value::Null => "null".to_string(),
        other => scalar_text(other).unwrap_or_else(|| "non-scalar value".to_string()),
    };
    Err(LoadError::Schema(shown))
}

fn interfaces(network: &Mapping, section: &str) -> Result<Vec<NamedInterface>, LoadError> {
    let entries = match network.get(section) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Mapping(entries)) => entries,
        Some(_) => {
            return Err(LoadError::Malformed(format!(
                "`{section}` must be a mapping of interface names"
            )))
        }
    };

    let mut out = Vec::with_capacity(entries.len());
    for (key, body) in entries {
        let name = scalar_text(key).ok_or_else(|| {
            LoadError::Malformed(format!("interface names in `{section}` must be scalars"))
        })?;
        if name == RENDERER_KEY {
            continue;
        }
        let spec = entry_value(body.clone()).map_err(|source| LoadError::Interface {
            name: name.clone(),
            source,
        })?;
        out.push(NamedInterface { name, spec });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{load, LoadError};

    fn names(ifaces: &[crate::model::NamedInterface]) -> Vec<&str> {
        ifaces.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn accepts_network_wrapper() {
        let config = load(
            r#"
version: 2
network:
  ethernets:
    eth1: {dhcp4: true}
  wifis:
    wlan0: {}
"#,
        )
        .expect("load");
        assert_eq!(names(&config.ethernets), vec!["eth1"]);
        assert_eq!(names(&config.wifis), vec!["wlan0"]);
    }

    #[test]
    fn accepts_bare_root() {
        let config = load("ethernets:\n  eth0:\n    dhcp4: true\n").expect("load");
        assert_eq!(names(&config.ethernets), vec!["eth0"]);
        assert!(config.ethernets[0].spec.dhcp4);
        assert!(config.wifis.is_empty());
    }

    #[test]
    fn reads_version_nested_under_network() {
        let err = load("network:\n  version: 3\n").expect_err("version 3");
        assert!(matches!(err, LoadError::Schema(ref v) if v == "3"));
    }

    #[test]
    fn rejects_other_versions() {
        assert!(matches!(load("version: 1\n"), Err(LoadError::Schema(_))));
        assert!(matches!(load("version: '2'\n"), Err(LoadError::Schema(_))));
        assert!(matches!(load("version:\n"), Err(LoadError::Schema(_))));
        assert!(load("version: 2.0\n").is_ok());
    }

    #[test]
    fn skips_renderer_and_keeps_file_order() {
        let config = load(
            r#"
network:
  version: 2
  ethernets:
    renderer: networkd
    enp3s0: {}
    eth0:
    enp1s0: {dhcp4: true}
  wifis:
    renderer: networkd
"#,
        )
        .expect("load");
        assert_eq!(names(&config.ethernets), vec!["enp3s0", "eth0", "enp1s0"]);
        assert!(config.wifis.is_empty());
    }

    #[test]
    fn reports_malformed_documents() {
        assert!(matches!(load("version: [2"), Err(LoadError::Parse(_))));
        assert!(matches!(load("- a\n- b\n"), Err(LoadError::Malformed(_))));
        assert!(load("").is_err());
        assert!(matches!(
            load("network: {ethernets: [eth0]}"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn names_the_interface_with_bad_fields() {
        let err = load("ethernets:\n  eth0:\n    mtu: jumbo\n").expect_err("bad mtu");
        match err {
            LoadError::Interface { name, .. } => assert_eq!(name, "eth0"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
