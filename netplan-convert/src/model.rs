//! Typed netplan configuration tree.
//!
//! Only the keys the converter acts on are modelled. Anything else in the
//! YAML (`optional`, `renderer` at network level, `nameservers.search`, ...)
//! is accepted and ignored.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_yaml::Mapping;

use crate::de::{entry_value, flag, nullable, optional_text, scalar_text, text_list};

/// Netplan schema version this converter understands.
pub const SUPPORTED_VERSION: i64 = 2;

/// Access point mode used when none is given.
pub const DEFAULT_AP_MODE: &str = "infrastructure";

/// Root of a loaded configuration. The version has already been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// `ethernets`, in file order, `renderer` removed.
    pub ethernets: Vec<NamedInterface>,
    /// `wifis`, in file order, `renderer` removed.
    pub wifis: Vec<NamedInterface>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedInterface {
    pub name: String,
    pub spec: InterfaceSpec,
}

/// Per-interface settings shared by `ethernets` and `wifis`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InterfaceSpec {
    #[serde(deserialize_with = "flag")]
    pub dhcp4: bool,
    /// Parsed for completeness; ifupdown output has no DHCPv6 stanza.
    #[serde(deserialize_with = "flag")]
    pub dhcp6: bool,
    /// Static addresses, optionally in CIDR notation.
    #[serde(deserialize_with = "text_list")]
    pub addresses: Vec<String>,
    #[serde(deserialize_with = "optional_text")]
    pub gateway4: Option<String>,
    pub nameservers: Option<Nameservers>,
    pub mtu: Option<u32>,
    #[serde(deserialize_with = "nullable")]
    pub routes: Vec<RouteSpec>,
    /// Only meaningful under `wifis`.
    #[serde(deserialize_with = "access_points")]
    pub access_points: Option<Vec<AccessPoint>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Nameservers {
    #[serde(deserialize_with = "text_list")]
    pub addresses: Vec<String>,
}

/// A static route; both ends must be present for it to be emitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteSpec {
    #[serde(deserialize_with = "optional_text")]
    pub to: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub via: Option<String>,
}

impl RouteSpec {
    /// `(to, via)` when the route is complete.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        Some((self.to.as_deref()?, self.via.as_deref()?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessPoint {
    pub ssid: String,
    pub spec: AccessPointSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccessPointSpec {
    #[serde(deserialize_with = "optional_text")]
    pub password: Option<String>,
    #[serde(deserialize_with = "flag")]
    pub hidden: bool,
    pub priority: Option<i64>,
    #[serde(deserialize_with = "optional_text")]
    pub mode: Option<String>,
    pub auth: Option<AuthSetting>,
}

impl AccessPointSpec {
    pub fn mode(&self) -> &str {
        self.mode.as_deref().unwrap_or(DEFAULT_AP_MODE)
    }

    pub fn is_adhoc(&self) -> bool {
        self.mode() == "adhoc"
    }

    pub fn is_open(&self) -> bool {
        matches!(&self.auth, Some(AuthSetting::Method(method)) if method == "open")
    }
}

/// `auth` is either a method name or a netplan auth mapping. Only the
/// `open` method changes the output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AuthSetting {
    Method(String),
    Detailed(Mapping),
}

fn access_points<'de, D>(deserializer: D) -> Result<Option<Vec<AccessPoint>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Mapping>::deserialize(deserializer)? else {
        return Ok(None);
    };

    raw.into_iter()
        .map(|(key, value)| {
            let ssid = scalar_text(&key)
                .ok_or_else(|| D::Error::custom("access point SSIDs must be scalars"))?;
            let spec = entry_value(value)
                .map_err(|err| D::Error::custom(format!("access point {ssid}: {err}")))?;
            Ok(AccessPoint { ssid, spec })
        })
        .collect::<Result<Vec<_>, D::Error>>()
        .map(Some)
}
