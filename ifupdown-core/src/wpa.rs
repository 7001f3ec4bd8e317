//! `wpa_supplicant.conf` network blocks.

use crate::stanza::OPTION_INDENT;

/// Length of a raw 256-bit PSK written as hex.
const RAW_PSK_HEX_LEN: usize = 64;

/// Pre-shared key as it is written into a network block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Psk {
    /// Plaintext passphrase, written quoted.
    Passphrase(String),
    /// Pre-hashed key, written unquoted.
    Raw(String),
}

impl Psk {
    /// Classify a secret: exactly 64 hex digits (any case) is a raw key,
    /// anything else is a passphrase.
    ///
    /// A 64 character passphrase made only of hex digits is indistinguishable
    /// from a raw key and is treated as one.
    pub fn classify(secret: &str) -> Self {
        if secret.len() == RAW_PSK_HEX_LEN && secret.bytes().all(|b| b.is_ascii_hexdigit()) {
            Psk::Raw(secret.to_string())
        } else {
            Psk::Passphrase(secret.to_string())
        }
    }

    fn value(&self) -> String {
        match self {
            Psk::Passphrase(secret) => format!("\"{secret}\""),
            Psk::Raw(key) => key.clone(),
        }
    }
}

/// Operating mode of a network block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkMode {
    #[default]
    Infrastructure,
    AdHoc,
}

/// One `network={ ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkBlock {
    pub ssid: String,
    pub psk: Option<Psk>,
    /// Probe for the SSID even when it is not broadcast.
    pub scan_ssid: bool,
    pub priority: Option<i64>,
    pub mode: NetworkMode,
    /// Unauthenticated network (`key_mgmt=NONE`).
    pub open: bool,
}

impl NetworkBlock {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            ..Self::default()
        }
    }

    /// Render the block, closing brace included, followed by a blank line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "network={".to_string(),
            format!("{OPTION_INDENT}ssid=\"{}\"", self.ssid),
        ];
        if let Some(psk) = &self.psk {
            lines.push(format!("{OPTION_INDENT}psk={}", psk.value()));
        }
        if self.scan_ssid {
            lines.push(format!("{OPTION_INDENT}scan_ssid=1"));
        }
        if let Some(priority) = self.priority {
            lines.push(format!("{OPTION_INDENT}priority={priority}"));
        }
        if self.mode == NetworkMode::AdHoc {
            lines.push(format!("{OPTION_INDENT}mode=1"));
        }
        if self.open {
            lines.push(format!("{OPTION_INDENT}key_mgmt=NONE"));
        }
        lines.push("}".to_string());
        lines.push(String::new());
        lines
    }
}

/// A complete per-interface `wpa_supplicant` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WpaSupplicantConf {
    pub networks: Vec<NetworkBlock>,
}

impl WpaSupplicantConf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, network: NetworkBlock) {
        self.networks.push(network);
    }

    /// `update_config=1`, a blank line, then every network block in order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["update_config=1".to_string(), String::new()];
        for network in &self.networks {
            lines.extend(network.lines());
        }
        lines
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}
