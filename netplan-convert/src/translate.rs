//! Netplan → ifupdown translation.
//!
//! A single pass builds the interfaces file line by line and collects one
//! wpa_supplicant document per wireless interface that lists access points.
//!
//! ## Output order
//!
//! 1. Loopback (`lo`), always first
//! 2. `ethernets` in file order
//! 3. Default DHCP `eth0`, unless `ethernets` declares `eth0`
//! 4. `wifis` in file order
//!
//! ## Per-interface rules
//!
//! Addressing is exclusive: `dhcp4` wins over `addresses`, and neither gives
//! `inet manual`. `gateway4` and `nameservers` are only written for static
//! stanzas. Wireless interfaces with access points get the `wpa-driver` and
//! `wpa-conf` directives. `mtu` and complete routes follow.

use ifupdown_core::{
    parse_host_address, CidrError, InetMethod, InterfacesFile, NetworkBlock, NetworkMode, Psk,
    Stanza, WpaSupplicantConf,
};
use thiserror::Error;

use crate::model::{AccessPoint, InterfaceSpec, NetworkConfig};
use crate::settings::Settings;

/// Interface that is given a DHCP stanza when the config does not mention it.
pub const DEFAULT_ETHERNET: &str = "eth0";

/// Which netplan section an interface came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    Ethernet,
    Wireless,
}

/// Errors raised while translating a loaded config.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("interface {interface}: {source}")]
    InvalidAddress {
        interface: String,
        source: CidrError,
    },
}

/// wpa_supplicant content generated for one wireless interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessDocument {
    pub interface: String,
    pub content: String,
}

/// Result of translating one config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// Every line of the interfaces file, blank separators included.
    pub interface_lines: Vec<String>,
    /// One document per wireless interface with access points, in file order.
    pub wireless: Vec<WirelessDocument>,
    /// Non-fatal notes about input that was ignored.
    pub warnings: Vec<String>,
}

impl Translation {
    /// The interfaces file as text.
    pub fn interfaces_text(&self) -> String {
        self.interface_lines.join("\n")
    }

    /// The wpa_supplicant document generated for `interface`, if any.
    pub fn wireless_document(&self, interface: &str) -> Option<&str> {
        self.wireless
            .iter()
            .find(|doc| doc.interface == interface)
            .map(|doc| doc.content.as_str())
    }
}

/// Translate a whole config.
pub fn translate(config: &NetworkConfig, settings: &Settings) -> Result<Translation, TranslateError> {
    let mut translator = Translator::new(settings);
    translator.push_stanza(Stanza::loopback());

    for iface in &config.ethernets {
        translator.add_interface(&iface.name, &iface.spec, InterfaceKind::Ethernet)?;
    }
    // Only loopback and ethernets have been added at this point.
    if !translator.interfaces.contains(DEFAULT_ETHERNET) {
        translator.push_stanza(Stanza::new(DEFAULT_ETHERNET, InetMethod::Dhcp));
    }
    for iface in &config.wifis {
        translator.add_interface(&iface.name, &iface.spec, InterfaceKind::Wireless)?;
    }

    Ok(translator.finish())
}

/// Accumulates interface stanzas and wireless documents for one run.
pub struct Translator<'a> {
    settings: &'a Settings,
    interfaces: InterfacesFile,
    wireless: Vec<WirelessDocument>,
    warnings: Vec<String>,
}

impl<'a> Translator<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            interfaces: InterfacesFile::new(),
            wireless: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn push_stanza(&mut self, stanza: Stanza) {
        self.interfaces.push(stanza);
    }

    /// Build and record the stanza for one interface.
    pub fn add_interface(
        &mut self,
        name: &str,
        spec: &InterfaceSpec,
        kind: InterfaceKind,
    ) -> Result<(), TranslateError> {
        let stanza = self.interface_stanza(name, spec, kind)?;
        self.push_stanza(stanza);
        Ok(())
    }

    /// Lines of the block for one interface, trailing blank line included.
    ///
    /// For a wireless interface with access points this also registers its
    /// wpa_supplicant document.
    pub fn interface_block(
        &mut self,
        name: &str,
        spec: &InterfaceSpec,
        kind: InterfaceKind,
    ) -> Result<Vec<String>, TranslateError> {
        Ok(self.interface_stanza(name, spec, kind)?.lines())
    }

    fn interface_stanza(
        &mut self,
        name: &str,
        spec: &InterfaceSpec,
        kind: InterfaceKind,
    ) -> Result<Stanza, TranslateError> {
        let method = if spec.dhcp4 {
            InetMethod::Dhcp
        } else if !spec.addresses.is_empty() {
            InetMethod::Static
        } else {
            InetMethod::Manual
        };
        let mut stanza = Stanza::new(name, method);

        if method == InetMethod::Static {
            for raw in &spec.addresses {
                let host = parse_host_address(raw).map_err(|source| {
                    TranslateError::InvalidAddress {
                        interface: name.to_string(),
                        source,
                    }
                })?;
                stanza.push_option("address", host.address);
                if let Some(netmask) = host.netmask {
                    stanza.push_option("netmask", netmask.to_string());
                }
            }
            if let Some(gateway) = &spec.gateway4 {
                stanza.push_option("gateway", gateway.as_str());
            }
            if let Some(nameservers) = &spec.nameservers {
                if !nameservers.addresses.is_empty() {
                    stanza.push_option("dns-nameservers", nameservers.addresses.join(" "));
                }
            }
        }

        if let Some(access_points) = &spec.access_points {
            match kind {
                InterfaceKind::Wireless => {
                    self.wireless.push(WirelessDocument {
                        interface: name.to_string(),
                        content: wireless_credentials(access_points),
                    });
                    stanza.push_option("wpa-driver", self.settings.wpa_driver.as_str());
                    stanza.push_option(
                        "wpa-conf",
                        self.settings.wpa_conf_path(name).display().to_string(),
                    );
                }
                InterfaceKind::Ethernet => self.warnings.push(format!(
                    "ethernet interface {name} lists access-points; they are ignored"
                )),
            }
        }

        if let Some(mtu) = spec.mtu {
            stanza.push_option("mtu", mtu.to_string());
        }

        for (to, via) in spec.routes.iter().filter_map(|route| route.endpoints()) {
            stanza.push_option("up", format!("route add -net {to} gw {via}"));
            stanza.push_option("down", format!("route del -net {to} gw {via}"));
        }

        Ok(stanza)
    }

    pub fn finish(self) -> Translation {
        Translation {
            interface_lines: self.interfaces.lines(),
            wireless: self.wireless,
            warnings: self.warnings,
        }
    }
}

/// Render the wpa_supplicant document for a set of access points.
pub fn wireless_credentials(access_points: &[AccessPoint]) -> String {
    let mut conf = WpaSupplicantConf::new();
    for ap in access_points {
        conf.push(NetworkBlock {
            ssid: ap.ssid.clone(),
            psk: ap.spec.password.as_deref().map(Psk::classify),
            scan_ssid: ap.spec.hidden,
            priority: ap.spec.priority,
            mode: if ap.spec.is_adhoc() {
                NetworkMode::AdHoc
            } else {
                NetworkMode::Infrastructure
            },
            open: ap.spec.is_open(),
        });
    }
    conf.render()
}
