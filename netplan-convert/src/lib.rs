//! Netplan to `/etc/network/interfaces` conversion.
//!
//! Converts a netplan-style YAML network description into the files used by
//! ifupdown and wpa_supplicant on systems without systemd-networkd.
//!
//! # Architecture
//!
//! - [`loader`] — Parse YAML into the typed [`model`], check the version
//! - [`model`] — Netplan interfaces, addresses, routes and access points
//! - [`translate`] — Build interface stanzas and wpa_supplicant documents
//! - [`emit`] — Dry-run reports, directory output, or system paths
//! - [`settings`] — System paths and wpa driver, overridable from TOML
//! - [`privilege`] — Root check for system-path writes
//!
//! # Examples
//!
//! ```ignore
//! use netplan_convert::loader::load_file;
//! use netplan_convert::settings::default_settings;
//! use netplan_convert::translate::translate;
//!
//! let config = load_file("network-config.yaml".as_ref())?;
//! let translation = translate(&config, &default_settings())?;
//! print!("{}", translation.interfaces_text());
//! ```
//!
//! # Built on ifupdown-core
//!
//! Stanza rendering, netmask arithmetic, wpa_supplicant blocks and file
//! writing live in `ifupdown-core`. All netplan-specific logic is here.

mod de;
pub mod emit;
pub mod loader;
pub mod model;
pub mod privilege;
pub mod settings;
pub mod translate;
