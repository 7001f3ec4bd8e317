//! Generic ifupdown and wpa_supplicant text primitives used by higher-level tools.

pub mod cidr;
pub mod interfaces;
pub mod stanza;
pub mod wpa;
pub mod writer;

pub use cidr::{parse_host_address, prefix_to_netmask, CidrError, HostAddress};
pub use interfaces::InterfacesFile;
pub use stanza::{InetMethod, Stanza, OPTION_INDENT};
pub use wpa::{NetworkBlock, NetworkMode, Psk, WpaSupplicantConf};
pub use writer::{ensure_dir, write_file, write_private_file, WriteError, PRIVATE_FILE_MODE};
