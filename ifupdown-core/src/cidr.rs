use std::net::Ipv4Addr;

use thiserror::Error;

/// Errors raised while splitting an address written in CIDR notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// The part after `/` is not a decimal prefix length.
    #[error("invalid prefix length '{prefix}' in address {address}")]
    InvalidPrefix { address: String, prefix: String },
    /// The prefix length does not fit an IPv4 netmask.
    #[error("prefix length {prefix} out of range 0-32 in address {address}")]
    PrefixOutOfRange { address: String, prefix: u32 },
    /// More than one `/` separator.
    #[error("malformed CIDR address {0}")]
    Malformed(String),
}

/// An interface address with the netmask derived from its prefix, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAddress {
    pub address: String,
    pub netmask: Option<Ipv4Addr>,
}

/// Convert a prefix length to a dotted-decimal netmask.
///
/// Returns `None` for prefixes above 32. A zero prefix yields `0.0.0.0`.
pub fn prefix_to_netmask(prefix_len: u8) -> Option<Ipv4Addr> {
    if prefix_len > 32 {
        return None;
    }
    // Shifting a u32 by 32 is an overflow, which is exactly the /0 case.
    let mask = u32::MAX
        .checked_shl(32 - u32::from(prefix_len))
        .unwrap_or(0);
    Some(Ipv4Addr::from(mask))
}

/// Split `addr/prefix` into the address and its netmask.
///
/// An address without `/` is returned bare with no netmask. The address part
/// is passed through untouched; only the prefix is interpreted.
pub fn parse_host_address(raw: &str) -> Result<HostAddress, CidrError> {
    let Some((address, prefix)) = raw.split_once('/') else {
        return Ok(HostAddress {
            address: raw.to_string(),
            netmask: None,
        });
    };
    if prefix.contains('/') {
        return Err(CidrError::Malformed(raw.to_string()));
    }

    let prefix_len: u32 = prefix
        .trim()
        .parse()
        .map_err(|_| CidrError::InvalidPrefix {
            address: raw.to_string(),
            prefix: prefix.to_string(),
        })?;
    let netmask = u8::try_from(prefix_len)
        .ok()
        .and_then(prefix_to_netmask)
        .ok_or_else(|| CidrError::PrefixOutOfRange {
            address: raw.to_string(),
            prefix: prefix_len,
        })?;

    Ok(HostAddress {
        address: address.to_string(),
        netmask: Some(netmask),
    })
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{parse_host_address, prefix_to_netmask, CidrError};

    #[test]
    fn converts_common_prefixes() {
        assert_eq!(prefix_to_netmask(24), Some(Ipv4Addr::new(255, 255, 255, 0)));
        assert_eq!(prefix_to_netmask(16), Some(Ipv4Addr::new(255, 255, 0, 0)));
        assert_eq!(prefix_to_netmask(32), Some(Ipv4Addr::new(255, 255, 255, 255)));
        assert_eq!(prefix_to_netmask(0), Some(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(prefix_to_netmask(33), None);
    }

    #[test]
    fn converts_non_octet_prefixes() {
        assert_eq!(prefix_to_netmask(20), Some(Ipv4Addr::new(255, 255, 240, 0)));
        assert_eq!(prefix_to_netmask(1), Some(Ipv4Addr::new(128, 0, 0, 0)));
        assert_eq!(prefix_to_netmask(30).map(|m| m.to_string()).as_deref(), Some("255.255.255.252"));
    }

    #[test]
    fn splits_cidr_address() {
        let parsed = parse_host_address("192.168.1.10/24").expect("parse");
        assert_eq!(parsed.address, "192.168.1.10");
        assert_eq!(parsed.netmask, Some(Ipv4Addr::new(255, 255, 255, 0)));
    }

    #[test]
    fn bare_address_has_no_netmask() {
        let parsed = parse_host_address("10.0.0.5").expect("parse");
        assert_eq!(parsed.address, "10.0.0.5");
        assert_eq!(parsed.netmask, None);
    }

    #[test]
    fn rejects_bad_prefixes() {
        assert!(matches!(
            parse_host_address("10.0.0.1/abc"),
            Err(CidrError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            parse_host_address("2001:db8::1/64"),
            Err(CidrError::PrefixOutOfRange { prefix: 64, .. })
        ));
        assert!(matches!(
            parse_host_address("10.0.0.1/24/8"),
            Err(CidrError::Malformed(_))
        ));
    }
}
