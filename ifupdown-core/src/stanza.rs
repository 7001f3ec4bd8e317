use std::fmt::{self, Display, Formatter};

/// Indentation used for option lines inside an `iface` stanza.
pub const OPTION_INDENT: &str = "    ";

/// Address configuration method of an `iface <name> inet <method>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InetMethod {
    Loopback,
    Dhcp,
    Static,
    Manual,
}

impl Display for InetMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let method = match self {
            InetMethod::Loopback => "loopback",
            InetMethod::Dhcp => "dhcp",
            InetMethod::Static => "static",
            InetMethod::Manual => "manual",
        };
        f.write_str(method)
    }
}

/// One interface block of an ifupdown `interfaces` file.
///
/// Every stanza is rendered as `auto <name>`, the `iface` line, its indented
/// options in insertion order, and a single trailing blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    pub name: String,
    pub method: InetMethod,
    pub options: Vec<(String, String)>,
}

impl Stanza {
    /// Create a stanza with no options.
    pub fn new(name: impl Into<String>, method: InetMethod) -> Self {
        Self {
            name: name.into(),
            method,
            options: Vec::new(),
        }
    }

    /// The `lo` stanza every interfaces file starts with.
    pub fn loopback() -> Self {
        Self::new("lo", InetMethod::Loopback)
    }

    /// Append an option line. Options are never deduplicated.
    pub fn push_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.push((key.into(), value.into()));
    }

    /// Render the stanza into lines, ending with one blank line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.options.len() + 3);
        lines.push(format!("auto {}", self.name));
        lines.push(format!("iface {} inet {}", self.name, self.method));
        for (key, value) in &self.options {
            lines.push(format!("{OPTION_INDENT}{key} {value}"));
        }
        lines.push(String::new());
        lines
    }
}
