use crate::stanza::Stanza;

/// An ordered `/etc/network/interfaces` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfacesFile {
    pub stanzas: Vec<Stanza>,
}

impl InterfacesFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stanza: Stanza) {
        self.stanzas.push(stanza);
    }

    /// Whether a stanza for `name` has already been added.
    pub fn contains(&self, name: &str) -> bool {
        self.stanzas.iter().any(|s| s.name == name)
    }

    /// All stanza lines in order, each stanza followed by its blank line.
    pub fn lines(&self) -> Vec<String> {
        self.stanzas.iter().flat_map(Stanza::lines).collect()
    }

    /// Render the document as newline-joined text.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}
