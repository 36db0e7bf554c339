//! Ontology terms and their lookup status

/// A term accepted as the mapping for a trait
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OntologyEntry {
    pub uri: String,
    pub label: String,
}

impl OntologyEntry {
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
        }
    }
}

/// What the ontology lookup service knows about a URI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStatus {
    /// The URI names a term of the target ontology
    pub in_ontology: bool,
    /// The term is not obsolete
    pub is_current: bool,
    /// Label as recorded by the ontology
    pub label: Option<String>,
}

impl TermStatus {
    /// The URI is unknown to the ontology (or the lookup was inconclusive)
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn present(is_current: bool, label: Option<String>) -> Self {
        Self {
            in_ontology: true,
            is_current,
            label,
        }
    }

    pub fn is_current_and_in_ontology(&self) -> bool {
        self.in_ontology && self.is_current
    }

    /// Terms that are in the ontology but obsolete can never be accepted
    pub fn is_obsolete_member(&self) -> bool {
        self.in_ontology && !self.is_current
    }
}
