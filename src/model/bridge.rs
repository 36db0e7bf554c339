//! Ontology-bridging source results

use super::ontology::TermStatus;

/// Mappings discovered for one submitted cross-reference ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeResult {
    /// The `DB:ID` that was submitted
    pub query_id: String,
    pub label: String,
    /// URI of the queried (source) term
    pub uri: String,
    pub mapping_list: Vec<BridgeMapping>,
}

/// A target term reached from a queried term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BridgeMapping {
    pub label: String,
    pub uri: String,
    /// Cross-reference hops from the queried term; 1 is a direct xref
    pub distance: u32,
    pub query_id: String,
    pub in_ontology: bool,
    pub is_current: bool,
    pub ontology_label: String,
}

impl BridgeMapping {
    /// An unvalidated mapping as reported by the bridging source
    pub fn new(
        label: impl Into<String>,
        uri: impl Into<String>,
        distance: u32,
        query_id: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            uri: uri.into(),
            distance,
            query_id: query_id.into(),
            in_ontology: false,
            is_current: false,
            ontology_label: String::new(),
        }
    }

    /// Attach the validator's verdict; the ontology label falls back to the
    /// bridge's own label when the ontology reports none.
    pub fn with_status(self, status: TermStatus) -> Self {
        let ontology_label = status.label.unwrap_or_else(|| self.label.clone());
        Self {
            in_ontology: status.in_ontology,
            is_current: status.is_current,
            ontology_label,
            ..self
        }
    }

    pub fn is_direct(&self) -> bool {
        self.distance == 1
    }

    /// Direct, current, in-ontology mappings finish a trait automatically
    pub fn is_auto_acceptable(&self) -> bool {
        self.is_direct() && self.in_ontology && self.is_current
    }
}
