//! The unit of resolution: one distinct clinical trait name

use std::collections::BTreeSet;
use std::fmt;

use super::annotation::{AnnotationMapping, AnnotationResult};
use super::bridge::BridgeResult;
use super::ontology::OntologyEntry;

/// Where a trait is in the resolution pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionState {
    Pending,
    EvaluatingAnnotation,
    AwaitingBridge,
    EvaluatingBridge,
    Finished,
    NeedsCuration,
}

impl ResolutionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::NeedsCuration)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::EvaluatingAnnotation => write!(f, "evaluating-annotation"),
            Self::AwaitingBridge => write!(f, "awaiting-bridge"),
            Self::EvaluatingBridge => write!(f, "evaluating-bridge"),
            Self::Finished => write!(f, "finished"),
            Self::NeedsCuration => write!(f, "needs-curation"),
        }
    }
}

/// A distinct trait name together with everything learned while resolving it
///
/// Identity is the normalized lowercase name. Only the resolver mutates a
/// trait; once it reaches a terminal state it is read-only.
#[derive(Debug, Clone)]
pub struct Trait {
    pub(crate) name: String,
    pub(crate) frequency: u32,
    pub(crate) state: ResolutionState,
    pub(crate) annotation_candidates: Vec<AnnotationResult>,
    pub(crate) annotation_mappings: Vec<AnnotationMapping>,
    pub(crate) bridge_results: Vec<BridgeResult>,
    pub(crate) finished_mappings: BTreeSet<OntologyEntry>,
}

impl Trait {
    pub fn new(name: impl Into<String>, frequency: u32) -> Self {
        Self {
            name: name.into(),
            frequency: frequency.max(1),
            state: ResolutionState::Pending,
            annotation_candidates: Vec::new(),
            annotation_mappings: Vec::new(),
            bridge_results: Vec::new(),
            finished_mappings: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    /// Raw annotation results in source order
    pub fn annotation_candidates(&self) -> &[AnnotationResult] {
        &self.annotation_candidates
    }

    /// One validated entry per annotation URI, in source order
    pub fn annotation_mappings(&self) -> &[AnnotationMapping] {
        &self.annotation_mappings
    }

    pub fn bridge_results(&self) -> &[BridgeResult] {
        &self.bridge_results
    }

    pub fn finished_mappings(&self) -> &BTreeSet<OntologyEntry> {
        &self.finished_mappings
    }

    /// A trait is resolved iff it has at least one finished mapping
    pub fn is_finished(&self) -> bool {
        !self.finished_mappings.is_empty()
    }

    pub(crate) fn transition(&mut self, next: ResolutionState) {
        tracing::debug!(trait_name = %self.name, from = %self.state, to = %next, "Trait state change");
        self.state = next;
    }

    /// Enter the terminal state implied by the finished set
    pub(crate) fn conclude(&mut self) {
        let terminal = if self.is_finished() {
            ResolutionState::Finished
        } else {
            ResolutionState::NeedsCuration
        };
        self.transition(terminal);
    }
}

impl PartialEq for Trait {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Trait {}

impl std::hash::Hash for Trait {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
