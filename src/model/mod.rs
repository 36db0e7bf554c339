//! Value types shared by every stage of trait resolution
//!
//! Candidate and result types are immutable once built. `OntologyEntry`
//! equality and hashing are defined over `(uri, label)` so that repeated
//! discovery of the same term collapses to one finished mapping.

pub mod annotation;
pub mod bridge;
pub mod clinical_trait;
pub mod ontology;

pub use annotation::{AnnotationMapping, AnnotationResult, ConfidenceLevel};
pub use bridge::{BridgeMapping, BridgeResult};
pub use clinical_trait::{ResolutionState, Trait};
pub use ontology::{OntologyEntry, TermStatus};
