//! External knowledge sources
//!
//! Three services feed trait resolution:
//!
//! - an annotation source mapping free text to ontology URIs with a
//!   confidence tier ([`AnnotationClient`])
//! - a bridging source following cross-references between ontologies
//!   ([`BridgeClient`])
//! - the authoritative ontology lookup service ([`OntologyLookupClient`])
//!
//! Each is reached through a trait so the resolver can run against
//! in-memory fakes. All HTTP calls go through the same bounded
//! [`RetryPolicy`].

pub mod annotation;
pub mod bridge;
pub mod ontology;
pub mod retry;
pub mod traits;

pub use annotation::AnnotationClient;
pub use bridge::BridgeClient;
pub use ontology::OntologyLookupClient;
pub use retry::RetryPolicy;
pub use traits::{AnnotationFilters, AnnotationSource, BridgeSource, OntologyLookup};
