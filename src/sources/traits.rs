//! Source traits and request types
//!
//! The resolver only ever talks to these traits. Implementations own their
//! retry behaviour and degrade to "no information" once retries run out.

use async_trait::async_trait;

use crate::config::AnnotationConfig;
use crate::error::Result;
use crate::model::{AnnotationResult, BridgeResult, TermStatus};

/// Filter applied to every annotation query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationFilters {
    pub required_sources: Vec<String>,
    pub preferred_sources: Vec<String>,
    pub target_ontologies: Vec<String>,
}

impl AnnotationFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_sources(mut self, sources: Vec<String>) -> Self {
        self.required_sources = sources;
        self
    }

    pub fn with_preferred_sources(mut self, sources: Vec<String>) -> Self {
        self.preferred_sources = sources;
        self
    }

    pub fn with_target_ontologies(mut self, ontologies: Vec<String>) -> Self {
        self.target_ontologies = ontologies;
        self
    }

    /// Render as the annotation service's `filter` parameter, e.g.
    /// `required:[eva-clinvar],preferred:[eva-clinvar],ontologies:[efo,hp]`
    pub fn to_query_value(&self) -> String {
        let mut parts = Vec::new();
        if !self.required_sources.is_empty() {
            parts.push(format!("required:[{}]", self.required_sources.join(",")));
        }
        if !self.preferred_sources.is_empty() {
            parts.push(format!("preferred:[{}]", self.preferred_sources.join(",")));
        }
        if !self.target_ontologies.is_empty() {
            parts.push(format!("ontologies:[{}]", self.target_ontologies.join(",")));
        }
        parts.join(",")
    }
}

impl From<&AnnotationConfig> for AnnotationFilters {
    fn from(config: &AnnotationConfig) -> Self {
        Self {
            required_sources: config.required_sources.clone(),
            preferred_sources: config.preferred_sources.clone(),
            target_ontologies: config.target_ontologies.clone(),
        }
    }
}

/// Primary text-to-ontology annotation source
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    /// Ranked candidate annotations for a trait name
    ///
    /// Transport failures are retried and then reported as an empty list.
    /// The only error is an unknown confidence label, which must stop the
    /// batch rather than be silently misranked.
    async fn query(
        &self,
        trait_name: &str,
        filters: &AnnotationFilters,
    ) -> Result<Vec<AnnotationResult>>;
}

/// Secondary cross-reference bridging source
#[async_trait]
pub trait BridgeSource: Send + Sync {
    /// Mapping chains for a batch of `DB:ID` identifiers
    ///
    /// `None` means the call failed after retries; callers treat it exactly
    /// like an empty result set.
    async fn query(
        &self,
        ids: &[String],
        target_dbs: &[String],
        max_distance: u32,
    ) -> Option<Vec<BridgeResult>>;
}

/// Authoritative ontology lookup
#[async_trait]
pub trait OntologyLookup: Send + Sync {
    /// Membership and currency of a URI in the target ontology
    ///
    /// An unknown URI or an unexpected response is `Ok(TermStatus::absent())`.
    /// `Err` is reserved for faults: exhausted retries or a malformed payload.
    async fn check(&self, uri: &str) -> Result<TermStatus>;
}
