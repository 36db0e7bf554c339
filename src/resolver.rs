//! Per-trait resolution
//!
//! ```text
//! Pending
//!    │  query annotation source
//!    ▼
//! EvaluatingAnnotation ── HIGH + current + in ontology ──► Finished
//!    │  otherwise, HIGH URIs -> DB:ID
//!    ▼
//! AwaitingBridge ── nothing to bridge from ──────────────► NeedsCuration
//!    │  one batched bridge call
//!    ▼
//! EvaluatingBridge ── distance 1 + current + in ontology ► Finished
//!                  └─ otherwise ─────────────────────────► NeedsCuration
//! ```
//!
//! Lower-confidence annotations never finish a trait and never seed
//! bridging; they are kept for curators. Bridge mappings further than one
//! hop are likewise kept for curation only.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::MappingConfig;
use crate::error::Result;
use crate::model::{AnnotationMapping, BridgeResult, OntologyEntry, ResolutionState, Trait};
use crate::sources::{
    AnnotationClient, AnnotationFilters, AnnotationSource, BridgeClient, BridgeSource,
    OntologyLookupClient,
};
use crate::validator::OntologyValidator;
use crate::xref::XrefCodec;

/// Query parameters that stay fixed for a whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub filters: AnnotationFilters,
    pub target_dbs: Vec<String>,
    pub max_distance: u32,
}

impl From<&MappingConfig> for ResolverSettings {
    fn from(config: &MappingConfig) -> Self {
        Self {
            filters: AnnotationFilters::from(&config.annotation),
            target_dbs: config.bridge.target_dbs.clone(),
            max_distance: config.bridge.max_distance,
        }
    }
}

/// Counts of external calls made by a resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub annotation_calls: usize,
    pub bridge_calls: usize,
    pub ontology_lookups: usize,
}

pub struct TraitResolver {
    annotation: Arc<dyn AnnotationSource>,
    bridge: Arc<dyn BridgeSource>,
    validator: Arc<OntologyValidator>,
    codec: XrefCodec,
    settings: ResolverSettings,
    annotation_calls: AtomicUsize,
    bridge_calls: AtomicUsize,
}

impl TraitResolver {
    pub fn new(
        annotation: Arc<dyn AnnotationSource>,
        bridge: Arc<dyn BridgeSource>,
        validator: Arc<OntologyValidator>,
        codec: XrefCodec,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            annotation,
            bridge,
            validator,
            codec,
            settings,
            annotation_calls: AtomicUsize::new(0),
            bridge_calls: AtomicUsize::new(0),
        }
    }

    /// Wire up the HTTP clients described by `config`
    pub fn from_config(config: &MappingConfig) -> Result<Self> {
        let codec = XrefCodec::standard();
        let annotation = AnnotationClient::new(&config.annotation, &config.http)?;
        let bridge = BridgeClient::new(&config.bridge, &config.http, codec.clone())?;
        let lookup = OntologyLookupClient::new(&config.ontology, &config.http)?;

        info!(
            annotation = %config.annotation.base_url,
            bridge = %config.bridge.base_url,
            ontology = %config.ontology.ontology,
            max_distance = config.bridge.max_distance,
            "Trait resolver configured"
        );

        Ok(Self::new(
            Arc::new(annotation),
            Arc::new(bridge),
            Arc::new(OntologyValidator::new(Arc::new(lookup))),
            codec,
            ResolverSettings::from(config),
        ))
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            annotation_calls: self.annotation_calls.load(Ordering::Relaxed),
            bridge_calls: self.bridge_calls.load(Ordering::Relaxed),
            ontology_lookups: self.validator.lookup_count(),
        }
    }

    /// Resolve a trait to a terminal state
    ///
    /// Fails only on a hard error from the annotation source (an unknown
    /// confidence label). Every other external failure degrades to "no
    /// information" and the trait continues down the pipeline.
    pub async fn resolve(&self, mut trait_: Trait) -> Result<Trait> {
        self.annotation_calls.fetch_add(1, Ordering::Relaxed);
        let candidates = self
            .annotation
            .query(trait_.name(), &self.settings.filters)
            .await?;
        trait_.annotation_candidates = candidates;
        trait_.transition(ResolutionState::EvaluatingAnnotation);

        self.evaluate_annotation(&mut trait_).await;
        if trait_.is_finished() {
            trait_.conclude();
            return Ok(trait_);
        }

        let ids = self.bridge_ids(&trait_);
        if ids.is_empty() {
            debug!(trait_name = %trait_.name(), "Nothing to bridge from");
            trait_.conclude();
            return Ok(trait_);
        }

        trait_.transition(ResolutionState::AwaitingBridge);
        self.bridge_calls.fetch_add(1, Ordering::Relaxed);
        let results = self
            .bridge
            .query(&ids, &self.settings.target_dbs, self.settings.max_distance)
            .await
            .unwrap_or_default();

        trait_.transition(ResolutionState::EvaluatingBridge);
        self.evaluate_bridge(&mut trait_, results).await;

        trait_.conclude();
        Ok(trait_)
    }

    /// Validate every annotation URI; HIGH + current + in-ontology finishes
    async fn evaluate_annotation(&self, trait_: &mut Trait) {
        let mut mappings = Vec::new();
        for result in &trait_.annotation_candidates {
            for uri in &result.uris {
                let status = self.validator.status(uri).await;
                mappings.push(AnnotationMapping::new(result, uri, status));
            }
        }

        for mapping in &mappings {
            if mapping.confidence.is_auto_acceptable() && mapping.status.is_current_and_in_ontology()
            {
                trait_
                    .finished_mappings
                    .insert(OntologyEntry::new(&mapping.uri, mapping.display_label()));
            }
        }
        trait_.annotation_mappings = mappings;
    }

    /// `DB:ID`s of every HIGH-confidence annotation URI the bridge understands
    fn bridge_ids(&self, trait_: &Trait) -> Vec<String> {
        let mut seen_uris = HashSet::new();
        let mut seen_ids = HashSet::new();

        trait_
            .annotation_candidates()
            .iter()
            .filter(|result| result.confidence.is_auto_acceptable())
            .flat_map(|result| result.uris.iter())
            .filter(|uri| seen_uris.insert(uri.as_str()))
            .filter_map(|uri| self.codec.uri_to_xref_id(uri))
            .filter(|id| seen_ids.insert(id.clone()))
            .collect()
    }

    /// Validate bridge mappings; direct, current, in-ontology ones finish
    async fn evaluate_bridge(&self, trait_: &mut Trait, results: Vec<BridgeResult>) {
        let mut validated = Vec::with_capacity(results.len());
        for mut result in results {
            let mut mapping_list = Vec::with_capacity(result.mapping_list.len());
            for mapping in std::mem::take(&mut result.mapping_list) {
                let status = self.validator.status(&mapping.uri).await;
                let mapping = mapping.with_status(status);
                if mapping.is_auto_acceptable() {
                    trait_
                        .finished_mappings
                        .insert(OntologyEntry::new(&mapping.uri, &mapping.ontology_label));
                }
                mapping_list.push(mapping);
            }
            result.mapping_list = mapping_list;
            validated.push(result);
        }
        trait_.bridge_results = validated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationResult, BridgeMapping, BridgeResult, ConfidenceLevel, TermStatus};
    use crate::sources::OntologyLookup;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedAnnotations(Vec<AnnotationResult>);

    #[async_trait]
    impl AnnotationSource for FixedAnnotations {
        async fn query(&self, _: &str, _: &AnnotationFilters) -> Result<Vec<AnnotationResult>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingBridge {
        submitted: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl BridgeSource for RecordingBridge {
        async fn query(&self, ids: &[String], _: &[String], _: u32) -> Option<Vec<BridgeResult>> {
            self.submitted.lock().unwrap().push(ids.to_vec());
            None
        }
    }

    struct AllAbsent;

    #[async_trait]
    impl OntologyLookup for AllAbsent {
        async fn check(&self, _: &str) -> Result<TermStatus> {
            Ok(TermStatus::absent())
        }
    }

    fn resolver(annotations: Vec<AnnotationResult>, bridge: Arc<RecordingBridge>) -> TraitResolver {
        TraitResolver::new(
            Arc::new(FixedAnnotations(annotations)),
            bridge,
            Arc::new(OntologyValidator::new(Arc::new(AllAbsent))),
            XrefCodec::standard(),
            ResolverSettings::from(&MappingConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_bridge_ids_are_deduplicated_and_filtered() {
        let bridge = Arc::new(RecordingBridge::default());
        let resolver = resolver(
            vec![
                AnnotationResult::new(
                    vec![
                        "http://www.orpha.net/ORDO/Orphanet_976".into(),
                        "http://purl.obolibrary.org/obo/GO_0008150".into(),
                    ],
                    "a",
                    ConfidenceLevel::High,
                    "eva-clinvar",
                ),
                AnnotationResult::new(
                    vec!["http://identifiers.org/orphanet/976".into()],
                    "a",
                    ConfidenceLevel::High,
                    "gwas",
                ),
                AnnotationResult::new(
                    vec!["http://www.ebi.ac.uk/efo/EFO_0000400".into()],
                    "a",
                    ConfidenceLevel::Medium,
                    "gwas",
                ),
            ],
            bridge.clone(),
        );

        let resolved = resolver.resolve(Trait::new("a", 1)).await.unwrap();

        assert_eq!(resolved.state(), ResolutionState::NeedsCuration);
        assert_eq!(
            *bridge.submitted.lock().unwrap(),
            vec![vec!["Orphanet:976".to_string()]]
        );
        assert_eq!(resolver.stats().bridge_calls, 1);
        assert_eq!(resolved.annotation_mappings().len(), 4);
    }

    #[tokio::test]
    async fn test_unsupported_only_skips_bridge() {
        let bridge = Arc::new(RecordingBridge::default());
        let resolver = resolver(
            vec![AnnotationResult::new(
                vec!["http://purl.obolibrary.org/obo/GO_0008150".into()],
                "b",
                ConfidenceLevel::High,
                "eva-clinvar",
            )],
            bridge.clone(),
        );

        let resolved = resolver.resolve(Trait::new("b", 1)).await.unwrap();

        assert_eq!(resolved.state(), ResolutionState::NeedsCuration);
        assert!(bridge.submitted.lock().unwrap().is_empty());
        assert_eq!(resolver.stats().bridge_calls, 0);
    }

    #[tokio::test]
    async fn test_failed_bridge_is_empty_result() {
        let bridge = Arc::new(RecordingBridge::default());
        let resolver = resolver(
            vec![AnnotationResult::new(
                vec!["http://www.ebi.ac.uk/efo/EFO_0000400".into()],
                "c",
                ConfidenceLevel::High,
                "eva-clinvar",
            )],
            bridge,
        );

        let resolved = resolver.resolve(Trait::new("c", 1)).await.unwrap();
        assert_eq!(resolved.state(), ResolutionState::NeedsCuration);
        assert!(resolved.bridge_results().is_empty());
    }

    #[test]
    fn test_direct_mapping_acceptance() {
        let direct = BridgeMapping::new("x", "http://www.ebi.ac.uk/efo/EFO_1", 1, "HP:1")
            .with_status(TermStatus::present(true, None));
        assert!(direct.is_auto_acceptable());
    }
}
