//! Confidence model and candidate ranking
//!
//! Annotation candidates rank by `(confidence, in_ontology, is_current)`,
//! highest first. Bridge candidates rank by shortest distance, then
//! `in_ontology`, then `is_current`. Both sorts are stable, so equal keys
//! keep their source-list order and curation output is reproducible.

use std::cmp::{Ordering, Reverse};

use crate::model::{AnnotationMapping, BridgeMapping, ConfidenceLevel, Trait};

/// Sort key for an annotation candidate (compare descending)
pub fn annotation_rank_key(mapping: &AnnotationMapping) -> (ConfidenceLevel, bool, bool) {
    (mapping.confidence, mapping.in_ontology(), mapping.is_current())
}

/// Sort key for a bridge candidate (compare descending)
pub fn bridge_rank_key(mapping: &BridgeMapping) -> (Reverse<u32>, bool, bool) {
    (Reverse(mapping.distance), mapping.in_ontology, mapping.is_current)
}

/// Total order placing the stronger annotation candidate first
pub fn compare_annotation(a: &AnnotationMapping, b: &AnnotationMapping) -> Ordering {
    annotation_rank_key(b).cmp(&annotation_rank_key(a))
}

/// Total order placing the stronger bridge candidate first
pub fn compare_bridge(a: &BridgeMapping, b: &BridgeMapping) -> Ordering {
    bridge_rank_key(b).cmp(&bridge_rank_key(a))
}

/// A candidate shown to curators for an unresolved trait
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurationCandidate<'a> {
    Annotation(&'a AnnotationMapping),
    Bridge(&'a BridgeMapping),
}

/// Every still-unresolved candidate of a trait, best first
///
/// Annotation candidates come before bridge candidates. Terms that are in
/// the ontology but obsolete are left out, as are terms already accepted.
pub fn curation_candidates(trait_: &Trait) -> Vec<CurationCandidate<'_>> {
    let finished = trait_.finished_mappings();
    let accepted = |uri: &str| finished.iter().any(|entry| entry.uri == uri);

    let mut annotations: Vec<&AnnotationMapping> = trait_
        .annotation_mappings()
        .iter()
        .filter(|m| !m.status.is_obsolete_member() && !accepted(&m.uri))
        .collect();
    annotations.sort_by(|a, b| compare_annotation(a, b));

    let mut bridges: Vec<&BridgeMapping> = trait_
        .bridge_results()
        .iter()
        .flat_map(|result| result.mapping_list.iter())
        .filter(|m| !(m.in_ontology && !m.is_current) && !accepted(&m.uri))
        .collect();
    bridges.sort_by(|a, b| compare_bridge(a, b));

    annotations
        .into_iter()
        .map(CurationCandidate::Annotation)
        .chain(bridges.into_iter().map(CurationCandidate::Bridge))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationResult, TermStatus};

    fn annotation(uri: &str, confidence: ConfidenceLevel, status: TermStatus) -> AnnotationMapping {
        let result = AnnotationResult::new(vec![uri.to_string()], "label", confidence, "eva-clinvar");
        AnnotationMapping::new(&result, uri, status)
    }

    fn bridge(uri: &str, distance: u32, in_ontology: bool, is_current: bool) -> BridgeMapping {
        BridgeMapping {
            in_ontology,
            is_current,
            ..BridgeMapping::new("label", uri, distance, "MeSH:D1")
        }
    }

    #[test]
    fn test_annotation_order() {
        let mut list = vec![
            annotation("a", ConfidenceLevel::Good, TermStatus::present(true, None)),
            annotation("b", ConfidenceLevel::High, TermStatus::absent()),
            annotation("c", ConfidenceLevel::High, TermStatus::present(true, None)),
            annotation("d", ConfidenceLevel::Low, TermStatus::present(true, None)),
        ];
        list.sort_by(compare_annotation);
        let uris: Vec<&str> = list.iter().map(|m| m.uri.as_str()).collect();
        assert_eq!(uris, vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_annotation_ties_keep_source_order() {
        let mut list = vec![
            annotation("first", ConfidenceLevel::Medium, TermStatus::absent()),
            annotation("second", ConfidenceLevel::Medium, TermStatus::absent()),
            annotation("third", ConfidenceLevel::Medium, TermStatus::absent()),
        ];
        list.sort_by(compare_annotation);
        let uris: Vec<&str> = list.iter().map(|m| m.uri.as_str()).collect();
        assert_eq!(uris, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_bridge_order() {
        let mut list = vec![
            bridge("far", 3, true, true),
            bridge("near-unknown", 1, false, false),
            bridge("near-valid", 1, true, true),
            bridge("mid", 2, true, true),
        ];
        list.sort_by(compare_bridge);
        let uris: Vec<&str> = list.iter().map(|m| m.uri.as_str()).collect();
        assert_eq!(uris, vec!["near-valid", "near-unknown", "mid", "far"]);
    }
}
