//! Memoizing ontology validator
//!
//! Wraps an [`OntologyLookup`] with a run-scoped cache keyed by URI. A large
//! batch re-checks the same popular terms thousands of times; each distinct
//! URI is looked up once. Entries are never evicted: ontology content is
//! static for the duration of a batch, so the cache only affects speed.
//!
//! Inconclusive lookups (exhausted retries, malformed payloads) report the
//! term as absent and are not cached, so a later call may still succeed.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::warn;

use crate::model::TermStatus;
use crate::sources::OntologyLookup;

pub struct OntologyValidator {
    lookup: Arc<dyn OntologyLookup>,
    cache: DashMap<String, TermStatus>,
    lookups: AtomicUsize,
}

impl OntologyValidator {
    pub fn new(lookup: Arc<dyn OntologyLookup>) -> Self {
        Self {
            lookup,
            cache: DashMap::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Cached status of `uri`, looking it up on first use
    pub async fn status(&self, uri: &str) -> TermStatus {
        // Copy out before awaiting; a shard guard must not live across the lookup.
        let cached = self.cache.get(uri).map(|entry| entry.value().clone());
        if let Some(status) = cached {
            return status;
        }

        self.lookups.fetch_add(1, Ordering::Relaxed);
        match self.lookup.check(uri).await {
            Ok(status) => {
                self.cache.insert(uri.to_string(), status.clone());
                status
            }
            Err(e) => {
                warn!(uri, error = %e, "Ontology lookup inconclusive, treating term as absent");
                TermStatus::absent()
            }
        }
    }

    pub async fn is_current_and_in_ontology(&self, uri: &str) -> bool {
        self.status(uri).await.is_current_and_in_ontology()
    }

    pub async fn is_in_ontology(&self, uri: &str) -> bool {
        self.status(uri).await.in_ontology
    }

    /// Number of distinct URIs with a cached verdict
    pub fn cached_terms(&self) -> usize {
        self.cache.len()
    }

    /// Number of lookups issued to the underlying service
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MappingError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StubLookup {
        terms: HashMap<String, TermStatus>,
        calls: Mutex<Vec<String>>,
        fail_first: AtomicUsize,
    }

    impl StubLookup {
        fn new(terms: &[(&str, TermStatus)]) -> Self {
            Self {
                terms: terms
                    .iter()
                    .map(|(uri, status)| (uri.to_string(), status.clone()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
                fail_first: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl OntologyLookup for StubLookup {
        async fn check(&self, uri: &str) -> Result<TermStatus> {
            self.calls.lock().unwrap().push(uri.to_string());
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                return Err(MappingError::UnexpectedStatus {
                    service: "stub",
                    status: 503,
                });
            }
            Ok(self.terms.get(uri).cloned().unwrap_or_default())
        }
    }

    const CURRENT: &str = "http://www.ebi.ac.uk/efo/EFO_0000400";
    const OBSOLETE: &str = "http://www.ebi.ac.uk/efo/EFO_0000001";

    fn stub() -> Arc<StubLookup> {
        Arc::new(StubLookup::new(&[
            (CURRENT, TermStatus::present(true, Some("diabetes mellitus".into()))),
            (OBSOLETE, TermStatus::present(false, Some("obsolete".into()))),
        ]))
    }

    #[tokio::test]
    async fn test_one_lookup_per_distinct_uri() {
        let lookup = stub();
        let validator = OntologyValidator::new(lookup.clone());

        for _ in 0..5 {
            assert!(validator.is_current_and_in_ontology(CURRENT).await);
            assert!(validator.is_in_ontology(OBSOLETE).await);
        }

        assert_eq!(lookup.calls.lock().unwrap().len(), 2);
        assert_eq!(validator.cached_terms(), 2);
        assert_eq!(validator.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_obsolete_and_unknown() {
        let validator = OntologyValidator::new(stub());

        assert!(!validator.is_current_and_in_ontology(OBSOLETE).await);
        assert!(validator.is_in_ontology(OBSOLETE).await);
        assert!(!validator.is_in_ontology("http://example.org/unknown").await);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let lookup = stub();
        lookup.fail_first.store(1, Ordering::SeqCst);
        let validator = OntologyValidator::new(lookup.clone());

        assert!(!validator.is_current_and_in_ontology(CURRENT).await);
        assert_eq!(validator.cached_terms(), 0);

        assert!(validator.is_current_and_in_ontology(CURRENT).await);
        assert_eq!(lookup.calls.lock().unwrap().len(), 2);
    }
}
