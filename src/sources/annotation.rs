//! Annotation source HTTP client
//!
//! Queries the text-to-ontology annotation service for a trait name and
//! converts its response into [`AnnotationResult`]s.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::retry::RetryPolicy;
use super::traits::{AnnotationFilters, AnnotationSource};
use crate::config::{AnnotationConfig, HttpConfig};
use crate::error::{MappingError, Result};
use crate::model::{AnnotationResult, ConfidenceLevel};

const SERVICE: &str = "annotation";

/// Annotation service client
pub struct AnnotationClient {
    http: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl AnnotationClient {
    pub fn new(config: &AnnotationConfig, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .build()
            .map_err(|e| MappingError::http(SERVICE, e))?;

        Ok(Self {
            http: client,
            base_url: config.base_url.clone(),
            retry: RetryPolicy::from_config(http),
        })
    }

    async fn fetch(&self, trait_name: &str, filter: &str) -> Result<Vec<AnnotationRecord>> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("propertyValue", trait_name), ("filter", filter)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MappingError::http(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MappingError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MappingError::http(SERVICE, e))?;
        serde_json::from_str(&body).map_err(|e| MappingError::payload(SERVICE, e.to_string()))
    }
}

#[async_trait]
impl AnnotationSource for AnnotationClient {
    async fn query(
        &self,
        trait_name: &str,
        filters: &AnnotationFilters,
    ) -> Result<Vec<AnnotationResult>> {
        let filter = filters.to_query_value();
        let filter = filter.as_str();
        let this = self;

        let records = match this
            .retry
            .run(SERVICE, move || this.fetch(trait_name, filter))
            .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!(trait_name, error = %e, "Annotation query failed, treating as no candidates");
                return Ok(Vec::new());
            }
        };

        debug!(trait_name, count = records.len(), "Annotation candidates received");
        records.into_iter().map(AnnotationResult::try_from).collect()
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotationRecord {
    #[serde(default)]
    semantic_tags: Vec<String>,
    confidence: String,
    #[serde(default)]
    annotated_property: AnnotatedProperty,
    #[serde(default)]
    derived_from: DerivedFrom,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotatedProperty {
    #[serde(default)]
    property_value: String,
}

#[derive(Debug, Default, Deserialize)]
struct DerivedFrom {
    #[serde(default)]
    provenance: Provenance,
}

#[derive(Debug, Default, Deserialize)]
struct Provenance {
    #[serde(default)]
    source: ProvenanceSource,
}

#[derive(Debug, Default, Deserialize)]
struct ProvenanceSource {
    #[serde(default)]
    name: String,
}

impl TryFrom<AnnotationRecord> for AnnotationResult {
    type Error = MappingError;

    fn try_from(record: AnnotationRecord) -> Result<Self> {
        let confidence: ConfidenceLevel = record.confidence.parse()?;
        Ok(AnnotationResult::new(
            record.semantic_tags,
            record.annotated_property.property_value,
            confidence,
            record.derived_from.provenance.source.name,
        ))
    }
}
