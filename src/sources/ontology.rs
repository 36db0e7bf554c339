//! Ontology lookup HTTP client
//!
//! Asks the lookup service whether a URI is a term of the target ontology
//! and whether that term is still current.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::retry::RetryPolicy;
use super::traits::OntologyLookup;
use crate::config::{HttpConfig, OntologyConfig};
use crate::error::{MappingError, Result};
use crate::model::TermStatus;

const SERVICE: &str = "ontology-lookup";

/// Ontology lookup service client
pub struct OntologyLookupClient {
    http: Client,
    terms_url: String,
    retry: RetryPolicy,
}

impl OntologyLookupClient {
    pub fn new(config: &OntologyConfig, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .build()
            .map_err(|e| MappingError::http(SERVICE, e))?;

        let terms_url = format!(
            "{}/ontologies/{}/terms",
            config.base_url.trim_end_matches('/'),
            config.ontology
        );

        Ok(Self {
            http: client,
            terms_url,
            retry: RetryPolicy::from_config(http),
        })
    }

    async fn fetch(&self, uri: &str) -> Result<TermStatus> {
        let response = self
            .http
            .get(&self.terms_url)
            .query(&[("iri", uri)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MappingError::http(SERVICE, e))?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MappingError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }
        if status != StatusCode::OK {
            return Ok(TermStatus::absent());
        }

        let body = response
            .text()
            .await
            .map_err(|e| MappingError::http(SERVICE, e))?;
        let page: TermsPage =
            serde_json::from_str(&body).map_err(|e| MappingError::payload(SERVICE, e.to_string()))?;

        Ok(page.into_status())
    }
}

#[async_trait]
impl OntologyLookup for OntologyLookupClient {
    async fn check(&self, uri: &str) -> Result<TermStatus> {
        let this = self;
        this.retry.run(SERVICE, move || this.fetch(uri)).await
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct TermsPage {
    #[serde(rename = "_embedded", default)]
    embedded: Option<EmbeddedTerms>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedTerms {
    #[serde(default)]
    terms: Vec<Term>,
}

#[derive(Debug, Deserialize)]
struct Term {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    is_obsolete: bool,
    #[serde(default)]
    is_defining_ontology: bool,
}

impl TermsPage {
    /// Prefer the term as defined by its own ontology over imported copies
    fn into_status(self) -> TermStatus {
        let terms = self.embedded.map(|e| e.terms).unwrap_or_default();
        let defining = terms.iter().position(|t| t.is_defining_ontology).unwrap_or(0);

        match terms.into_iter().nth(defining) {
            Some(term) => TermStatus::present(!term.is_obsolete, term.label),
            None => TermStatus::absent(),
        }
    }
}
