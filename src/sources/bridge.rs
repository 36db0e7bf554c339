//! Ontology-bridging source HTTP client
//!
//! Submits a batch of cross-reference IDs in one request and reconstructs
//! ontology URIs for both the queried terms and the mapped terms.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::retry::RetryPolicy;
use super::traits::BridgeSource;
use crate::config::{BridgeConfig, HttpConfig};
use crate::error::{MappingError, Result};
use crate::model::{BridgeMapping, BridgeResult};
use crate::xref::XrefCodec;

const SERVICE: &str = "bridge";

/// Bridging service client
pub struct BridgeClient {
    http: Client,
    base_url: String,
    page_size: usize,
    codec: XrefCodec,
    retry: RetryPolicy,
}

impl BridgeClient {
    pub fn new(config: &BridgeConfig, http: &HttpConfig, codec: XrefCodec) -> Result<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .build()
            .map_err(|e| MappingError::http(SERVICE, e))?;

        Ok(Self {
            http: client,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
            codec,
            retry: RetryPolicy::from_config(http),
        })
    }

    async fn fetch(&self, request: &BridgeRequest<'_>) -> Result<BridgeResponse> {
        let response = self
            .http
            .post(&self.base_url)
            .query(&[("size", self.page_size)])
            .header("Accept", "application/json")
            .json(request)
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

    /// Turn the wire response into results, dropping anything the codec
    /// cannot place in a supported database.
    fn convert(&self, response: BridgeResponse) -> Vec<BridgeResult> {
        let search_results = response
            .embedded
            .map(|e| e.search_results)
            .unwrap_or_default();

        search_results
            .into_iter()
            .filter_map(|item| {
                let Some(uri) = self.codec.curie_to_uri(&item.query_id) else {
                    debug!(query_id = %item.query_id, "Dropping result for unsupported query id");
                    return None;
                };

                let mapping_list = item
                    .mapping_response_list
                    .into_iter()
                    .filter_map(|m| {
                        if m.distance == 0 {
                            warn!(curie = %m.curie, "Dropping bridge mapping with zero distance");
                            return None;
                        }
                        let uri = self.codec.curie_to_uri(&m.curie)?;
                        Some(BridgeMapping::new(
                            m.label.unwrap_or_default(),
                            uri,
                            m.distance,
                            item.query_id.clone(),
                        ))
                    })
                    .collect();

                Some(BridgeResult {
                    query_id: item.query_id,
                    label: item.label.unwrap_or_default(),
                    uri,
                    mapping_list,
                })
            })
            .collect()
    }
}

#[async_trait]
impl BridgeSource for BridgeClient {
    async fn query(
        &self,
        ids: &[String],
        target_dbs: &[String],
        max_distance: u32,
    ) -> Option<Vec<BridgeResult>> {
        if ids.is_empty() {
            return Some(Vec::new());
        }

        let request = BridgeRequest {
            ids,
            input_source: None,
            mapping_target: target_dbs,
            distance: max_distance,
        };
        let request = &request;
        let this = self;

        match this.retry.run(SERVICE, move || this.fetch(request)).await {
            Ok(response) => Some(this.convert(response)),
            Err(e) => {
                warn!(ids = ?ids, error = %e, "Bridge query failed, treating as no results");
                None
            }
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BridgeRequest<'a> {
    ids: &'a [String],
    input_source: Option<&'a str>,
    mapping_target: &'a [String],
    distance: u32,
}

#[derive(Debug, Deserialize)]
struct BridgeResponse {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Embedded {
    #[serde(default)]
    search_results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    query_id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    mapping_response_list: Vec<MappingResponse>,
}

#[derive(Debug, Deserialize)]
struct MappingResponse {
    curie: String,
    #[serde(default)]
    label: Option<String>,
    distance: u32,
}
