//! Pipeline configuration
//!
//! Loads the mapping configuration from YAML. Every field has a default,
//! so an empty document (or no document at all) yields a working setup
//! pointed at the public annotation, bridging and lookup services.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{MappingError, Result};

/// Root configuration structure for a mapping run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub annotation: AnnotationConfig,
    pub bridge: BridgeConfig,
    pub ontology: OntologyConfig,
    pub http: HttpConfig,
}

/// Primary text-to-ontology annotation source
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub base_url: String,
    /// Curated datasources an annotation must come from
    pub required_sources: Vec<String>,
    /// Datasource precedence when several annotate the same text
    pub preferred_sources: Vec<String>,
    /// Ontologies whose terms may be returned
    pub target_ontologies: Vec<String>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        let sources = vec![
            "eva-clinvar".to_string(),
            "clinvar-xrefs".to_string(),
            "gwas".to_string(),
        ];
        Self {
            base_url: "https://www.ebi.ac.uk/spot/zooma/v2/api/services/annotate".to_string(),
            required_sources: sources.clone(),
            preferred_sources: sources,
            target_ontologies: vec![
                "efo".to_string(),
                "ordo".to_string(),
                "hp".to_string(),
                "mondo".to_string(),
            ],
        }
    }
}

/// Secondary ontology-bridging source
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub base_url: String,
    /// Databases the bridge may map into
    pub target_dbs: Vec<String>,
    /// Maximum number of cross-reference hops
    pub max_distance: u32,
    pub page_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.ebi.ac.uk/spot/oxo/api/search".to_string(),
            target_dbs: vec![
                "Orphanet".to_string(),
                "efo".to_string(),
                "hp".to_string(),
                "mondo".to_string(),
            ],
            max_distance: 3,
            page_size: 5000,
        }
    }
}

/// Authoritative ontology lookup service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    pub base_url: String,
    /// Ontology identifier used in lookup paths (e.g. "efo")
    pub ontology: String,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.ebi.ac.uk/ols/api".to_string(),
            ontology: "efo".to_string(),
        }
    }
}

/// Shared HTTP behaviour for all external calls
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Total attempts per call, including the first
    pub max_attempts: u32,
    /// Fixed pause between attempts; zero means retry immediately
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_attempts: 4,
            retry_delay_ms: 0,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl MappingConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: MappingConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a command-line `--max-distance` override and re-validate
    pub fn with_max_distance(mut self, max_distance: Option<u32>) -> Result<Self> {
        if let Some(distance) = max_distance {
            self.bridge.max_distance = distance;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bridge.max_distance == 0 {
            return Err(MappingError::config("bridge.max_distance must be at least 1"));
        }
        if self.http.max_attempts == 0 {
            return Err(MappingError::config("http.max_attempts must be at least 1"));
        }
        for (name, value) in [
            ("annotation.base_url", &self.annotation.base_url),
            ("bridge.base_url", &self.bridge.base_url),
            ("ontology.base_url", &self.ontology.base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| MappingError::config(format!("{} '{}': {}", name, value, e)))?;
        }
        Ok(())
    }
}
