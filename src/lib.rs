//! Trait Mapping - clinical trait names to disease ontology terms
//!
//! Free-text trait names from clinical-variant records are resolved to
//! terms of a controlled disease ontology by cascading through a primary
//! annotation source and a secondary cross-reference bridging source. Each
//! trait either finishes automatically or is routed to manual curation.
//!
//! ## Pipeline
//!
//! ```text
//! TraitFrequencyTable ─► TraitResolver ─► ResultRouter ─► mappings.tsv
//!                           │    │                    └─► curation.tsv
//!             AnnotationSource  BridgeSource
//!                           │    │
//!                   OntologyValidator (memoized lookups)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trait_mapping::{run_batch, MappingConfig, OutputWriters, TraitFrequencyTable, TraitResolver};
//! use std::path::Path;
//!
//! # async fn demo() -> trait_mapping::Result<()> {
//! let config = MappingConfig::from_file("config/trait_mapping.yaml")?;
//! let resolver = TraitResolver::from_config(&config)?;
//! let table = TraitFrequencyTable::from_file("trait_names.txt")?;
//! let mut writers = OutputWriters::create(Path::new("mappings.tsv"), Path::new("curation.tsv"))?;
//! let summary = run_batch(&resolver, &table, &mut writers).await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

pub mod config;
pub mod model;

// Confidence model and cross-reference ID translation
pub mod ranking;
pub mod xref;

// External services and validation
pub mod sources;
pub mod validator;

// Resolution, routing and batch processing
pub mod batch;
pub mod resolver;
pub mod router;
pub mod trait_names;

pub use batch::{run_batch, BatchSummary};
pub use config::MappingConfig;
pub use error::{MappingError, Result};
pub use model::{
    AnnotationMapping, AnnotationResult, BridgeMapping, BridgeResult, ConfidenceLevel,
    OntologyEntry, ResolutionState, TermStatus, Trait,
};
pub use resolver::{ResolverSettings, ResolverStats, TraitResolver};
pub use router::{CurationRow, MappingRow, OutputWriters, ResultRouter, RoutedOutcome};
pub use trait_names::{normalize_trait_name, TraitFrequencyTable};
pub use validator::OntologyValidator;
pub use xref::XrefCodec;
