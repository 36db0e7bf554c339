//! Batch driver
//!
//! Resolves every trait of a frequency table one at a time and writes each
//! outcome as soon as it is known, so a long run leaves usable partial
//! output behind.

use std::fmt;
use std::io::Write;
use tracing::info;

use crate::error::Result;
use crate::resolver::TraitResolver;
use crate::router::{OutputWriters, ResultRouter, RoutedOutcome};
use crate::trait_names::TraitFrequencyTable;

const PROGRESS_INTERVAL: usize = 100;

/// Outcome counts for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub traits: usize,
    pub finished: usize,
    pub needs_curation: usize,
    pub finished_rows: usize,
    pub annotation_calls: usize,
    pub bridge_calls: usize,
    pub ontology_lookups: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trait Mapping Summary:")?;
        writeln!(f, "  Traits: {}", self.traits)?;
        writeln!(f, "  Finished: {}", self.finished)?;
        writeln!(f, "  Needs curation: {}", self.needs_curation)?;
        writeln!(f, "  Finished mapping rows: {}", self.finished_rows)?;
        writeln!(f, "  Annotation calls: {}", self.annotation_calls)?;
        writeln!(f, "  Bridge calls: {}", self.bridge_calls)?;
        writeln!(f, "  Ontology lookups: {}", self.ontology_lookups)?;
        Ok(())
    }
}

pub async fn run_batch<M: Write, C: Write>(
    resolver: &TraitResolver,
    table: &TraitFrequencyTable,
    writers: &mut OutputWriters<M, C>,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    info!(traits = table.len(), "Starting trait resolution");

    for pending in table.traits() {
        let resolved = resolver.resolve(pending).await?;
        let outcome = ResultRouter::route(&resolved);
        let rows = writers.write(&outcome)?;

        summary.traits += 1;
        match outcome {
            RoutedOutcome::Finished(_) => {
                summary.finished += 1;
                summary.finished_rows += rows;
            }
            RoutedOutcome::NeedsCuration(_) => summary.needs_curation += 1,
        }

        if summary.traits % PROGRESS_INTERVAL == 0 {
            info!(
                processed = summary.traits,
                total = table.len(),
                finished = summary.finished,
                "Resolution progress"
            );
        }
    }
    writers.flush()?;

    let stats = resolver.stats();
    summary.annotation_calls = stats.annotation_calls;
    summary.bridge_calls = stats.bridge_calls;
    summary.ontology_lookups = stats.ontology_lookups;

    info!(
        traits = summary.traits,
        finished = summary.finished,
        needs_curation = summary.needs_curation,
        "Trait resolution complete"
    );
    Ok(summary)
}
