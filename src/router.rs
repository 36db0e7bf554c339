//! Routing resolved traits to their outputs
//!
//! Finished traits become rows of the mappings file, one per accepted term.
//! Everything else becomes a single curation row listing the ranked
//! candidates a curator should look at.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::model::Trait;
use crate::ranking::{curation_candidates, CurationCandidate};

/// Header of the finished mappings file
pub const MAPPINGS_HEADER: [&str; 3] = ["#clinvar_trait_name", "uri", "label"];

/// Separator between the fields of one curation candidate cell
pub const CANDIDATE_FIELD_SEPARATOR: &str = "|";

/// One accepted trait -> term mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub trait_name: String,
    pub uri: String,
    pub label: String,
}

impl MappingRow {
    pub fn to_record(&self) -> [&str; 3] {
        [
            self.trait_name.as_str(),
            self.uri.as_str(),
            self.label.as_str(),
        ]
    }
}

/// One unresolved trait with its ranked candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationRow {
    pub trait_name: String,
    pub frequency: u32,
    /// `uri|label|confidence_or_distance|source` cells, best first
    pub candidates: Vec<String>,
}

impl CurationRow {
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.candidates.len() + 2);
        record.push(self.trait_name.clone());
        record.push(self.frequency.to_string());
        record.extend(self.candidates.iter().cloned());
        record
    }
}

/// Where a resolved trait goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedOutcome {
    Finished(Vec<MappingRow>),
    NeedsCuration(CurationRow),
}

pub struct ResultRouter;

impl ResultRouter {
    /// Classify a resolved trait and format it for its output
    pub fn route(trait_: &Trait) -> RoutedOutcome {
        if trait_.is_finished() {
            // The finished set iterates in (uri, label) order.
            let rows = trait_
                .finished_mappings()
                .iter()
                .map(|entry| MappingRow {
                    trait_name: trait_.name().to_string(),
                    uri: entry.uri.clone(),
                    label: entry.label.clone(),
                })
                .collect();
            return RoutedOutcome::Finished(rows);
        }

        RoutedOutcome::NeedsCuration(CurationRow {
            trait_name: trait_.name().to_string(),
            frequency: trait_.frequency(),
            candidates: curation_candidates(trait_)
                .iter()
                .map(candidate_cell)
                .collect(),
        })
    }
}

fn candidate_cell(candidate: &CurationCandidate<'_>) -> String {
    let fields = match candidate {
        CurationCandidate::Annotation(m) => [
            m.uri.clone(),
            m.display_label().to_string(),
            m.confidence.to_string(),
            m.source.clone(),
        ],
        CurationCandidate::Bridge(m) => [
            m.uri.clone(),
            m.ontology_label.clone(),
            m.distance.to_string(),
            m.query_id.clone(),
        ],
    };
    fields.join(CANDIDATE_FIELD_SEPARATOR)
}

/// Tab-separated writers for the two output files
pub struct OutputWriters<M: Write, C: Write> {
    mappings: csv::Writer<M>,
    curation: csv::Writer<C>,
}

/// Fields are written verbatim, never quoted. Trait names reach here with
/// whitespace collapsed, so they cannot carry a tab or newline.
fn tsv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .flexible(true)
        .from_writer(inner)
}

impl OutputWriters<File, File> {
    /// Create both output files, writing the mappings header
    pub fn create(mappings_path: &Path, curation_path: &Path) -> Result<Self> {
        for path in [mappings_path, curation_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::new(File::create(mappings_path)?, File::create(curation_path)?)
    }
}

impl<M: Write, C: Write> OutputWriters<M, C> {
    pub fn new(mappings: M, curation: C) -> Result<Self> {
        let mut mappings = tsv_writer(mappings);
        mappings.write_record(MAPPINGS_HEADER)?;
        Ok(Self {
            mappings,
            curation: tsv_writer(curation),
        })
    }

    /// Write an outcome; returns the number of rows written
    pub fn write(&mut self, outcome: &RoutedOutcome) -> Result<usize> {
        match outcome {
            RoutedOutcome::Finished(rows) => {
                for row in rows {
                    self.mappings.write_record(row.to_record())?;
                }
                Ok(rows.len())
            }
            RoutedOutcome::NeedsCuration(row) => {
                self.curation.write_record(row.to_record())?;
                Ok(1)
            }
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.mappings.flush()?;
        self.curation.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writers
    pub fn into_inner(self) -> Result<(M, C)> {
        let mappings = self.mappings.into_inner().map_err(|e| e.into_error())?;
        let curation = self.curation.into_inner().map_err(|e| e.into_error())?;
        Ok((mappings, curation))
    }
}
