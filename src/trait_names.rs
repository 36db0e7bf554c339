//! Trait-name frequency table
//!
//! Trait names are extracted from clinical-variant records upstream. This
//! module ingests that extraction as text: one occurrence per line, or
//! `name<TAB>count` when the counting has already been done.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::Trait;

/// Normalize a trait name to its identity form.
///
/// Performs:
/// - Unicode NFKC fold
/// - Lowercase conversion
/// - Whitespace collapsing
///
/// Punctuation is kept: "aprt deficiency, japanese type" is what the
/// annotation source was curated against.
pub fn normalize_trait_name(s: &str) -> String {
    let folded: String = s.nfkc().collect();
    folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct trait names with occurrence counts, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct TraitFrequencyTable {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl TraitFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` occurrences of a trait name
    pub fn add(&mut self, name: &str, count: u32) {
        let name = normalize_trait_name(name);
        if name.is_empty() || count == 0 {
            return;
        }
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = self.entries[i].1.saturating_add(count),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, count));
            }
        }
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut table = Self::new();
        for line in reader.lines() {
            let line = line?;
            let (name, count) = parse_line(&line);
            table.add(name, count);
        }
        Ok(table)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn frequency(&self, name: &str) -> Option<u32> {
        self.index
            .get(&normalize_trait_name(name))
            .map(|&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Fresh, pending traits ready for resolution
    pub fn traits(&self) -> impl Iterator<Item = Trait> + '_ {
        self.iter().map(|(name, count)| Trait::new(name, count))
    }
}

/// A trailing tab-separated positive integer is a pre-computed count
fn parse_line(line: &str) -> (&str, u32) {
    if let Some((name, count)) = line.rsplit_once('\t') {
        if let Ok(count) = count.trim().parse::<u32>() {
            return (name, count);
        }
    }
    (line, 1)
}
