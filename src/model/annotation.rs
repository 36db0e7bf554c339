//! Annotation source candidates

use std::fmt;
use std::str::FromStr;

use super::ontology::TermStatus;
use crate::error::MappingError;

/// Confidence tier assigned by the annotation source
///
/// The scale is closed: `LOW < MEDIUM < GOOD < HIGH`. Parsing any other label
/// is a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    Good,
    High,
}

impl ConfidenceLevel {
    /// Only the strongest tier may finish a mapping or seed bridging
    pub fn is_auto_acceptable(self) -> bool {
        self == Self::High
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::Good => "GOOD",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "GOOD" => Ok(Self::Good),
            "HIGH" => Ok(Self::High),
            _ => Err(MappingError::UnknownConfidence(s.to_string())),
        }
    }
}

/// One annotation returned for a trait name
///
/// A single annotation may carry several URIs; each is evaluated on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationResult {
    pub uris: Vec<String>,
    /// Text the annotation was recorded against
    pub label: String,
    pub confidence: ConfidenceLevel,
    /// Datasource that contributed the annotation
    pub source: String,
}

impl AnnotationResult {
    pub fn new(
        uris: Vec<String>,
        label: impl Into<String>,
        confidence: ConfidenceLevel,
        source: impl Into<String>,
    ) -> Self {
        Self {
            uris,
            label: label.into(),
            confidence,
            source: source.into(),
        }
    }
}

/// A single URI of an annotation, after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationMapping {
    pub uri: String,
    pub annotation_label: String,
    pub confidence: ConfidenceLevel,
    pub source: String,
    pub status: TermStatus,
}

impl AnnotationMapping {
    pub fn new(result: &AnnotationResult, uri: &str, status: TermStatus) -> Self {
        Self {
            uri: uri.to_string(),
            annotation_label: result.label.clone(),
            confidence: result.confidence,
            source: result.source.clone(),
            status,
        }
    }

    pub fn in_ontology(&self) -> bool {
        self.status.in_ontology
    }

    pub fn is_current(&self) -> bool {
        self.status.is_current
    }

    /// The ontology's own label, falling back to the annotated text
    pub fn display_label(&self) -> &str {
        self.status
            .label
            .as_deref()
            .unwrap_or(&self.annotation_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_order() {
        assert!(ConfidenceLevel::Low < ConfidenceLevel::Medium);
        assert!(ConfidenceLevel::Medium < ConfidenceLevel::Good);
        assert!(ConfidenceLevel::Good < ConfidenceLevel::High);
        assert!(ConfidenceLevel::High.is_auto_acceptable());
        assert!(!ConfidenceLevel::Good.is_auto_acceptable());
    }

    #[test]
    fn test_confidence_parse() {
        assert_eq!("HIGH".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::High);
        assert_eq!("good".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::Good);
        assert_eq!(ConfidenceLevel::Medium.to_string(), "MEDIUM");

        let err = "EXCELLENT".parse::<ConfidenceLevel>().unwrap_err();
        assert!(matches!(err, MappingError::UnknownConfidence(label) if label == "EXCELLENT"));
    }

    #[test]
    fn test_display_label_prefers_ontology() {
        let result = AnnotationResult::new(
            vec!["http://www.orpha.net/ORDO/Orphanet_976".into()],
            "aprt deficiency",
            ConfidenceLevel::High,
            "eva-clinvar",
        );
        let uri = &result.uris[0];

        let validated = AnnotationMapping::new(
            &result,
            uri,
            TermStatus::present(true, Some("Adenine phosphoribosyltransferase deficiency".into())),
        );
        assert_eq!(
            validated.display_label(),
            "Adenine phosphoribosyltransferase deficiency"
        );

        let unknown = AnnotationMapping::new(&result, uri, TermStatus::absent());
        assert_eq!(unknown.display_label(), "aprt deficiency");
    }
}
