//! Conversion options
//!
//! One immutable `ConvertOptions` record is constructed per conversion
//! call and read by multiple stages. Nothing here is mutated
//! mid-pipeline, and no state survives between independent calls.

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::utils::error::{ConversionError, ConversionResult};

/// Quote glyph style for inline `"..."` conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// ``...'' (TeX-style curly quotes)
    #[default]
    Straight,
    /// \og ...\fg{} (French guillemets)
    French,
}

/// LaTeX document class, governs the header-to-sectioning mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentClass {
    #[default]
    Article,
    Book,
    Report,
}

impl DocumentClass {
    pub fn latex_name(&self) -> &'static str {
        match self {
            DocumentClass::Article => "article",
            DocumentClass::Book => "book",
            DocumentClass::Report => "report",
        }
    }

    /// Sectioning commands for header levels 1..=6. Classes with
    /// chapters shift the whole mapping down one level.
    pub fn section_commands(&self) -> [&'static str; 6] {
        match self {
            DocumentClass::Article => [
                "section",
                "subsection",
                "subsubsection",
                "paragraph",
                "subparagraph",
                "subparagraph",
            ],
            DocumentClass::Book | DocumentClass::Report => [
                "chapter",
                "section",
                "subsection",
                "subsubsection",
                "paragraph",
                "subparagraph",
            ],
        }
    }
}

impl FromStr for DocumentClass {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(DocumentClass::Article),
            "book" => Ok(DocumentClass::Book),
            "report" => Ok(DocumentClass::Report),
            other => Err(ConversionError::malformed(format!(
                "unknown document class: {}",
                other
            ))),
        }
    }
}

/// Document metadata, usually loaded from a JSON sidecar file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// Date for the title block; absent means `\today`
    #[serde(default)]
    pub date: Option<String>,
}

impl Metadata {
    pub fn from_json_str(json: &str) -> ConversionResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ConversionError::malformed(format!("invalid metadata JSON: {}", e)))
    }
}

/// Options for one conversion call. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub quote_style: QuoteStyle,
    pub document_class: DocumentClass,
    /// Use starred (unnumbered) sectioning variants
    pub unnumbered: bool,
    /// Run the extended academic-paper pipeline
    pub arxiv_mode: bool,
    /// Override for the embedded ArXiv template
    pub template_path: Option<PathBuf>,
    /// BibTeX file shipped alongside the output
    pub bibliography_path: Option<PathBuf>,
    /// Directory of figure files shipped alongside the output
    pub figures_path: Option<PathBuf>,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_commands_shift_by_class() {
        assert_eq!(DocumentClass::Article.section_commands()[0], "section");
        assert_eq!(DocumentClass::Report.section_commands()[0], "chapter");
        assert_eq!(DocumentClass::Book.section_commands()[1], "section");
    }

    #[test]
    fn test_document_class_from_str() {
        assert_eq!(
            "report".parse::<DocumentClass>().unwrap(),
            DocumentClass::Report
        );
        assert!("memoir".parse::<DocumentClass>().is_err());
    }

    #[test]
    fn test_metadata_from_json() {
        let meta = Metadata::from_json_str(r#"{"date": "January 2026"}"#).unwrap();
        assert_eq!(meta.date.as_deref(), Some("January 2026"));

        let empty = Metadata::from_json_str("{}").unwrap();
        assert!(empty.date.is_none());
    }
}
