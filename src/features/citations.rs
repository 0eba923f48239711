//! Citation and bibliography handling
//!
//! Bracketed numeric references (`[3]`, `[1,2]`, `[1-3]`) and
//! author-year references (`[Smith2023]`, `[Smith2023a]`) become
//! `\cite{...}` commands carrying the bracket contents verbatim as the
//! citation key. No validation against an actual bibliography is
//! performed.
//!
//! An extracted bibliography section is reduced to a single
//! `\bibliography{references}` directive rather than parsed into
//! structured entries; the rendering pipeline resolves entries from the
//! shipped `.bib` file.

use lazy_static::lazy_static;
use regex::Regex;

use crate::features::metadata;

lazy_static! {
    static ref NUMERIC_CITE: Regex = Regex::new(r"\[(\d+(?:[-,]\d+)*)\]").unwrap();
    static ref AUTHOR_YEAR_CITE: Regex = Regex::new(r"\[([A-Za-z]+\d{4}[a-z]?)\]").unwrap();
    static ref BIB_HEADER: Regex =
        Regex::new(r"(?mi)^##?[ \t]+(?:References|Bibliography)[ \t]*\r?\n").unwrap();
}

/// Rewrite bracketed citation markers into `\cite` commands
pub fn convert_citations(text: &str) -> String {
    let out = NUMERIC_CITE.replace_all(text, r"\cite{${1}}");
    AUTHOR_YEAR_CITE.replace_all(&out, r"\cite{${1}}").into_owned()
}

/// Extract the References/Bibliography section (level 1 or 2,
/// case-insensitive), consuming to the next level-2 header or EOF.
/// Returns the raw section body plus the stripped document.
pub fn extract_bibliography(text: &str) -> (Option<String>, String) {
    metadata::extract_section(text, &BIB_HEADER)
}

/// The reference-list directive that replaces an extracted
/// bibliography body
pub fn bibliography_directive() -> &'static str {
    "\\bibliography{references}"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_citations() {
        let result = convert_citations("See [3] and [1,2] and [1-3].");
        assert_eq!(
            result,
            "See \\cite{3} and \\cite{1,2} and \\cite{1-3}."
        );
    }

    #[test]
    fn test_author_year_citations() {
        let result = convert_citations("See [12] and [Smith2023a].");
        assert_eq!(result, "See \\cite{12} and \\cite{Smith2023a}.");
    }

    #[test]
    fn test_non_citation_brackets_untouched() {
        let result = convert_citations("an [aside] stays");
        assert_eq!(result, "an [aside] stays");
    }

    #[test]
    fn test_extract_bibliography_h2() {
        let input = "Body.\n\n## References\n1. A paper.\n2. Another.\n";
        let (bib, rest) = extract_bibliography(input);
        assert_eq!(bib.as_deref(), Some("1. A paper.\n2. Another."));
        assert!(!rest.contains("References"));
        assert!(rest.contains("Body."));
    }

    #[test]
    fn test_extract_bibliography_case_insensitive_h1() {
        let input = "# BIBLIOGRAPHY\nentries here\n";
        let (bib, _) = extract_bibliography(input);
        assert_eq!(bib.as_deref(), Some("entries here"));
    }

    #[test]
    fn test_extract_bibliography_absent() {
        let (bib, rest) = extract_bibliography("no refs here");
        assert_eq!(bib, None);
        assert_eq!(rest, "no refs here");
    }

    #[test]
    fn test_directive_is_fixed() {
        assert_eq!(bibliography_directive(), "\\bibliography{references}");
    }
}
