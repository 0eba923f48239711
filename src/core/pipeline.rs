//! Pipeline orchestrator
//!
//! Composes the shield, inline, block, and feature transforms into the
//! fixed conversion order and exposes the single `convert` operation.
//! The pipeline is a pure function of its input and options: no state
//! survives between calls, and each stage consumes one buffer and
//! produces one buffer.
//!
//! Base order:
//! shield -> quotes -> block quotes -> unordered lists -> ordered lists
//! -> footnotes -> headers -> generic inline cleanup -> unshield.
//!
//! ArXiv order (shield stays outermost so code regions survive every
//! stage): shield -> title/author/abstract extraction -> tables -> math
//! -> citations -> bibliography extraction -> base stages on the
//! remaining body -> template binding -> unshield.

use crate::core::options::ConvertOptions;
use crate::core::{blocks, inline, shield};
use crate::features::templates::ArxivParts;
use crate::features::{citations, math, metadata, tables, templates};
use crate::utils::error::{ConversionOutput, ConversionResult, ConversionWarning};

/// Convert a Markdown document to LaTeX. Returns the output text plus
/// any non-fatal warnings collected along the way.
pub fn convert(text: &str, options: &ConvertOptions) -> ConversionResult<ConversionOutput> {
    let mut warnings = Vec::new();

    let (shielded, table) = shield::shield(text);
    if let Some(line) = shield::unterminated_fence(&shielded) {
        warnings.push(ConversionWarning {
            message: "unterminated code fence left unshielded".to_string(),
            line: Some(line),
            suggestion: Some("close the fence with ```".to_string()),
        });
    }

    let content = if options.arxiv_mode {
        let bound = convert_arxiv(&shielded, options)?;
        shield::unshield_latex(&bound, &table)?
    } else {
        let body = base_stages(&shielded, options);
        shield::unshield_latex(&body, &table)?
    };

    Ok(ConversionOutput::with_warnings(content, warnings))
}

/// The shared transform sequence applied to already-shielded text
fn base_stages(shielded: &str, options: &ConvertOptions) -> String {
    let s = inline::convert_quotes(shielded, options.quote_style);
    let s = blocks::convert_block_quotes(&s);
    let s = blocks::convert_unordered_lists(&s);
    let s = blocks::convert_ordered_lists(&s);
    let s = inline::convert_footnotes(&s);
    let s = blocks::convert_headers(&s, options.unnumbered, options.document_class);
    inline::convert_simple(&s)
}

/// Extended academic-paper pipeline: extraction, academic rewrites,
/// base stages on the remaining body, then template binding. The H1 is
/// consumed by extraction before the header stage can see it.
fn convert_arxiv(shielded: &str, options: &ConvertOptions) -> ConversionResult<String> {
    let (title, rest) = metadata::extract_title(shielded);
    let (authors, rest) = metadata::extract_authors(&rest);
    let (abstract_text, rest) = metadata::extract_abstract(&rest);

    let rest = tables::convert_tables(&rest);
    let rest = math::convert_math(&rest);
    let rest = citations::convert_citations(&rest);
    let (bibliography_body, rest) = citations::extract_bibliography(&rest);

    let body = base_stages(&rest, options);

    // The abstract travels outside the body, so it gets its own inline
    // pass; structural markers are not expected inside it.
    let abstract_block = metadata::format_abstract(
        abstract_text
            .map(|a| inline::convert_simple(&inline::convert_quotes(&a, options.quote_style)))
            .as_deref(),
    );

    let parts = ArxivParts {
        title_block: metadata::format_title_block(
            title.as_deref(),
            authors.as_deref(),
            options.metadata.date.as_deref(),
        ),
        abstract_block,
        body,
        bibliography: match bibliography_body {
            Some(_) => citations::bibliography_directive().to_string(),
            None => String::new(),
        },
    };

    let template = templates::load_template(options.template_path.as_deref())?;
    templates::bind(
        &template,
        &parts,
        options.document_class.latex_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{DocumentClass, QuoteStyle};

    fn opts() -> ConvertOptions {
        ConvertOptions::default()
    }

    #[test]
    fn test_base_conversion() {
        let input = "# Title\n\nSome \"quoted\" text.\n\n- a\n- b\n";
        let out = convert(input, &opts()).unwrap();
        assert!(out.content.contains("\\section{Title}"));
        assert!(out.content.contains("``quoted''"));
        assert!(out.content.contains("\\begin{itemize}"));
        assert!(!out.has_warnings());
    }

    #[test]
    fn test_code_survives_every_stage() {
        let input = "# H\n\n```\n# not a header\n\"not a quote\"\n- not a list\n```\n";
        let out = convert(input, &opts()).unwrap();
        assert!(out.content.contains("# not a header"));
        assert!(out.content.contains("\"not a quote\""));
        assert!(out.content.contains("- not a list"));
        assert!(out.content.contains("\\begin{verbatim}"));
        assert!(!out.content.contains("@@MDTEXCODE"));
    }

    #[test]
    fn test_quote_then_header_order() {
        let input = "\"Quoted\" # Not A Header\n";
        let out = convert(input, &opts()).unwrap();
        assert!(out.content.contains("``Quoted'' # Not A Header"));
        assert!(!out.content.contains("\\section"));
    }

    #[test]
    fn test_unterminated_fence_warns_but_converts() {
        let input = "text\n```rust\nstill open\n";
        let out = convert(input, &opts()).unwrap();
        assert!(out.has_warnings());
        assert!(out.content.contains("still open"));
    }

    #[test]
    fn test_tables_untouched_outside_arxiv_mode() {
        let input = "| A | B |\n|---|---|\n| 1 | 2 |\n";
        let out = convert(input, &opts()).unwrap();
        assert!(out.content.contains("| A | B |"));
        assert!(!out.content.contains("\\begin{tabular}"));
    }

    #[test]
    fn test_arxiv_mode_converts_tables() {
        let mut options = opts();
        options.arxiv_mode = true;
        let input = "# T\n\n| A | B |\n|---|---|\n| 1 | 2 |\n";
        let out = convert(input, &options).unwrap();
        assert!(out.content.contains("\\begin{tabular}{ll}"));
        assert!(out.content.contains("A & B \\\\"));
    }

    #[test]
    fn test_arxiv_h1_not_converted_to_section() {
        let mut options = opts();
        options.arxiv_mode = true;
        let input = "# The Paper Title\n\n## Intro\nBody.\n";
        let out = convert(input, &options).unwrap();
        assert!(out.content.contains("\\title{The Paper Title}"));
        assert!(!out.content.contains("\\section{The Paper Title}"));
        assert!(out.content.contains("\\subsection{Intro}"));
    }

    #[test]
    fn test_arxiv_missing_template_override_fails() {
        let mut options = opts();
        options.arxiv_mode = true;
        options.template_path = Some("/no/such/template.tex".into());
        assert!(convert("# T\n", &options).is_err());
    }

    #[test]
    fn test_french_quotes_option() {
        let mut options = opts();
        options.quote_style = QuoteStyle::French;
        let out = convert("\"mot\"\n", &options).unwrap();
        assert!(out.content.contains("\\og mot\\fg{}"));
    }

    #[test]
    fn test_report_class_headers() {
        let mut options = opts();
        options.document_class = DocumentClass::Report;
        let out = convert("# One\n## Two\n", &options).unwrap();
        assert!(out.content.contains("\\chapter{One}"));
        assert!(out.content.contains("\\section{Two}"));
    }

    #[test]
    fn test_code_inside_extracted_bibliography_is_discarded() {
        let mut options = opts();
        options.arxiv_mode = true;
        let input = "# T\n\nBody.\n\n## References\n\n1. See `numpy.fft` docs.\n";
        let out = convert(input, &options).unwrap();
        assert!(out.content.contains("\\bibliography{references}"));
        assert!(!out.content.contains("numpy.fft"));
        assert!(!out.content.contains("@@MDTEXCODE"));
    }

    #[test]
    fn test_footnote_referenced_twice_with_code() {
        let input = "a[^1] b[^1]\n\n[^1]: see `code`\n";
        let out = convert(input, &opts()).unwrap();
        assert_eq!(
            out.content.matches("\\footnote{see \\texttt{code}}").count(),
            2
        );
    }

    #[test]
    fn test_convert_is_reproducible() {
        let input = "# T\n\ntext with `code` and \"quotes\"\n";
        let a = convert(input, &opts()).unwrap();
        let b = convert(input, &opts()).unwrap();
        assert_eq!(a.content, b.content);
    }
}
