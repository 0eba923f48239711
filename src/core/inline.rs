//! Inline transformers
//!
//! Regex-driven rewrites for quotes, footnotes, emphasis, links, and
//! images. Each function is total (text in, text out) and idempotent.
//! All of them assume code regions are already shielded; none of the
//! patterns here can match a shield placeholder.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::core::options::QuoteStyle;

lazy_static! {
    static ref DOUBLE_QUOTED: Regex = Regex::new(r#""([^"\r\n]+?)""#).unwrap();
    static ref FOOTNOTE_DEF: Regex = Regex::new(r"(?m)^\[\^([^\]\s]+)\]:[ \t]*(.+)$").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*\r\n]+)\*\*").unwrap();
    static ref ITALIC_STAR: Regex = Regex::new(r"\*([^*\r\n]+)\*").unwrap();
    static ref ITALIC_UNDERSCORE: Regex = Regex::new(r"\b_([^_\r\n]+)_\b").unwrap();
    static ref HORIZONTAL_RULE: Regex = Regex::new(r"(?m)^(?:-{3,}|\*{3,})[ \t]*$").unwrap();
    static ref BLANK_RUN: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Convert inline `"..."` quotes to the selected glyph pair
pub fn convert_quotes(text: &str, style: QuoteStyle) -> String {
    DOUBLE_QUOTED
        .replace_all(text, |caps: &Captures| match style {
            QuoteStyle::Straight => format!("``{}''", &caps[1]),
            QuoteStyle::French => format!("\\og {}\\fg{{}}", &caps[1]),
        })
        .into_owned()
}

/// Convert `[^id]` footnote references paired with `[^id]: text`
/// definition lines into `\footnote{text}`. Definition lines are
/// removed; references with no matching definition stay literal.
pub fn convert_footnotes(text: &str) -> String {
    let defs: Vec<(String, String)> = FOOTNOTE_DEF
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
        .collect();
    if defs.is_empty() {
        return text.to_string();
    }

    let mut out = FOOTNOTE_DEF.replace_all(text, "").into_owned();
    for (id, note) in &defs {
        let marker = format!("[^{}]", id);
        let footnote = format!("\\footnote{{{}}}", note);
        out = out.replace(&marker, &footnote);
    }
    out
}

/// Generic inline cleanup stage: emphasis, links, images, horizontal
/// rules, and blank-line normalization. Runs after every structural
/// transform and before unshielding.
pub fn convert_simple(text: &str) -> String {
    // Images before links: the link pattern matches the tail of an
    // image reference.
    let out = IMAGE.replace_all(text, |caps: &Captures| {
        format!(
            "\\begin{{figure}}[h]\n\\centering\n\\includegraphics[width=\\linewidth]{{{}}}\n\\caption{{{}}}\n\\end{{figure}}",
            &caps[2], &caps[1]
        )
    });
    let out = LINK.replace_all(&out, "\\href{${2}}{${1}}");
    // Bold before italic: ** would otherwise match as two italics
    let out = BOLD.replace_all(&out, "\\textbf{${1}}");
    let out = ITALIC_STAR.replace_all(&out, "\\textit{${1}}");
    let out = ITALIC_UNDERSCORE.replace_all(&out, "\\textit{${1}}");
    let out = HORIZONTAL_RULE.replace_all(&out, "\\noindent\\rule{\\linewidth}{0.4pt}");
    BLANK_RUN.replace_all(&out, "\n\n").into_owned()
}
