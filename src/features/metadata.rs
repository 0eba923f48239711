//! Paper metadata extraction
//!
//! Pulls title, authors, and abstract out of the document body for the
//! academic-paper output mode. Each extraction returns the value plus
//! the document with the match removed; no match returns `None` and the
//! text unchanged, so re-running an extraction on an already-stripped
//! document is a no-op.

use std::fmt::Write;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE: Regex = Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap();
    static ref AUTHORS: Regex = Regex::new(r"\*\*Authors?:\*\*[ \t]*([^\r\n]+)").unwrap();
    static ref ABSTRACT_HEADER: Regex = Regex::new(r"(?m)^##[ \t]+Abstract[ \t]*\r?\n").unwrap();
    static ref NEXT_H2: Regex = Regex::new(r"(?m)^##").unwrap();
}

/// Extract the first top-level header as the paper title. Only the
/// first H1 is consumed even if several exist.
pub fn extract_title(text: &str) -> (Option<String>, String) {
    let Some(caps) = TITLE.captures(text) else {
        return (None, text.to_string());
    };
    let m = caps.get(0).expect("whole match always present");
    let title = caps[1].trim().to_string();
    (Some(title), remove_range(text, m.start(), m.end()))
}

/// Extract the bolded `**Authors:**` (or `**Author:**`) line. The label
/// is case-sensitive; the name list is returned verbatim.
pub fn extract_authors(text: &str) -> (Option<String>, String) {
    let Some(caps) = AUTHORS.captures(text) else {
        return (None, text.to_string());
    };
    let m = caps.get(0).expect("whole match always present");
    let authors = caps[1].trim().to_string();
    (Some(authors), remove_range(text, m.start(), m.end()))
}

/// Extract the `## Abstract` section, consuming text until the next
/// level-2 header or end of document.
pub fn extract_abstract(text: &str) -> (Option<String>, String) {
    extract_section(text, &ABSTRACT_HEADER)
}

/// Shared section extraction: header line plus body up to the next
/// level-2 header or EOF. Used by abstract and bibliography extraction.
pub(crate) fn extract_section(text: &str, header: &Regex) -> (Option<String>, String) {
    let Some(m) = header.find(text) else {
        return (None, text.to_string());
    };
    let after = &text[m.end()..];
    let body_end = NEXT_H2.find(after).map(|s| s.start()).unwrap_or(after.len());
    let body = after[..body_end].trim();
    let value = if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    };
    (value, remove_range(text, m.start(), m.end() + body_end))
}

/// Build the LaTeX title block. Multiple comma-separated authors are
/// joined with `\and`; an absent date defaults to `\today`.
pub fn format_title_block(
    title: Option<&str>,
    authors: Option<&str>,
    date: Option<&str>,
) -> String {
    // \maketitle without any \title is a LaTeX error
    if title.is_none() && authors.is_none() {
        return String::new();
    }

    let mut block = String::new();

    match title {
        Some(t) => {
            let _ = writeln!(block, "\\title{{{}}}", t);
        }
        // Authors without a title still need a \title for \maketitle
        None => block.push_str("\\title{}\n"),
    }

    if let Some(a) = authors {
        let names: Vec<&str> = a.split(',').map(str::trim).filter(|n| !n.is_empty()).collect();
        let _ = writeln!(block, "\\author{{{}}}", names.join(" \\and "));
    }

    match date {
        Some(d) if !d.trim().is_empty() => {
            let _ = writeln!(block, "\\date{{{}}}", d);
        }
        _ => block.push_str("\\date{\\today}\n"),
    }

    block.push_str("\n\\maketitle\n");
    block
}

/// Wrap an extracted abstract in the `abstract` environment; empty
/// input yields an empty block.
pub fn format_abstract(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => {
            format!("\\begin{{abstract}}\n{}\n\\end{{abstract}}\n", t.trim())
        }
        _ => String::new(),
    }
}

fn remove_range(text: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(text.len() - (end - start));
    out.push_str(&text[..start]);
    out.push_str(&text[end..]);
    out
}
