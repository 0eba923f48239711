//! Block transformers
//!
//! Line-anchored rewrites for block quotes, lists, and headers.
//! Contiguous runs of same-prefixed lines collapse into a single
//! environment; a blank line or a differently-prefixed line terminates
//! the run. Single-level nesting is the contract; deeper nesting is
//! passed through best-effort.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::core::options::DocumentClass;

lazy_static! {
    static ref BLOCK_QUOTE_RUN: Regex = Regex::new(r"(?m)((?:^>.*\r?\n?)+)").unwrap();
    static ref BLOCK_QUOTE_PREFIX: Regex = Regex::new(r"(?m)^>[ \t]?").unwrap();
    static ref UNORDERED_RUN: Regex = Regex::new(r"(?m)((?:^[-*][ \t]+.+\r?\n?)+)").unwrap();
    static ref UNORDERED_PREFIX: Regex = Regex::new(r"(?m)^[-*][ \t]+").unwrap();
    static ref ORDERED_RUN: Regex = Regex::new(r"(?m)((?:^\d+\.[ \t]+.+\r?\n?)+)").unwrap();
    static ref ORDERED_PREFIX: Regex = Regex::new(r"(?m)^\d+\.[ \t]+").unwrap();
    static ref HEADER: Regex = Regex::new(r"(?m)^(#{1,6})[ \t]+(.+?)[ \t]*$").unwrap();
}

/// Merge consecutive `>`-prefixed lines into one quote environment
pub fn convert_block_quotes(text: &str) -> String {
    BLOCK_QUOTE_RUN
        .replace_all(text, |caps: &Captures| {
            let body = BLOCK_QUOTE_PREFIX.replace_all(&caps[1], "");
            format!("\\begin{{quote}}\n{}\\end{{quote}}\n", ensure_newline(&body))
        })
        .into_owned()
}

/// Convert contiguous `-`/`*` runs into one itemize environment each
pub fn convert_unordered_lists(text: &str) -> String {
    convert_list_runs(text, &UNORDERED_RUN, &UNORDERED_PREFIX, "itemize")
}

/// Convert contiguous `N.` runs into one enumerate environment each
pub fn convert_ordered_lists(text: &str) -> String {
    convert_list_runs(text, &ORDERED_RUN, &ORDERED_PREFIX, "enumerate")
}

fn convert_list_runs(text: &str, run: &Regex, prefix: &Regex, environment: &str) -> String {
    run.replace_all(text, |caps: &Captures| {
        let mut items = String::new();
        for line in caps[1].lines() {
            let content = prefix.replace(line, "");
            items.push_str("\\item ");
            items.push_str(content.trim_end());
            items.push('\n');
        }
        format!(
            "\\begin{{{env}}}\n{items}\\end{{{env}}}\n",
            env = environment,
            items = items
        )
    })
    .into_owned()
}

/// Convert `#`..`######` headers into sectioning commands. The mapping
/// depends on the document class (`article` starts at `\section`,
/// `book`/`report` at `\chapter`); `unnumbered` selects starred
/// variants. Headers must start at the beginning of a line.
pub fn convert_headers(text: &str, unnumbered: bool, class: DocumentClass) -> String {
    let commands = class.section_commands();
    let star = if unnumbered { "*" } else { "" };
    HEADER
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!("\\{}{}{{{}}}", commands[level - 1], star, &caps[2])
        })
        .into_owned()
}

fn ensure_newline(s: &str) -> String {
    if s.ends_with('\n') {
        s.to_string()
    } else {
        format!("{}\n", s)
    }
}
