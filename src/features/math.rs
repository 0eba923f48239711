//! Math delimiter normalization
//!
//! Display math delimited by `$$...$$` becomes bracket-delimited
//! `\[...\]`; inline `$...$` math keeps its delimiters, with escaped
//! `\$...\$` pairs normalized back to bare dollars. Dollar signs inside
//! code are safe because code regions are shielded before this runs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISPLAY_MATH: Regex = Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap();
    static ref ESCAPED_INLINE: Regex = Regex::new(r"\\\$([^$\r\n]+?)\\\$").unwrap();
}

/// Normalize math delimiters for LaTeX output
pub fn convert_math(text: &str) -> String {
    let out = DISPLAY_MATH.replace_all(text, r"\[${1}\]");
    ESCAPED_INLINE.replace_all(&out, "$$${1}$$").into_owned()
}
