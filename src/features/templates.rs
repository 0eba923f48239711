//! Document template binding
//!
//! The academic-paper pipeline produces four content fragments (title
//! block, abstract, body, bibliography) which are substituted into a
//! document skeleton through named tokens. Binding is all-or-nothing:
//! every token must appear exactly once in a valid template and every
//! token is replaced exactly once.

use std::fs;
use std::path::Path;

use crate::utils::error::{ConversionError, ConversionResult};

pub const BODY_TOKEN: &str = "@@BODYTOKEN@@";
pub const TITLE_BLOCK_TOKEN: &str = "@@TITLEBLOCK@@";
pub const ABSTRACT_TOKEN: &str = "@@ABSTRACT@@";
pub const BIBLIOGRAPHY_TOKEN: &str = "@@BIBLIOGRAPHY@@";
pub const DOCUMENT_CLASS_TOKEN: &str = "@@DOCUMENTCLASSTOKEN@@";

/// The ArXiv template shipped with the crate
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/arxiv.tex");

/// The four generated fragments a template consumes
#[derive(Debug, Clone, Default)]
pub struct ArxivParts {
    pub title_block: String,
    pub abstract_block: String,
    pub body: String,
    pub bibliography: String,
}

/// Load the template text: the embedded default, or the override file.
/// A missing override is fatal and reported with its path.
pub fn load_template(path: Option<&Path>) -> ConversionResult<String> {
    match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|_| ConversionError::missing_resource(p.display().to_string())),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Substitute the four fragments plus the document class into the
/// template. Validates every token count before touching the text, so
/// a failed bind leaves nothing partially written.
pub fn bind(template: &str, parts: &ArxivParts, document_class: &str) -> ConversionResult<String> {
    let substitutions = [
        (BODY_TOKEN, parts.body.as_str()),
        (TITLE_BLOCK_TOKEN, parts.title_block.as_str()),
        (ABSTRACT_TOKEN, parts.abstract_block.as_str()),
        (BIBLIOGRAPHY_TOKEN, parts.bibliography.as_str()),
        (DOCUMENT_CLASS_TOKEN, document_class),
    ];

    for (token, _) in &substitutions {
        match template.matches(token).count() {
            1 => {}
            0 => {
                return Err(ConversionError::template(format!(
                    "token {} missing from template",
                    token
                )))
            }
            n => {
                return Err(ConversionError::template(format!(
                    "token {} appears {} times, expected exactly once",
                    token, n
                )))
            }
        }
    }

    let mut out = template.to_string();
    for (token, value) in &substitutions {
        out = out.replacen(token, value, 1);
    }
    Ok(out)
}
