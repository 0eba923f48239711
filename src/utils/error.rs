//! Error handling for mdtex conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations. Core transforms never perform I/O or terminate
//! the process; fatal conditions are surfaced to the caller through
//! `ConversionError`, non-fatal ones through `ConversionWarning`.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone)]
pub enum ConversionError {
    /// A structural marker could not be parsed (e.g. an unterminated
    /// code fence). Non-fatal per region; only raised when a whole
    /// operation cannot proceed.
    MalformedInput {
        message: String,
        line: Option<usize>,
    },
    /// A template or referenced file is absent. Fatal for the operation
    /// that needed it; always carries the resource path.
    MissingResource { path: String },
    /// A shield placeholder survived to the final output
    UnresolvedPlaceholder { placeholder: String },
    /// Template binding failed (missing or duplicated token)
    TemplateError { message: String },
    /// An external render tool failed or is not installed
    RenderError { tool: String, message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::MalformedInput { message, line } => {
                if let Some(l) = line {
                    write!(f, "Malformed input at line {}: {}", l, message)
                } else {
                    write!(f, "Malformed input: {}", message)
                }
            }
            ConversionError::MissingResource { path } => {
                write!(f, "Missing resource: {}", path)
            }
            ConversionError::UnresolvedPlaceholder { placeholder } => {
                write!(f, "Unresolved shield placeholder in output: {}", placeholder)
            }
            ConversionError::TemplateError { message } => {
                write!(f, "Template error: {}", message)
            }
            ConversionError::RenderError { tool, message } => {
                write!(f, "{} failed: {}", tool, message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone)]
pub struct ConversionWarning {
    pub message: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "Warning at line {}: {}", l, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ConversionError::MalformedInput {
            message: message.into(),
            line: None,
        }
    }

    pub fn malformed_at(message: impl Into<String>, line: usize) -> Self {
        ConversionError::MalformedInput {
            message: message.into(),
            line: Some(line),
        }
    }

    pub fn missing_resource(path: impl Into<String>) -> Self {
        ConversionError::MissingResource { path: path.into() }
    }

    pub fn unresolved(placeholder: impl Into<String>) -> Self {
        ConversionError::UnresolvedPlaceholder {
            placeholder: placeholder.into(),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        ConversionError::TemplateError {
            message: message.into(),
        }
    }

    pub fn render(tool: impl Into<String>, message: impl Into<String>) -> Self {
        ConversionError::RenderError {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        ConversionError::IoError {
            message: message.into(),
        }
    }
}
