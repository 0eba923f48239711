//! Feature modules - academic-paper conversion features
//!
//! Specialized handlers for the ArXiv output mode:
//! - Metadata extraction (title, authors, abstract)
//! - Tables (pipe-delimited Markdown to booktabs)
//! - Math delimiter normalization
//! - Citations and bibliography
//! - Document templates

pub mod citations;
pub mod math;
pub mod metadata;
pub mod tables;
pub mod templates;

// Re-export commonly used types
pub use tables::Table;
pub use templates::ArxivParts;
