//! # mdtex
//!
//! Markdown → LaTeX converter for academic authoring, with an ArXiv
//! submission mode.
//!
//! ## Features
//!
//! - **Code Shielding**: fenced and inline code survives every rewrite
//! - **Inline Rewrites**: quotes, footnotes, emphasis, links, images
//! - **Block Rewrites**: block quotes, lists, headers
//! - **ArXiv Mode**: metadata extraction, booktabs tables, citation and
//!   math normalization, template binding
//! - **Render Backends**: pdflatex, pandoc HTML/DOCX, built-in HTML
//! - **Watch Mode**: auto-reconversion on file change (CLI feature)
//!
//! ## Usage Examples
//!
//! ### Basic Conversion
//!
//! ```rust
//! use mdtex::{convert, ConvertOptions};
//!
//! let output = convert("This is **important**.", &ConvertOptions::default()).unwrap();
//! assert!(output.content.contains(r"\textbf{important}"));
//! ```
//!
//! ### ArXiv Document Conversion
//!
//! ```rust
//! use mdtex::{convert, ConvertOptions};
//!
//! let markdown = "# My Paper\n\n**Authors:** A. One, B. Two\n\n## Abstract\n\nShort summary.\n\nBody text.\n";
//! let options = ConvertOptions {
//!     arxiv_mode: true,
//!     ..Default::default()
//! };
//!
//! let output = convert(markdown, &options).unwrap();
//! assert!(output.content.contains(r"\title{My Paper}"));
//! assert!(output.content.contains(r"\begin{document}"));
//! ```

/// Core conversion modules
pub mod core;

/// Feature modules - academic-paper conversion features
pub mod features;

/// Render backends and packaging
pub mod render;

/// Utility modules
pub mod utils;

/// File watching (feature-gated, CLI only)
#[cfg(feature = "cli")]
pub mod watch;

// Re-export the pipeline entry point and its configuration
pub use core::options::{ConvertOptions, DocumentClass, Metadata, QuoteStyle};
pub use core::pipeline::convert;
pub use core::shield::{shield, unshield, unshield_latex, ShieldTable};

// Re-export feature modules
pub use features::citations;
pub use features::math;
pub use features::metadata;
pub use features::tables;
pub use features::templates;

// Re-export render layer
pub use render::arxiv;
pub use render::backends::{
    html_backends, select_backend, BasicHtmlBackend, PandocDocxBackend, PandocHtmlBackend,
    PdfLatexBackend, RenderBackend,
};

// Re-export utilities
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};
