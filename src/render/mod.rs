//! Render backends and packaging
//!
//! External collaborators of the core pipeline: tools that turn final
//! text buffers into PDF/HTML/DOCX files, and the ArXiv submission
//! packager. The core makes no assumption about how rendering succeeds
//! beyond the returned result.

pub mod arxiv;
pub mod backends;

pub use backends::{
    html_backends, select_backend, BasicHtmlBackend, PandocDocxBackend, PandocHtmlBackend,
    PdfLatexBackend, RenderBackend,
};
