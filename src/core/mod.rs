//! Core conversion modules
//!
//! This module contains the transformation pipeline:
//! - `shield`: code-region protection
//! - `inline`: quote, footnote, emphasis, and link rewrites
//! - `blocks`: block quote, list, and header rewrites
//! - `options`: the per-call configuration record
//! - `pipeline`: the fixed-order orchestrator

pub mod blocks;
pub mod inline;
pub mod options;
pub mod pipeline;
pub mod shield;

// Re-export main types and functions
pub use options::{ConvertOptions, DocumentClass, Metadata, QuoteStyle};
pub use pipeline::convert;
pub use shield::{shield, unshield, unshield_latex, ShieldTable};
