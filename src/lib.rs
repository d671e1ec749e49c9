//! # letter-forge – Template-driven cover letter → HTML → PDF
//!
//! This crate turns a markdown cover letter template into a finished page.
//! The pipeline stages are:
//!
//! 1. **Configure** – read placeholder values from the environment ([`config`])
//! 2. **Preprocess** – drop unset conditional blocks and lines, substitute
//!    placeholders ([`template`])
//! 3. **Render** – markdown → HTML page with title and stylesheet
//!    ([`markup`], [`abbr`])
//! 4. **Export** – print the page to PDF with headless Chrome ([`export`])
//!
//! [`pipeline`] runs all four for one input file.

pub mod abbr;
pub mod config;
pub mod error;
pub mod export;
pub mod markup;
pub mod pipeline;
pub mod template;
pub mod templates;

// Re-exports for convenience
pub use config::Variables;
pub use error::{Error, Result};
pub use export::{ChromeRenderer, ExportOptions, Exporter, OutputNaming, PdfRenderer};
pub use pipeline::{render_letter, run, PipelineConfig};
