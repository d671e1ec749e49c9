//! Pipeline – ties together preprocessing, HTML rendering and PDF export
//! for one input file.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::Variables;
use crate::error::{Error, Result};
use crate::export::{ExportOptions, Exporter, PdfRenderer};
use crate::markup::{load_stylesheet, make_html};
use crate::template::preprocess;

/// Input used when none is given on the command line.
pub const DEFAULT_INPUT: &str = "cover_letter.md";

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Markdown template to render.
    pub input: PathBuf,
    /// Stop after writing the HTML file.
    pub no_pdf: bool,
    pub export: ExportOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            no_pdf: false,
            export: ExportOptions::default(),
        }
    }
}

/// `prefix` with `.ext` appended (any dots already in `prefix` are kept).
pub fn with_suffix(prefix: &Path, ext: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Absolute path of `input` without its extension; every output is named
/// after it.
pub fn input_prefix(input: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(input).map_err(|source| Error::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    Ok(absolute.with_extension(""))
}

/// The in-memory result of rendering one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLetter {
    /// Markdown after conditional removal and substitution.
    pub text: String,
    pub title: String,
    pub html: String,
}

/// Template source → processed text → HTML page.
pub fn render_letter(source: &str, vars: &Variables, css: &str) -> RenderedLetter {
    let text = preprocess(source, vars);
    let doc = make_html(&text, css);
    RenderedLetter {
        text,
        title: doc.title,
        html: doc.html,
    }
}

/// Files produced by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub html_path: PathBuf,
    pub pdf_path: Option<PathBuf>,
}

/// Full pipeline: read the template, write `<prefix>.html`, then (unless
/// disabled) print it to PDF.
pub fn run<R: PdfRenderer>(
    config: &PipelineConfig,
    vars: &Variables,
    exporter: &Exporter<R>,
) -> Result<RunOutput> {
    let source = fs::read_to_string(&config.input).map_err(|source| Error::ReadInput {
        path: config.input.clone(),
        source,
    })?;
    let prefix = input_prefix(&config.input)?;

    let css = load_stylesheet(&with_suffix(&prefix, "css"));
    let letter = render_letter(&source, vars, &css);

    let html_path = with_suffix(&prefix, "html");
    fs::write(&html_path, &letter.html).map_err(|source| Error::WriteOutput {
        path: html_path.clone(),
        source,
    })?;
    info!("wrote '{}' ({})", html_path.display(), letter.title);

    let pdf_path = if config.no_pdf {
        None
    } else {
        Some(exporter.export(&letter.html, &prefix, &config.export, vars)?)
    };

    Ok(RunOutput {
        html_path,
        pdf_path,
    })
}
