//! PDF export through a headless Chrome/Chromium process.
//!
//! The page is handed to the browser as a `data:` URI, so no intermediate
//! HTML file is needed. Each call gets its own throw-away profile directory,
//! removed again before [`Exporter::export`] returns.
//!
//! The process launch itself sits behind [`PdfRenderer`]; [`ChromeRenderer`]
//! is the real implementation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info, warn};

use crate::config::Variables;
use crate::error::{Error, Result};
use crate::pipeline::with_suffix;

/// Executable names probed on `PATH`, in order.
pub const BROWSER_CANDIDATES: [&str; 5] = [
    "chrome",
    "google-chrome",
    "chromium",
    "google-chrome-stable",
    "chromium-browser",
];

/// Prefix of the temporary profile directory.
pub const PROFILE_PREFIX: &str = "cover_letter_";

/// Flags passed ahead of the per-call ones.
pub const BROWSER_FLAGS: [&str; 5] = [
    "--no-sandbox",
    "--headless",
    "--print-to-pdf-no-header",
    "--no-pdf-header-footer",
    "--disable-gpu",
];

/// How the PDF file is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputNaming {
    /// `<input stem>.pdf` next to the input.
    #[default]
    InputStem,
    /// `<NAME>-<APPLYING_COMPANY>-<JOB_TITLE>.pdf` next to the input, falling
    /// back to [`OutputNaming::InputStem`] when any of the three is unset.
    FromFields,
}

/// Export settings, taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Explicit browser executable; skips `PATH` probing.
    pub browser: Option<PathBuf>,
    pub naming: OutputNaming,
    /// Parent for the temporary profile directory (system temp dir if `None`).
    pub profile_root: Option<PathBuf>,
}

/// One fully-specified browser call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserInvocation {
    pub browser: PathBuf,
    pub profile_dir: PathBuf,
    pub pdf_path: PathBuf,
    /// The `data:` URI of the page.
    pub page: String,
}

impl BrowserInvocation {
    /// Command-line arguments, excluding the executable.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = BROWSER_FLAGS.iter().map(OsString::from).collect();

        let mut profile = OsString::from("--user-data-dir=");
        profile.push(&self.profile_dir);
        args.push(profile);

        let mut output = OsString::from("--print-to-pdf=");
        output.push(&self.pdf_path);
        args.push(output);

        args.push(OsString::from(&self.page));
        args
    }
}

/// Something that can turn a [`BrowserInvocation`] into a PDF on disk.
pub trait PdfRenderer {
    fn render(&self, invocation: &BrowserInvocation) -> Result<()>;
}

/// Runs the browser as a blocking child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeRenderer;

impl PdfRenderer for ChromeRenderer {
    fn render(&self, invocation: &BrowserInvocation) -> Result<()> {
        let status = Command::new(&invocation.browser)
            .args(invocation.args())
            .status()
            .map_err(|source| Error::BrowserSpawn {
                browser: invocation.browser.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::BrowserFailed {
                browser: invocation.browser.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Look `name` up on `PATH`.
pub fn probe_path(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Pick the browser: `explicit` if given, else the first candidate `lookup`
/// resolves.
pub fn resolve_browser(
    explicit: Option<&Path>,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| lookup(name))
        .ok_or_else(|| Error::BrowserNotFound {
            candidates: BROWSER_CANDIDATES.iter().map(|s| s.to_string()).collect(),
        })
}

/// `data:text/html;base64,...` for `html`.
pub fn data_uri(html: &str) -> String {
    format!("data:text/html;base64,{}", STANDARD.encode(html.as_bytes()))
}

/// Replace every character outside `[A-Za-z0-9_.-]` (Unicode letters and
/// digits allowed) with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Where the PDF for the input at `prefix` goes.
pub fn pdf_path(prefix: &Path, naming: OutputNaming, vars: &Variables) -> PathBuf {
    if naming == OutputNaming::FromFields {
        let fields = ["NAME", "APPLYING_COMPANY", "JOB_TITLE"].map(|k| vars.get(k).map(str::trim));
        if let [Some(name), Some(company), Some(title)] = fields {
            if !name.is_empty() && !company.is_empty() && !title.is_empty() {
                let file = format!(
                    "{}-{}-{}.pdf",
                    sanitize_filename(name),
                    sanitize_filename(company),
                    sanitize_filename(title)
                );
                return prefix
                    .parent()
                    .map_or_else(|| PathBuf::from(&file), |dir| dir.join(&file));
            }
        }
        warn!("NAME, APPLYING_COMPANY or JOB_TITLE unset; naming PDF after the input file");
    }
    with_suffix(prefix, "pdf")
}

/// Drives one export: browser resolution, profile directory, renderer call.
pub struct Exporter<R> {
    renderer: R,
    lookup: fn(&str) -> Option<PathBuf>,
}

impl<R: PdfRenderer> Exporter<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            lookup: probe_path,
        }
    }

    /// Replace the `PATH` probe.
    pub fn with_lookup(mut self, lookup: fn(&str) -> Option<PathBuf>) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Print `html` to a PDF and return its path.
    ///
    /// Fails before touching the filesystem if no browser can be resolved.
    /// The profile directory is removed on every path out; failures to
    /// remove it are ignored.
    pub fn export(
        &self,
        html: &str,
        prefix: &Path,
        options: &ExportOptions,
        vars: &Variables,
    ) -> Result<PathBuf> {
        let browser = resolve_browser(options.browser.as_deref(), self.lookup)?;
        debug!("using browser '{}'", browser.display());

        let pdf_path = pdf_path(prefix, options.naming, vars);

        let mut builder = tempfile::Builder::new();
        builder.prefix(PROFILE_PREFIX);
        let profile = match &options.profile_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(Error::TempDir)?;

        let invocation = BrowserInvocation {
            browser,
            profile_dir: profile.path().to_path_buf(),
            pdf_path,
            page: data_uri(html),
        };

        let result = self.renderer.render(&invocation);
        let _ = profile.close();
        result?;

        info!("wrote '{}'", invocation.pdf_path.display());
        Ok(invocation.pdf_path)
    }
}
