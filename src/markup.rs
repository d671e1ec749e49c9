//! Markdown → HTML document.
//!
//! The processed letter text is rendered with comrak (smart punctuation on,
//! raw HTML passed through), abbreviations are expanded, and the fragment is
//! wrapped in a minimal page shell carrying the title and stylesheet.

use std::fs;
use std::path::Path;

use comrak::{markdown_to_html, Options};
use log::debug;

use crate::abbr::{self, escape_html};
use crate::template::extract_title;

/// comrak options used for every letter.
pub fn markdown_options() -> Options<'static> {
    let mut options = Options::default();
    options.parse.smart = true;
    options.render.r#unsafe = true;
    options
}

/// Render markdown to an HTML fragment, abbreviations included.
pub fn render_fragment(markdown: &str) -> String {
    let (body, defs) = abbr::extract_definitions(markdown);
    let html = markdown_to_html(&body, &markdown_options());
    abbr::expand(&html, &defs)
}

/// Read the stylesheet at `path`; a missing or unreadable file yields an
/// empty stylesheet.
pub fn load_stylesheet(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(css) => css,
        Err(e) => {
            debug!("no stylesheet at '{}': {e}", path.display());
            String::new()
        }
    }
}

/// Wrap a rendered fragment in the page shell.
pub fn wrap_document(title: &str, css: &str, fragment: &str) -> String {
    format!(
        "<html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         {css}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <div id=\"letter\">\n\
         {fragment}\
         </div>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

/// A fully rendered page plus the title it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    pub title: String,
    pub html: String,
}

/// Processed markdown + stylesheet → complete HTML page.
pub fn make_html(markdown: &str, css: &str) -> HtmlDocument {
    let title = extract_title(markdown);
    let fragment = render_fragment(markdown);
    let html = wrap_document(&title, css, &fragment);
    HtmlDocument { title, html }
}
