//! Template preprocessing – conditional blocks, line omission, substitution.
//!
//! The template syntax has exactly three constructs on top of plain text:
//!
//! * `{{NAME}}` – a placeholder,
//! * `{{#IF NAME}}` – start of a conditional block,
//! * `{{/IF}}` – end of a conditional block.
//!
//! [`tokenize`] splits the source into a flat token sequence in one pass;
//! the later stages walk that sequence instead of re-scanning the text.

use log::debug;

use crate::config::Variables;

/// Conditional block names that are evaluated. Blocks governed by any other
/// name are left in the output untouched.
pub const CONDITIONAL_VARIABLES: [&str; 2] = ["APPLYING_COMPANY", "KEY_PROJECT"];

/// Title used when the document has no top-level heading.
pub const DEFAULT_TITLE: &str = "Cover Letter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Text,
    Placeholder(&'a str),
    IfStart(&'a str),
    IfEnd,
}

/// One lexical unit of a template. `raw` is the exact source slice, so
/// concatenating every `raw` reproduces the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub raw: &'a str,
}

impl<'a> Token<'a> {
    fn text(raw: &'a str) -> Self {
        Self {
            kind: TokenKind::Text,
            raw,
        }
    }
}

/// The literal placeholder token for `name`, e.g. `{{NAME}}`.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn classify(inner: &str) -> Option<TokenKind<'_>> {
    if inner == "/IF" {
        return Some(TokenKind::IfEnd);
    }
    if let Some(name) = inner.strip_prefix("#IF ") {
        return is_name(name).then_some(TokenKind::IfStart(name));
    }
    is_name(inner).then_some(TokenKind::Placeholder(inner))
}

/// Split `source` into text runs, placeholders and conditional markers.
///
/// A `{{` that does not open a well-formed construct is plain text; scanning
/// resumes one byte later so `{{{NAME}}}` still yields the `{{NAME}}` inside.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(rel) = source[pos..].find("{{") {
        let open = pos + rel;
        let Some(close_rel) = source[open + 2..].find("}}") else {
            break;
        };
        let close = open + 2 + close_rel;

        match classify(&source[open + 2..close]) {
            Some(kind) => {
                if text_start < open {
                    tokens.push(Token::text(&source[text_start..open]));
                }
                tokens.push(Token {
                    kind,
                    raw: &source[open..close + 2],
                });
                pos = close + 2;
                text_start = pos;
            }
            None => pos = open + 1,
        }
    }

    if text_start < source.len() {
        tokens.push(Token::text(&source[text_start..]));
    }
    tokens
}

/// Index of the `{{/IF}}` closing the block opened at `start`.
///
/// Nested `{{#IF ...}}` markers consume their own end marker. If the block is
/// unbalanced, the first end marker after `start` closes it.
fn matching_end(tokens: &[Token<'_>], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut first_end = None;
    for (idx, token) in tokens.iter().enumerate().skip(start + 1) {
        match token.kind {
            TokenKind::IfStart(_) => depth += 1,
            TokenKind::IfEnd if depth == 0 => return Some(idx),
            TokenKind::IfEnd => {
                first_end.get_or_insert(idx);
                depth -= 1;
            }
            _ => {}
        }
    }
    first_end
}

/// Drop every recognised conditional block whose variable is unset.
///
/// Blocks whose variable is set keep both their content and their markers.
pub fn remove_conditional_blocks(source: &str, vars: &Variables) -> String {
    let tokens = tokenize(source);
    let mut out = String::with_capacity(source.len());
    let mut idx = 0;

    while idx < tokens.len() {
        if let TokenKind::IfStart(name) = tokens[idx].kind {
            if CONDITIONAL_VARIABLES.contains(&name) && !vars.is_set(name) {
                if let Some(end) = matching_end(&tokens, idx) {
                    debug!("dropping {{{{#IF {name}}}}} block");
                    idx = end + 1;
                    continue;
                }
            }
        }
        out.push_str(tokens[idx].raw);
        idx += 1;
    }
    out
}

/// Drop every line that mentions a placeholder of an unset variable.
///
/// Lines are re-joined with `\n`; a trailing newline is not kept.
pub fn omit_unset_lines(text: &str, vars: &Variables) -> String {
    let needles: Vec<String> = vars.unset_names().map(placeholder).collect();

    text.lines()
        .filter(|line| {
            let keep = !needles.iter().any(|n| line.contains(n.as_str()));
            if !keep {
                debug!("omitting line {line:?}");
            }
            keep
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace every placeholder of a known variable with its value (or nothing).
///
/// Unknown placeholders are left as written. Values are inserted verbatim and
/// never re-scanned.
pub fn substitute_placeholders(text: &str, vars: &Variables) -> String {
    tokenize(text)
        .into_iter()
        .map(|token| match token.kind {
            TokenKind::Placeholder(name) if vars.is_known(name) => vars.get(name).unwrap_or(""),
            _ => token.raw,
        })
        .collect()
}

/// Full preprocessing: blocks, then lines, then placeholders.
pub fn preprocess(source: &str, vars: &Variables) -> String {
    let text = remove_conditional_blocks(source, vars);
    let text = omit_unset_lines(&text, vars);
    substitute_placeholders(&text, vars)
}

/// Text of the first `# Heading` line, or [`DEFAULT_TITLE`].
pub fn extract_title(text: &str) -> String {
    text.lines()
        .find(|line| {
            let mut chars = line.chars();
            chars.next() == Some('#') && chars.next().is_some_and(|c| c != '#')
        })
        .map(|line| line.trim_start_matches('#').trim().to_string())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
