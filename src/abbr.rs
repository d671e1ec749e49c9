//! Abbreviations – `*[HTML]: Hyper Text Markup Language` definitions.
//!
//! Definitions are lifted out of the markdown before rendering; afterwards
//! every whole-word occurrence in the rendered text is wrapped in an
//! `<abbr title="...">` element. Tag markup, `<code>` and `<pre>` content are
//! never touched.

/// A single `*[ABBR]: title` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviation {
    pub abbr: String,
    pub title: String,
}

fn parse_definition(line: &str) -> Option<Abbreviation> {
    let rest = line.strip_prefix("*[")?;
    let close = rest.find(']')?;
    let abbr = &rest[..close];
    let after = rest[close + 1..].strip_prefix(' ').unwrap_or(&rest[close + 1..]);
    let title = after.strip_prefix(':')?.trim();
    if abbr.is_empty() {
        return None;
    }
    Some(Abbreviation {
        abbr: abbr.to_string(),
        title: title.to_string(),
    })
}

/// Remove definition lines from `markdown`, returning the remaining text and
/// the definitions. A later definition of the same abbreviation wins.
pub fn extract_definitions(markdown: &str) -> (String, Vec<Abbreviation>) {
    let mut defs: Vec<Abbreviation> = Vec::new();
    let mut kept = Vec::new();

    for line in markdown.lines() {
        match parse_definition(line) {
            Some(def) => {
                defs.retain(|d| d.abbr != def.abbr);
                defs.push(def);
            }
            None => kept.push(line),
        }
    }

    (kept.join("\n"), defs)
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct Matcher {
    needle: String,
    replacement: String,
}

/// Length of the character reference (`&amp;`, `&#39;`, ...) at the start of
/// `text`, if there is one.
fn entity_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = body[..end].strip_prefix('#').unwrap_or(&body[..end]);
    (!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())).then_some(end + 2)
}

fn expand_text(text: &str, matchers: &[Matcher], out: &mut String) {
    let mut last = 0;
    let mut idx = 0;

    while idx < text.len() {
        let rest = &text[idx..];
        let at_start = text[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        if at_start {
            let hit = matchers.iter().find(|m| {
                rest.starts_with(m.needle.as_str())
                    && rest[m.needle.len()..]
                        .chars()
                        .next()
                        .map_or(true, |c| !is_word_char(c))
            });
            if let Some(m) = hit {
                out.push_str(&text[last..idx]);
                out.push_str(&m.replacement);
                idx += m.needle.len();
                last = idx;
                continue;
            }
        }
        if let Some(len) = entity_len(rest) {
            idx += len;
            continue;
        }
        idx += rest.chars().next().map_or(1, char::len_utf8);
    }
    out.push_str(&text[last..]);
}

fn tag_name(tag: &str) -> (bool, String) {
    let body = tag.trim_start_matches('<');
    let closing = body.starts_with('/');
    let name = body
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    (closing, name)
}

/// Wrap abbreviations found in the text nodes of `html`.
pub fn expand(html: &str, defs: &[Abbreviation]) -> String {
    if defs.is_empty() {
        return html.to_string();
    }

    let mut matchers: Vec<Matcher> = defs
        .iter()
        .map(|d| {
            let needle = escape_html(&d.abbr);
            let replacement = format!(
                "<abbr title=\"{}\">{}</abbr>",
                escape_html(&d.title),
                needle
            );
            Matcher {
                needle,
                replacement,
            }
        })
        .collect();
    matchers.sort_by(|a, b| b.needle.len().cmp(&a.needle.len()));

    let mut out = String::with_capacity(html.len());
    let mut verbatim_depth = 0usize;
    let mut pos = 0;

    while pos < html.len() {
        let rest = &html[pos..];
        if rest.starts_with('<') {
            let end = rest.find('>').map_or(rest.len(), |i| i + 1);
            let tag = &rest[..end];
            let (closing, name) = tag_name(tag);
            if name == "code" || name == "pre" {
                if closing {
                    verbatim_depth = verbatim_depth.saturating_sub(1);
                } else {
                    verbatim_depth += 1;
                }
            }
            out.push_str(tag);
            pos += end;
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        let text = &rest[..end];
        if verbatim_depth == 0 {
            expand_text(text, &matchers, &mut out);
        } else {
            out.push_str(text);
        }
        pos += end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(abbr: &str, title: &str) -> Abbreviation {
        Abbreviation {
            abbr: abbr.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn definitions_are_lifted_out() {
        let md = "I know HTML.\n\
                  *[HTML]: Hyper Text Markup Language\n\
                  *[CSS] : Cascading Style Sheets\n\
                  Bye";
        let (text, defs) = extract_definitions(md);
        assert_eq!(text, "I know HTML.\nBye");
        assert_eq!(
            defs,
            vec![
                def("HTML", "Hyper Text Markup Language"),
                def("CSS", "Cascading Style Sheets"),
            ]
        );
    }

    #[test]
    fn non_definitions_are_kept() {
        let md = "* [link]: not a def\n*[]: empty\n*[X] no colon";
        let (text, defs) = extract_definitions(md);
        assert_eq!(text, md);
        assert!(defs.is_empty());
    }

    #[test]
    fn later_definition_wins() {
        let (_, defs) = extract_definitions("*[API]: one\n*[API]: two");
        assert_eq!(defs, vec![def("API", "two")]);
    }

    #[test]
    fn wraps_whole_words_only() {
        let html = "<p>APIs and API, plus API.</p>";
        let out = expand(html, &[def("API", "Application Programming Interface")]);
        assert_eq!(
            out,
            "<p>APIs and <abbr title=\"Application Programming Interface\">API</abbr>, plus \
             <abbr title=\"Application Programming Interface\">API</abbr>.</p>"
        );
    }

    #[test]
    fn leaves_tags_and_code_alone() {
        let html = "<p class=\"API\"><code>API</code> API</p><pre><code>API\n</code></pre>";
        let out = expand(html, &[def("API", "x")]);
        assert_eq!(
            out,
            "<p class=\"API\"><code>API</code> <abbr title=\"x\">API</abbr></p>\
             <pre><code>API\n</code></pre>"
        );
    }

    #[test]
    fn prefers_longest_abbreviation() {
        let out = expand("<p>AWS S3</p>", &[def("AWS", "a"), def("AWS S3", "b")]);
        assert_eq!(out, "<p><abbr title=\"b\">AWS S3</abbr></p>");
    }

    #[test]
    fn escapes_title_and_matches_escaped_text() {
        let out = expand("<p>R&amp;D</p>", &[def("R&D", "Research \"and\" Development")]);
        assert_eq!(
            out,
            "<p><abbr title=\"Research &quot;and&quot; Development\">R&amp;D</abbr></p>"
        );
    }

    #[test]
    fn entity_names_are_not_abbreviated() {
        let out = expand(
            "<p>Q&amp;A about amp stacks &lt;3 &#39;lt&#39;</p>",
            &[def("amp", "amplifier"), def("lt", "less than"), def("A", "answer")],
        );
        assert_eq!(
            out,
            "<p>Q&amp;<abbr title=\"answer\">A</abbr> about \
             <abbr title=\"amplifier\">amp</abbr> stacks &lt;3 \
             &#39;<abbr title=\"less than\">lt</abbr>&#39;</p>"
        );
    }
}
