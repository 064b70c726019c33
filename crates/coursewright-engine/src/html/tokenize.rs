use std::sync::OnceLock;

use regex::Regex;

use super::cursor::Cursor;

/// A start tag with lowercased name and entity-decoded attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Start(StartTag),
    End(String),
    /// Raw text, entities still encoded.
    Text(&'a str),
}

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title"];

/// Splits markup into tags and text.
///
/// Never fails: anything that does not form a complete tag (a lone `<`, an
/// unterminated tag) is emitted as text. Comments, doctypes and processing
/// instructions are dropped.
pub fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut cur = Cursor::new(html);
    let mut ends = TagEnds::new(html);
    let mut out = Vec::new();
    let mut text_start = 0;

    fn flush_text<'a>(out: &mut Vec<Token<'a>>, html: &'a str, start: usize, end: usize) {
        if end > start {
            out.push(Token::Text(&html[start..end]));
        }
    }

    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            cur.bump();
            continue;
        }

        let at = cur.pos();
        if skip_comment_or_declaration(&mut cur, &ends) {
            flush_text(&mut out, html, text_start, at);
            text_start = cur.pos();
            continue;
        }
        if let Some(name) = try_end_tag(&mut cur, &ends) {
            flush_text(&mut out, html, text_start, at);
            out.push(Token::End(name));
            text_start = cur.pos();
            continue;
        }
        if let Some(tag) = try_start_tag(&mut cur, &mut ends) {
            flush_text(&mut out, html, text_start, at);
            let raw = !tag.self_closing && RAW_TEXT.contains(&tag.name.as_str());
            let name = tag.name.clone();
            out.push(Token::Start(tag));
            if raw {
                consume_raw_text(&mut cur, &name, &ends, &mut out);
            }
            text_start = cur.pos();
            continue;
        }

        // A `<` that opens nothing is just text
        cur.bump();
    }

    flush_text(&mut out, html, text_start, cur.pos());
    out
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':' || b == b'_'
}

/// Searches for the `>` that ends a tag.
///
/// A failed search is remembered, so input full of unterminated tags is
/// still scanned in linear time overall.
struct TagEnds<'a> {
    bytes: &'a [u8],
    last_gt: Option<usize>,
    /// Positions from which a quote-aware scan, started outside quotes,
    /// reaches the end of input without closing the tag.
    dead: Vec<bool>,
}

impl<'a> TagEnds<'a> {
    fn new(html: &'a str) -> Self {
        Self {
            bytes: html.as_bytes(),
            last_gt: html.rfind('>'),
            dead: Vec::new(),
        }
    }

    /// Position of the first `>` at or after `from`.
    fn plain(&self, from: usize) -> Option<usize> {
        if self.last_gt? < from {
            return None;
        }
        self.bytes[from..]
            .iter()
            .position(|&b| b == b'>')
            .map(|offset| from + offset)
    }

    /// Position of the first `>` at or after `from` that is not inside a
    /// quoted attribute value.
    fn quoted(&mut self, from: usize) -> Option<usize> {
        let mut visited = Vec::new();
        let mut i = from;
        loop {
            if self.dead.get(i).copied().unwrap_or(false) {
                break;
            }
            match self.bytes.get(i) {
                None => break,
                Some(b'>') => return Some(i),
                Some(&quote @ (b'"' | b'\'')) => {
                    visited.push(i);
                    match self.bytes[i + 1..].iter().position(|&b| b == quote) {
                        Some(len) => i += len + 2,
                        None => break,
                    }
                }
                Some(_) => {
                    visited.push(i);
                    i += 1;
                }
            }
        }

        // Every position scanned outside quotes leads to the same dead end
        if self.dead.is_empty() {
            self.dead = vec![false; self.bytes.len()];
        }
        for i in visited {
            self.dead[i] = true;
        }
        None
    }
}

/// Skips `<!-- ... -->`, `<!DOCTYPE ...>` and `<? ... >`.
///
/// An unterminated comment runs to the end of input, as in browsers.
fn skip_comment_or_declaration(cur: &mut Cursor<'_>, ends: &TagEnds<'_>) -> bool {
    if cur.starts_with(b"<!--") {
        cur.bump_n(4);
        match cur.find("-->") {
            Some(end) => cur.bump_n(end + 3),
            None => cur.bump_n(cur.rest().len()),
        }
        return true;
    }
    if cur.starts_with(b"<!") || cur.starts_with(b"<?") {
        if let Some(end) = ends.plain(cur.pos()) {
            cur.bump_n(end + 1 - cur.pos());
            return true;
        }
    }
    false
}

/// Parses `</name ...>`. On failure the cursor is left where it was.
fn try_end_tag(cur: &mut Cursor<'_>, ends: &TagEnds<'_>) -> Option<String> {
    if !cur.starts_with(b"</") || !cur.peek_at(2).is_some_and(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let end = ends.plain(cur.pos())?;

    cur.bump_n(2);
    let name = cur.eat_while(is_name_byte).to_ascii_lowercase();
    cur.bump_n(end + 1 - cur.pos());
    Some(name)
}

/// Parses `<name attr="value" ...>` or its self-closing form. On failure
/// the cursor is left where it was.
fn try_start_tag(cur: &mut Cursor<'_>, ends: &mut TagEnds<'_>) -> Option<StartTag> {
    if cur.peek() != Some(b'<') || !cur.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let saved = cur.clone();
    cur.bump();
    let name = cur.eat_while(is_name_byte).to_ascii_lowercase();
    let Some(end) = ends.quoted(cur.pos()) else {
        *cur = saved;
        return None;
    };

    let inner = &cur.rest()[..end - cur.pos()];
    cur.bump_n(end + 1 - cur.pos());

    Some(StartTag {
        name,
        attrs: parse_attrs(inner),
        self_closing: inner.trim_end().ends_with('/'),
    })
}

fn attr_regex() -> &'static Regex {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("Invalid attribute regex")
    })
}

fn parse_attrs(inner: &str) -> Vec<(String, String)> {
    attr_regex()
        .captures_iter(inner)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

/// Consumes the body of a raw-text element and its end tag.
fn consume_raw_text<'a>(
    cur: &mut Cursor<'a>,
    name: &str,
    ends: &TagEnds<'_>,
    out: &mut Vec<Token<'a>>,
) {
    let close = format!("</{name}");
    let body_len = cur
        .find_ignore_ascii_case(&close)
        .unwrap_or(cur.rest().len());
    let body = &cur.rest()[..body_len];
    if !body.is_empty() {
        out.push(Token::Text(body));
    }
    cur.bump_n(body_len);

    if !cur.eof() {
        match ends.plain(cur.pos()) {
            Some(end) => cur.bump_n(end + 1 - cur.pos()),
            None => cur.bump_n(cur.rest().len()),
        }
    }
    out.push(Token::End(name.to_string()));
}
