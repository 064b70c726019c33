use std::borrow::Cow;
use std::fmt::Write;

use super::{FILENAME_ATTR, LANGUAGE_ATTR, LANGUAGE_PREFIX};
use crate::blocks::{ContentBlock, PLAIN_TEXT_LANGUAGE, Shape};

/// Escapes `&`, `<`, `>`, `"` and `'`, which makes the result safe both as
/// element text and inside a double-quoted attribute.
fn escape(s: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(s)
}

/// Renders blocks in order, one fragment per block, joined by newlines.
pub fn serialize<'a>(blocks: impl IntoIterator<Item = &'a ContentBlock>) -> String {
    let mut out = String::new();
    for (index, block) in blocks.into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_block(&mut out, block);
    }
    out
}

/// The fragment for a single block.
pub fn block_html(block: &ContentBlock) -> String {
    let mut out = String::new();
    write_block(&mut out, block);
    out
}

fn write_block(out: &mut String, block: &ContentBlock) {
    // Writing into a String cannot fail
    let _ = match block.kind.shape() {
        Shape::Text { tag } => write!(out, "<{tag}>{}</{tag}>", escape(&block.content)),
        Shape::Code => write_code(out, block),
        Shape::Image => write_image(out, block),
        Shape::List { tag } => write_list(out, tag, block.items()),
        Shape::Rule => out.write_str("<hr/>"),
    };
}

fn write_code(out: &mut String, block: &ContentBlock) -> std::fmt::Result {
    let data = block.code_data.clone().unwrap_or_default();
    let language = if data.language.is_empty() {
        PLAIN_TEXT_LANGUAGE
    } else {
        data.language.as_str()
    };

    out.write_str("<pre")?;
    if !data.filename.is_empty() {
        write!(out, " {FILENAME_ATTR}=\"{}\"", escape(&data.filename))?;
    }
    if language.contains(|c: char| c.is_ascii_whitespace()) {
        let class = language.replace(|c: char| c.is_ascii_whitespace(), "-");
        write!(
            out,
            "><code class=\"{LANGUAGE_PREFIX}{}\" {LANGUAGE_ATTR}=\"{}\">",
            escape(&class),
            escape(language)
        )?;
    } else {
        write!(out, "><code class=\"{LANGUAGE_PREFIX}{}\">", escape(language))?;
    }
    write!(out, "{}</code></pre>", escape(&data.code))
}

fn write_image(out: &mut String, block: &ContentBlock) -> std::fmt::Result {
    let url = block.image_url.as_deref().unwrap_or_default();
    let alt = block.image_alt.as_deref().unwrap_or_default();

    write!(
        out,
        "<figure><img src=\"{}\" alt=\"{}\"/>",
        escape(url),
        escape(alt)
    )?;
    if !alt.is_empty() {
        write!(out, "<figcaption>{}</figcaption>", escape(alt))?;
    }
    out.write_str("</figure>")
}

fn write_list(out: &mut String, tag: &str, items: &[String]) -> std::fmt::Result {
    write!(out, "<{tag}>")?;
    for item in items {
        write!(out, "<li>{}</li>", escape(item))?;
    }
    write!(out, "</{tag}>")
}
