use super::dom::{self, Element, Node};
use super::tokenize::tokenize;
use super::{FILENAME_ATTR, LANGUAGE_ATTR, LANGUAGE_PREFIX};
use crate::blocks::{BlockKind, ContentBlock, PLAIN_TEXT_LANGUAGE};

/// Reads markup back into blocks, one per top-level node.
///
/// Never fails. Top-level content with no block mapping becomes a
/// paragraph of its text, and only nodes with no text at all are dropped.
/// Every block gets a fresh id.
pub fn parse(html: &str) -> Vec<ContentBlock> {
    dom::build(tokenize(html))
        .iter()
        .filter_map(block_from_node)
        .collect()
}

fn block_from_node(node: &Node) -> Option<ContentBlock> {
    match node {
        Node::Text(text) => paragraph_of(text, "text"),
        Node::Element(el) => block_from_element(el),
    }
}

fn block_from_element(el: &Element) -> Option<ContentBlock> {
    match el.name.as_str() {
        "pre" => Some(code_block(el)),
        "figure" => match el.descendant("img") {
            Some(img) => Some(image_block(img, el.descendant("figcaption"))),
            None => paragraph_of(&el.text(), &el.name),
        },
        "img" => Some(image_block(el, None)),
        "hr" => Some(ContentBlock::divider()),
        name => match BlockKind::from_tag(name) {
            Some(kind) if kind.is_list() => Some(list_block(kind, el)),
            Some(kind) => Some(ContentBlock::text(kind, el.text())),
            None => paragraph_of(&el.text(), name),
        },
    }
}

/// The trimmed text as a paragraph, or nothing when it is blank.
fn paragraph_of(text: &str, source: &str) -> Option<ContentBlock> {
    let text = text.trim();
    if text.is_empty() {
        log::trace!("dropping blank top-level {source}");
        return None;
    }
    log::trace!("reading top-level {source} as a paragraph");
    Some(ContentBlock::text(BlockKind::Paragraph, text))
}

fn language_of(el: &Element) -> Option<&str> {
    if let Some(language) = el.attr(LANGUAGE_ATTR).filter(|language| !language.is_empty()) {
        return Some(language);
    }
    el.attr("class")?
        .split_ascii_whitespace()
        .find_map(|class| class.strip_prefix(LANGUAGE_PREFIX))
        .filter(|language| !language.is_empty())
}

fn code_block(pre: &Element) -> ContentBlock {
    let code = pre.child("code");
    let language = code
        .and_then(language_of)
        .or_else(|| language_of(pre))
        .unwrap_or(PLAIN_TEXT_LANGUAGE);
    let text = code.map_or_else(|| pre.text(), Element::text);
    let filename = pre.attr(FILENAME_ATTR).unwrap_or_default();

    ContentBlock::code(language, text, filename)
}

/// Alt text comes from a non-empty caption, falling back to the `alt`
/// attribute.
fn image_block(img: &Element, caption: Option<&Element>) -> ContentBlock {
    let url = img.attr("src").unwrap_or_default();
    let alt = caption
        .map(Element::text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| img.attr("alt").unwrap_or_default().to_string());

    ContentBlock::image(url, alt)
}

fn list_block(kind: BlockKind, list: &Element) -> ContentBlock {
    let items: Vec<String> = list
        .child_elements()
        .filter(|el| el.name == "li")
        .map(Element::text)
        .collect();

    if !items.is_empty() {
        return ContentBlock::list(kind, items);
    }
    // Loose text with no `<li>` still counts as one item
    let text = list.text();
    let loose = text.trim();
    if loose.is_empty() {
        ContentBlock::list(kind, Vec::new())
    } else {
        ContentBlock::list(kind, vec![loose.to_string()])
    }
}
