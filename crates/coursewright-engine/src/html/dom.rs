use super::tokenize::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Entity-decoded text.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Elements that never have content or an end tag.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Deepest element nesting kept. Start tags below it are dropped and their
/// content joins the deepest open element.
pub const MAX_DEPTH: usize = 256;

/// Elements whose start tag implicitly closes an open `<p>`.
const CLOSES_P: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "div",
    "dl",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Elements that start on a new line when flattened to text.
const BLOCK_LEVEL: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tr",
    "ul",
];

impl Element {
    fn new(name: String, attrs: Vec<(String, String)>) -> Self {
        Self {
            name,
            attrs,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First direct child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// First element called `name` anywhere below this one, depth first.
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        self.child_elements()
            .find_map(|el| if el.name == name { Some(el) } else { el.descendant(name) })
    }

    /// All text below this element. `<br>` becomes a newline and nested
    /// block-level elements are separated by one.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut pending_break = false;
        self.collect_text(&mut out, &mut pending_break);
        out
    }

    fn collect_text(&self, out: &mut String, pending_break: &mut bool) {
        let has_blocks = self
            .child_elements()
            .any(|el| BLOCK_LEVEL.contains(&el.name.as_str()));

        for child in &self.children {
            match child {
                // Indentation around nested blocks
                Node::Text(text) if has_blocks && text.trim().is_empty() => {}
                Node::Text(text) => push_text(out, text, pending_break),
                Node::Element(el) if el.name == "br" => {
                    out.push('\n');
                    *pending_break = false;
                }
                Node::Element(el) if BLOCK_LEVEL.contains(&el.name.as_str()) => {
                    *pending_break = true;
                    el.collect_text(out, pending_break);
                    *pending_break = true;
                }
                Node::Element(el) => el.collect_text(out, pending_break),
            }
        }
    }
}

fn push_text(out: &mut String, text: &str, pending_break: &mut bool) {
    if *pending_break {
        // Whitespace between blocks folds into the break
        if text.trim().is_empty() {
            return;
        }
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        *pending_break = false;
    }
    out.push_str(text);
}

fn attach(stack: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn close_top(stack: &mut Vec<Element>, roots: &mut Vec<Node>) {
    if let Some(el) = stack.pop() {
        attach(stack, roots, Node::Element(el));
    }
}

fn top_is(stack: &[Element], name: &str) -> bool {
    stack.last().is_some_and(|el| el.name == name)
}

/// Builds a forest from a token stream, repairing what browsers repair:
/// unclosed elements close at the end of input, end tags with no open
/// match are ignored, and `<p>`/`<li>` close implicitly. Nesting stops at
/// [`MAX_DEPTH`].
pub fn build(tokens: Vec<Token<'_>>) -> Vec<Node> {
    let mut stack: Vec<Element> = Vec::new();
    let mut roots = Vec::new();

    for token in tokens {
        match token {
            Token::Text(raw) => {
                let text = html_escape::decode_html_entities(raw).into_owned();
                attach(&mut stack, &mut roots, Node::Text(text));
            }
            Token::Start(tag) => {
                if top_is(&stack, "p") && CLOSES_P.contains(&tag.name.as_str()) {
                    close_top(&mut stack, &mut roots);
                }
                if tag.name == "li" && top_is(&stack, "li") {
                    close_top(&mut stack, &mut roots);
                }

                let void = tag.self_closing || VOID.contains(&tag.name.as_str());
                if !void && stack.len() >= MAX_DEPTH {
                    log::trace!("flattening <{}> nested below depth {MAX_DEPTH}", tag.name);
                    continue;
                }
                let el = Element::new(tag.name, tag.attrs);
                if void {
                    attach(&mut stack, &mut roots, Node::Element(el));
                } else {
                    stack.push(el);
                }
            }
            Token::End(name) => {
                if let Some(depth) = stack.iter().rposition(|el| el.name == name) {
                    while stack.len() > depth {
                        close_top(&mut stack, &mut roots);
                    }
                }
            }
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    roots
}
