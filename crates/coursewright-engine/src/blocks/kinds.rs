use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed vocabulary of content block types.
///
/// Variant order matches [`KINDS`]; see [`BlockKind::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Quote,
    Code,
    Image,
    List,
    OrderedList,
    Divider,
}

/// Payload layout and markup of a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Plain `content` wrapped in a single element.
    Text { tag: &'static str },
    /// `codeData`, rendered as `<pre><code>`.
    Code,
    /// `imageUrl`/`imageAlt`, rendered as a `<figure>`.
    Image,
    /// `listItems`, one `<li>` each inside the given list element.
    List { tag: &'static str },
    /// No payload at all.
    Rule,
}

/// Everything the editor and the transcoder need to know about a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub kind: BlockKind,
    /// Name used on the wire and in the editor UI.
    pub name: &'static str,
    pub shape: Shape,
}

/// One entry per block kind, in declaration order.
pub static KINDS: [KindInfo; 10] = [
    KindInfo {
        kind: BlockKind::Paragraph,
        name: "paragraph",
        shape: Shape::Text { tag: "p" },
    },
    KindInfo {
        kind: BlockKind::Heading1,
        name: "heading1",
        shape: Shape::Text { tag: "h1" },
    },
    KindInfo {
        kind: BlockKind::Heading2,
        name: "heading2",
        shape: Shape::Text { tag: "h2" },
    },
    KindInfo {
        kind: BlockKind::Heading3,
        name: "heading3",
        shape: Shape::Text { tag: "h3" },
    },
    KindInfo {
        kind: BlockKind::Quote,
        name: "quote",
        shape: Shape::Text { tag: "blockquote" },
    },
    KindInfo {
        kind: BlockKind::Code,
        name: "code",
        shape: Shape::Code,
    },
    KindInfo {
        kind: BlockKind::Image,
        name: "image",
        shape: Shape::Image,
    },
    KindInfo {
        kind: BlockKind::List,
        name: "list",
        shape: Shape::List { tag: "ul" },
    },
    KindInfo {
        kind: BlockKind::OrderedList,
        name: "ordered-list",
        shape: Shape::List { tag: "ol" },
    },
    KindInfo {
        kind: BlockKind::Divider,
        name: "divider",
        shape: Shape::Rule,
    },
];

impl BlockKind {
    pub fn info(self) -> &'static KindInfo {
        &KINDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn shape(self) -> Shape {
        self.info().shape
    }

    pub fn is_list(self) -> bool {
        matches!(self.shape(), Shape::List { .. })
    }

    /// The kind whose single wrapping element is `tag` (`p`, `h1`, `ul`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        KINDS
            .iter()
            .find(|info| match info.shape {
                Shape::Text { tag: t } | Shape::List { tag: t } => t == tag,
                _ => false,
            })
            .map(|info| info.kind)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block type: {0}")]
pub struct UnknownBlockKind(pub String);

impl FromStr for BlockKind {
    type Err = UnknownBlockKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KINDS
            .iter()
            .find(|info| info.name == s)
            .map(|info| info.kind)
            .ok_or_else(|| UnknownBlockKind(s.to_string()))
    }
}
