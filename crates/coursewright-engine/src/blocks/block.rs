use serde::{Deserialize, Serialize};

use super::kinds::{BlockKind, Shape};
use crate::ids::BlockId;
use crate::tree::Keyed;

/// Language given to code blocks when neither the caller nor the stored
/// markup names one.
pub const PLAIN_TEXT_LANGUAGE: &str = "plaintext";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeData {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub filename: String,
}

/// One unit of a structured rich-text document.
///
/// Payload fields are meant to be populated only for the block's own kind;
/// the serializer reads only the fields its kind owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_data: Option<CodeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
}

/// Editor-level defaults for freshly created blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDefaults {
    pub code_language: String,
}

impl Default for BlockDefaults {
    fn default() -> Self {
        Self {
            code_language: "javascript".to_string(),
        }
    }
}

impl ContentBlock {
    /// A block of `kind` with a fresh id and the default payload for its shape.
    pub fn new(kind: BlockKind, defaults: &BlockDefaults) -> Self {
        Self::with_id(BlockId::generate(), kind, defaults)
    }

    pub fn with_id(id: BlockId, kind: BlockKind, defaults: &BlockDefaults) -> Self {
        let mut block = Self::bare(id, kind);
        match kind.shape() {
            Shape::Text { .. } | Shape::Rule => {}
            Shape::Code => {
                block.code_data = Some(CodeData {
                    language: defaults.code_language.clone(),
                    ..CodeData::default()
                })
            }
            Shape::List { .. } => block.list_items = Some(vec![String::new()]),
            Shape::Image => {
                block.image_url = Some(String::new());
                block.image_alt = Some(String::new());
            }
        }
        block
    }

    /// A block with every payload field empty.
    pub(crate) fn bare(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            content: String::new(),
            code_data: None,
            list_items: None,
            image_url: None,
            image_alt: None,
        }
    }

    /// A text-shaped block (paragraph, heading, quote) holding `content`.
    pub fn text(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::bare(BlockId::generate(), kind)
        }
    }

    pub fn code(
        language: impl Into<String>,
        code: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            code_data: Some(CodeData {
                language: language.into(),
                code: code.into(),
                filename: filename.into(),
            }),
            ..Self::bare(BlockId::generate(), BlockKind::Code)
        }
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            image_alt: Some(alt.into()),
            ..Self::bare(BlockId::generate(), BlockKind::Image)
        }
    }

    pub fn list(kind: BlockKind, items: Vec<String>) -> Self {
        Self {
            list_items: Some(items),
            ..Self::bare(BlockId::generate(), kind)
        }
    }

    pub fn divider() -> Self {
        Self::bare(BlockId::generate(), BlockKind::Divider)
    }

    /// List items, or an empty slice for blocks that carry none.
    pub fn items(&self) -> &[String] {
        self.list_items.as_deref().unwrap_or_default()
    }

    /// Shallow-merges `patch` into a copy of this block. The id never changes.
    pub fn patched(&self, patch: &BlockPatch) -> Self {
        let mut next = self.clone();
        if let Some(kind) = patch.kind {
            next.kind = kind;
        }
        if let Some(content) = &patch.content {
            next.content = content.clone();
        }
        if let Some(code_data) = &patch.code_data {
            next.code_data = Some(code_data.clone());
        }
        if let Some(list_items) = &patch.list_items {
            next.list_items = Some(list_items.clone());
        }
        if let Some(image_url) = &patch.image_url {
            next.image_url = Some(image_url.clone());
        }
        if let Some(image_alt) = &patch.image_alt {
            next.image_alt = Some(image_alt.clone());
        }
        next
    }
}

impl Keyed for ContentBlock {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Fields to overwrite on a block; `None` leaves a field as it is.
///
/// Nothing checks that the fields belong to the block's kind. Callers are
/// expected to send only the ones that do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<BlockKind>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub code_data: Option<CodeData>,
    #[serde(default)]
    pub list_items: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(BlockKind::Paragraph)]
    #[case(BlockKind::Heading1)]
    #[case(BlockKind::Heading2)]
    #[case(BlockKind::Heading3)]
    #[case(BlockKind::Quote)]
    #[case(BlockKind::Divider)]
    fn text_kinds_start_empty(#[case] kind: BlockKind) {
        let block = ContentBlock::new(kind, &BlockDefaults::default());
        assert_eq!(block.content, "");
        assert_eq!(block.code_data, None);
        assert_eq!(block.list_items, None);
        assert_eq!(block.image_url, None);
    }

    #[test]
    fn code_defaults_to_javascript() {
        let block = ContentBlock::new(BlockKind::Code, &BlockDefaults::default());
        assert_eq!(
            block.code_data,
            Some(CodeData {
                language: "javascript".into(),
                code: String::new(),
                filename: String::new(),
            })
        );
    }

    #[test]
    fn code_language_follows_defaults() {
        let defaults = BlockDefaults {
            code_language: "rust".into(),
        };
        let block = ContentBlock::new(BlockKind::Code, &defaults);
        assert_eq!(block.code_data.unwrap().language, "rust");
    }

    #[rstest]
    #[case(BlockKind::List)]
    #[case(BlockKind::OrderedList)]
    fn lists_start_with_one_empty_item(#[case] kind: BlockKind) {
        let block = ContentBlock::new(kind, &BlockDefaults::default());
        assert_eq!(block.items(), &[String::new()]);
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let block = ContentBlock::text(BlockKind::Paragraph, "before");
        let patched = block.patched(&BlockPatch {
            kind: Some(BlockKind::Quote),
            ..BlockPatch::default()
        });

        assert_eq!(patched.id, block.id);
        assert_eq!(patched.kind, BlockKind::Quote);
        assert_eq!(patched.content, "before");
    }

    #[test]
    fn json_uses_editor_field_names() {
        let block = ContentBlock {
            id: BlockId::from("b1"),
            ..ContentBlock::code("rust", "fn main() {}", "main.rs")
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "b1",
                "type": "code",
                "content": "",
                "codeData": {"language": "rust", "code": "fn main() {}", "filename": "main.rs"}
            })
        );
    }
}
