use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::block::{BlockDefaults, BlockPatch, ContentBlock};
use super::kinds::BlockKind;
use crate::html;
use crate::ids::BlockId;
use crate::tree::error::or_unchanged;
use crate::tree::path::{edit_first, swap_adjacent};
use crate::tree::{Direction, Edit, EditError, ItemKind};

/// An ordered list of content blocks: the editor's in-memory document.
///
/// Document order is the list index. Every operation returns a new document;
/// blocks that an operation does not touch are shared with the input, and a
/// no-op returns a document for which [`ContentDocument::same_as`] holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDocument {
    blocks: Arc<Vec<Arc<ContentBlock>>>,
}

impl ContentDocument {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self::from_arcs(blocks.into_iter().map(Arc::new).collect())
    }

    fn from_arcs(blocks: Vec<Arc<ContentBlock>>) -> Self {
        Self {
            blocks: Arc::new(blocks),
        }
    }

    /// Parses a stored HTML body. Never fails; see [`html::parse`].
    pub fn from_html(body: &str) -> Self {
        Self::new(html::parse(body))
    }

    /// Serializes the document to the HTML body stored by the CMS.
    pub fn to_html(&self) -> String {
        html::serialize(self.iter())
    }

    pub fn blocks(&self) -> &[Arc<ContentBlock>] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentBlock> {
        self.blocks.iter().map(|block| block.as_ref())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Arc<ContentBlock>> {
        self.blocks.iter().find(|block| block.id == *id)
    }

    /// True when both documents share the same block list allocation.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.blocks, &other.blocks)
    }

    fn position(&self, id: &BlockId) -> Result<usize, EditError> {
        self.blocks
            .iter()
            .position(|block| block.id == *id)
            .ok_or_else(|| EditError::not_found(ItemKind::Block, id))
    }

    /// Inserts a fresh block of `kind` right after `after`, or appends it.
    ///
    /// An `after` id that does not exist appends as well.
    pub fn add_block(&self, kind: BlockKind, after: Option<&BlockId>) -> Self {
        self.add_block_with(kind, after, &BlockDefaults::default())
    }

    pub fn add_block_with(
        &self,
        kind: BlockKind,
        after: Option<&BlockId>,
        defaults: &BlockDefaults,
    ) -> Self {
        match self.try_add_block_with(kind, after, defaults) {
            Ok((document, _)) => document,
            Err(err) => {
                log::debug!("{err}; appending instead");
                self.insert_at(self.len(), ContentBlock::new(kind, defaults))
            }
        }
    }

    /// Like [`add_block_with`](Self::add_block_with) but reports the new id
    /// and refuses an unknown `after` id.
    pub fn try_add_block_with(
        &self,
        kind: BlockKind,
        after: Option<&BlockId>,
        defaults: &BlockDefaults,
    ) -> Result<(Self, BlockId), EditError> {
        let index = match after {
            Some(after) => self.position(after)? + 1,
            None => self.len(),
        };
        let block = ContentBlock::new(kind, defaults);
        let id = block.id.clone();
        Ok((self.insert_at(index, block), id))
    }

    fn insert_at(&self, index: usize, block: ContentBlock) -> Self {
        let mut blocks = self.blocks.to_vec();
        blocks.insert(index, Arc::new(block));
        Self::from_arcs(blocks)
    }

    /// Shallow-merges `patch` into the block with `id`.
    pub fn update_block(&self, id: &BlockId, patch: &BlockPatch) -> Self {
        or_unchanged(self.try_update_block(id, patch), self)
    }

    pub fn try_update_block(&self, id: &BlockId, patch: &BlockPatch) -> Result<Self, EditError> {
        self.edit(id, |block| Edit::Replace(block.patched(patch)))
    }

    pub fn delete_block(&self, id: &BlockId) -> Self {
        or_unchanged(self.try_delete_block(id), self)
    }

    pub fn try_delete_block(&self, id: &BlockId) -> Result<Self, EditError> {
        self.edit(id, |_| Edit::Remove)
    }

    /// Swaps the block with its neighbour; a no-op at either end.
    pub fn move_block(&self, id: &BlockId, direction: Direction) -> Self {
        or_unchanged(self.try_move_block(id, direction), self)
    }

    pub fn try_move_block(&self, id: &BlockId, direction: Direction) -> Result<Self, EditError> {
        let index = self.position(id)?;
        swap_adjacent(&self.blocks, index, direction)
            .map(Self::from_arcs)
            .ok_or_else(|| EditError::AtBoundary {
                kind: ItemKind::Block,
                id: id.to_string(),
                edge: direction.edge(),
            })
    }

    /// Inserts a copy of the block, under a new id, directly after it.
    pub fn duplicate_block(&self, id: &BlockId) -> Self {
        or_unchanged(self.try_duplicate_block(id).map(|(doc, _)| doc), self)
    }

    pub fn try_duplicate_block(&self, id: &BlockId) -> Result<(Self, BlockId), EditError> {
        let index = self.position(id)?;
        let copy = ContentBlock {
            id: BlockId::generate(),
            ..self.blocks[index].as_ref().clone()
        };
        let copy_id = copy.id.clone();
        Ok((self.insert_at(index + 1, copy), copy_id))
    }

    /// Replaces the text of one list item.
    pub fn update_list_item(&self, id: &BlockId, index: usize, text: &str) -> Self {
        or_unchanged(self.try_update_list_item(id, index, text), self)
    }

    pub fn try_update_list_item(
        &self,
        id: &BlockId,
        index: usize,
        text: &str,
    ) -> Result<Self, EditError> {
        self.edit_list(id, |items| {
            let item = items
                .get_mut(index)
                .ok_or_else(|| EditError::ListIndexOutOfRange {
                    id: id.to_string(),
                    index,
                })?;
            *item = text.to_string();
            Ok(())
        })
    }

    /// Inserts an empty item after `after`, or appends one.
    pub fn add_list_item(&self, id: &BlockId, after: Option<usize>) -> Self {
        or_unchanged(self.try_add_list_item(id, after), self)
    }

    pub fn try_add_list_item(&self, id: &BlockId, after: Option<usize>) -> Result<Self, EditError> {
        self.edit_list(id, |items| {
            let at = match after {
                Some(index) if index < items.len() => index + 1,
                Some(index) => {
                    return Err(EditError::ListIndexOutOfRange {
                        id: id.to_string(),
                        index,
                    });
                }
                None => items.len(),
            };
            items.insert(at, String::new());
            Ok(())
        })
    }

    /// Removes one list item. Refuses to remove the last remaining item.
    pub fn remove_list_item(&self, id: &BlockId, index: usize) -> Self {
        or_unchanged(self.try_remove_list_item(id, index), self)
    }

    pub fn try_remove_list_item(&self, id: &BlockId, index: usize) -> Result<Self, EditError> {
        self.edit_list(id, |items| {
            if items.len() <= 1 {
                return Err(EditError::LastListItem { id: id.to_string() });
            }
            if index >= items.len() {
                return Err(EditError::ListIndexOutOfRange {
                    id: id.to_string(),
                    index,
                });
            }
            items.remove(index);
            Ok(())
        })
    }

    fn edit(
        &self,
        id: &BlockId,
        edit: impl FnOnce(&ContentBlock) -> Edit<ContentBlock>,
    ) -> Result<Self, EditError> {
        edit_first(&self.blocks, id.as_str(), edit)
            .map(Self::from_arcs)
            .ok_or_else(|| EditError::not_found(ItemKind::Block, id))
    }

    /// Runs `edit` over the items of a list block.
    fn edit_list(
        &self,
        id: &BlockId,
        edit: impl FnOnce(&mut Vec<String>) -> Result<(), EditError>,
    ) -> Result<Self, EditError> {
        let index = self.position(id)?;
        let block = &self.blocks[index];
        if !block.kind.is_list() {
            return Err(EditError::NotAList { id: id.to_string() });
        }

        let mut items = block.items().to_vec();
        edit(&mut items)?;

        let mut blocks = self.blocks.to_vec();
        blocks[index] = Arc::new(ContentBlock {
            list_items: Some(items),
            ..block.as_ref().clone()
        });
        Ok(Self::from_arcs(blocks))
    }
}

impl FromIterator<ContentBlock> for ContentDocument {
    fn from_iter<I: IntoIterator<Item = ContentBlock>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
