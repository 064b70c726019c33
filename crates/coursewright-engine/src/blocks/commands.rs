use serde::{Deserialize, Serialize};

use super::block::{BlockDefaults, BlockPatch};
use super::document::ContentDocument;
use super::kinds::BlockKind;
use crate::ids::BlockId;
use crate::tree::Direction;

/// An editor action against a [`ContentDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockCmd {
    AddBlock {
        kind: BlockKind,
        after: Option<BlockId>,
    },
    UpdateBlock {
        id: BlockId,
        patch: BlockPatch,
    },
    DeleteBlock {
        id: BlockId,
    },
    MoveBlock {
        id: BlockId,
        direction: Direction,
    },
    DuplicateBlock {
        id: BlockId,
    },
    UpdateListItem {
        id: BlockId,
        index: usize,
        text: String,
    },
    AddListItem {
        id: BlockId,
        after: Option<usize>,
    },
    RemoveListItem {
        id: BlockId,
        index: usize,
    },
}

impl ContentDocument {
    /// Applies `cmd`, returning the next document.
    pub fn apply(&self, cmd: &BlockCmd, defaults: &BlockDefaults) -> Self {
        match cmd {
            BlockCmd::AddBlock { kind, after } => {
                self.add_block_with(*kind, after.as_ref(), defaults)
            }
            BlockCmd::UpdateBlock { id, patch } => self.update_block(id, patch),
            BlockCmd::DeleteBlock { id } => self.delete_block(id),
            BlockCmd::MoveBlock { id, direction } => self.move_block(id, *direction),
            BlockCmd::DuplicateBlock { id } => self.duplicate_block(id),
            BlockCmd::UpdateListItem { id, index, text } => {
                self.update_list_item(id, *index, text)
            }
            BlockCmd::AddListItem { id, after } => self.add_list_item(id, *after),
            BlockCmd::RemoveListItem { id, index } => self.remove_list_item(id, *index),
        }
    }
}
