//! # Copy-on-write tree helpers
//!
//! Shared plumbing for the category forest, the course outline and the block
//! list. Every structure keeps its child lists as `Vec<Arc<_>>`; a mutation
//! reallocates only the lists on the path from the root to the target and
//! shares everything else, so a state container can spot changed subtrees
//! with `Arc::ptr_eq` instead of deep comparison.
//!
//! ## Modules
//!
//! - **`path`**: locate-and-replace helpers (`edit_first`, `replace_first`,
//!   `edit_deep`) plus lookups and adjacent swaps
//! - **`error`**: `EditError`, the reason a `try_*` mutation changed nothing

pub mod error;
pub mod path;

use serde::{Deserialize, Serialize};

pub use error::{EditError, ItemKind};
pub use path::{Edit, Keyed, Recursive};

/// Direction for adjacent-sibling moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub(crate) fn edge(self) -> &'static str {
        match self {
            Direction::Up => "top",
            Direction::Down => "bottom",
        }
    }
}
