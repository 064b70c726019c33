//! # coursewright engine
//!
//! The hierarchical content core of the authoring tools:
//!
//! - **`category`**: the n-ary category forest and its editor state
//! - **`course`**: the Section → Subsection → Lesson outline
//! - **`blocks`**: the typed block document edited before saving
//! - **`html`**: block document ↔ HTML body transcoding
//!
//! All operations are pure and copy-on-write: they return a new structure
//! that shares every untouched subtree with the old one.

pub mod blocks;
pub mod category;
pub mod course;
pub mod html;
pub mod ids;
pub mod io;
pub mod tree;

pub use blocks::{BlockCmd, BlockDefaults, BlockKind, BlockPatch, ContentBlock, ContentDocument};
pub use category::{CategoryAction, CategoryForest, CategoryState};
pub use course::{CourseCmd, CourseOutline, LessonPatch, Level};
pub use ids::{BlockId, CategoryId, CourseItemId};
pub use io::IoError;
pub use tree::{Direction, EditError, ItemKind};
