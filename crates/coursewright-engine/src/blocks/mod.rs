//! # Content block model
//!
//! The typed, ordered document the editor works on before it is flattened to
//! HTML for storage.
//!
//! ## Modules
//!
//! - **`kinds`**: `BlockKind` and the `KINDS` table. Each entry names the
//!   payload shape and markup of one kind; block construction and the HTML
//!   transcoder both read from it, so a new kind is one table entry
//! - **`block`**: `ContentBlock`, `CodeData`, `BlockPatch`, default payloads
//! - **`document`**: `ContentDocument` and its copy-on-write operations
//! - **`commands`**: `BlockCmd`, the serializable form of those operations

pub mod block;
pub mod commands;
pub mod document;
pub mod kinds;

pub use block::{BlockDefaults, BlockPatch, CodeData, ContentBlock, PLAIN_TEXT_LANGUAGE};
pub use commands::BlockCmd;
pub use document::ContentDocument;
pub use kinds::{BlockKind, KINDS, KindInfo, Shape, UnknownBlockKind};
