//! # Category tree engine
//!
//! Copy-on-write CRUD over the n-ary category forest. Nodes are located by id
//! at any depth; unknown ids leave the forest untouched (see the `try_*`
//! operations for an explicit result).

pub mod forest;
pub mod model;
pub mod state;

pub use forest::CategoryForest;
pub use model::{Category, CategorySettings};
pub use state::{CategoryAction, CategoryState};
