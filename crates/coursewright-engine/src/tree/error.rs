use std::fmt;

/// The kind of item an edit was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Category,
    Section,
    Subsection,
    Lesson,
    Block,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Category => "category",
            ItemKind::Section => "section",
            ItemKind::Subsection => "subsection",
            ItemKind::Lesson => "lesson",
            ItemKind::Block => "block",
        };
        f.write_str(name)
    }
}

/// Why a mutation left its input unchanged.
///
/// Only the `try_*` operations surface this; the plain operations log it at
/// debug level and hand back the input untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no {kind} with id {id}")]
    NotFound { kind: ItemKind, id: String },

    #[error("parent category {id} does not exist")]
    ParentNotFound { id: String },

    #[error("{kind} {id} is already at the {edge} edge")]
    AtBoundary {
        kind: ItemKind,
        id: String,
        edge: &'static str,
    },

    #[error("block {id} is not a list")]
    NotAList { id: String },

    #[error("list block {id} must keep at least one item")]
    LastListItem { id: String },

    #[error("list block {id} has no item at index {index}")]
    ListIndexOutOfRange { id: String, index: usize },
}

impl EditError {
    pub(crate) fn not_found(kind: ItemKind, id: impl AsRef<str>) -> Self {
        EditError::NotFound {
            kind,
            id: id.as_ref().to_string(),
        }
    }
}

/// Collapses a `try_*` result into the silent no-op contract.
pub(crate) fn or_unchanged<T: Clone>(result: Result<T, EditError>, unchanged: &T) -> T {
    result.unwrap_or_else(|err| {
        log::debug!("{err}; leaving content unchanged");
        unchanged.clone()
    })
}
