use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::CategoryId;
use crate::tree::{Keyed, Recursive};

/// Per-category publishing settings.
///
/// Fields beyond the three the editor understands are carried through
/// untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySettings {
    #[serde(default)]
    pub default_reviewer_group_id: Option<String>,
    #[serde(default)]
    pub allowed_content_types: Vec<String>,
    #[serde(default)]
    pub auto_approval: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A node of the category forest. Owns its children exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub children: Vec<Arc<Category>>,
    /// Opaque to the editor.
    #[serde(default)]
    pub user_groups: Vec<Value>,
    #[serde(default)]
    pub settings: CategorySettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// A fresh leaf category with default settings and a new id.
    pub fn new(
        parent_id: Option<CategoryId>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            description,
            parent_id,
            children: Vec::new(),
            user_groups: Vec::new(),
            settings: CategorySettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this node with `child` appended to its children.
    pub(crate) fn with_child(&self, child: Category) -> Self {
        let mut children = self.children.clone();
        children.push(Arc::new(child));
        self.with_children(children)
    }

    /// Copy of this node with `edit` applied and `updated_at` bumped.
    pub(crate) fn touched(&self, edit: impl FnOnce(&mut Category)) -> Self {
        let mut next = self.clone();
        edit(&mut next);
        next.updated_at = Utc::now();
        next
    }
}

impl Keyed for Category {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Recursive for Category {
    fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    fn with_children(&self, children: Vec<Arc<Self>>) -> Self {
        Category {
            children,
            ..self.clone()
        }
    }
}
