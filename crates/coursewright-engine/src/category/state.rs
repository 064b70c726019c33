use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::forest::CategoryForest;
use super::model::{Category, CategorySettings};
use crate::ids::CategoryId;

/// An edit request against the category editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CategoryAction {
    /// Replace the whole forest, e.g. after fetching it from the Content API.
    SetCategories { forest: CategoryForest },
    #[serde(rename_all = "camelCase")]
    AddCategory {
        parent_id: Option<CategoryId>,
        name: String,
        description: Option<String>,
    },
    UpdateCategory {
        id: CategoryId,
        name: String,
        description: Option<String>,
    },
    UpdateCategorySettings {
        id: CategoryId,
        settings: CategorySettings,
    },
    DeleteCategory { id: CategoryId },
    SelectCategory { id: Option<CategoryId> },
}

/// Category forest plus the editor's current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryState {
    pub forest: CategoryForest,
    pub selected: Option<CategoryId>,
}

impl CategoryState {
    pub fn new(forest: CategoryForest) -> Self {
        Self {
            forest,
            selected: None,
        }
    }

    /// Applies `action`, returning the next state.
    ///
    /// `SelectCategory` stores the id as given. Deleting the selected
    /// category or one of its ancestors clears the selection.
    pub fn apply(&self, action: CategoryAction) -> Self {
        let (forest, selected) = match action {
            CategoryAction::SetCategories { forest } => (forest, self.selected.clone()),
            CategoryAction::AddCategory {
                parent_id,
                name,
                description,
            } => (
                self.forest
                    .add_category(parent_id.as_ref(), &name, description.as_deref()),
                self.selected.clone(),
            ),
            CategoryAction::UpdateCategory {
                id,
                name,
                description,
            } => (
                self.forest
                    .update_category(&id, &name, description.as_deref()),
                self.selected.clone(),
            ),
            CategoryAction::UpdateCategorySettings { id, settings } => (
                self.forest.update_category_settings(&id, settings),
                self.selected.clone(),
            ),
            CategoryAction::DeleteCategory { id } => {
                let forest = self.forest.delete_category(&id);
                let selected = self
                    .selected
                    .clone()
                    .filter(|selected| forest.find(selected).is_some());
                (forest, selected)
            }
            CategoryAction::SelectCategory { id } => (self.forest.clone(), id),
        };

        Self { forest, selected }
    }

    /// The selected category, if the selection names one in the forest.
    pub fn selected_category(&self) -> Option<&Arc<Category>> {
        self.selected.as_ref().and_then(|id| self.forest.find(id))
    }
}
