use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::model::{Category, CategorySettings};
use crate::ids::CategoryId;
use crate::tree::error::or_unchanged;
use crate::tree::path::{edit_deep, find_deep, path_to};
use crate::tree::{Edit, EditError, ItemKind, Recursive};

/// The full set of root categories and their descendants.
///
/// Every operation returns a new forest. When an operation changes nothing
/// the returned forest shares its root list with the input, so
/// [`CategoryForest::same_as`] is a cheap "did anything change" check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryForest {
    roots: Arc<Vec<Arc<Category>>>,
}

impl CategoryForest {
    pub fn new(roots: Vec<Category>) -> Self {
        Self::from_arcs(roots.into_iter().map(Arc::new).collect())
    }

    fn from_arcs(roots: Vec<Arc<Category>>) -> Self {
        Self {
            roots: Arc::new(roots),
        }
    }

    pub fn roots(&self) -> &[Arc<Category>] {
        &self.roots
    }

    /// True when both forests share the same root list allocation.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.roots, &other.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of categories at every depth.
    pub fn len(&self) -> usize {
        self.walk().len()
    }

    pub fn find(&self, id: &CategoryId) -> Option<&Arc<Category>> {
        find_deep(&self.roots, id.as_str())
    }

    /// Ids from a root down to `id`, inclusive. Handy for breadcrumbs.
    pub fn path_to(&self, id: &CategoryId) -> Option<Vec<CategoryId>> {
        path_to(&self.roots, id.as_str())
            .map(|keys| keys.into_iter().map(CategoryId::from).collect())
    }

    /// Every category in pre-order paired with its depth (roots are depth 0).
    pub fn walk(&self) -> Vec<(usize, &Arc<Category>)> {
        fn visit<'a>(
            nodes: &'a [Arc<Category>],
            depth: usize,
            out: &mut Vec<(usize, &'a Arc<Category>)>,
        ) {
            for node in nodes {
                out.push((depth, node));
                visit(node.children(), depth + 1, out);
            }
        }

        let mut out = Vec::new();
        visit(&self.roots, 0, &mut out);
        out
    }

    /// Appends a new category under `parent_id`, or as a root when `None`.
    ///
    /// An unknown parent leaves the forest unchanged.
    pub fn add_category(
        &self,
        parent_id: Option<&CategoryId>,
        name: &str,
        description: Option<&str>,
    ) -> Self {
        let added = self
            .try_add_category(parent_id, name, description)
            .map(|(forest, _)| forest);
        or_unchanged(added, self)
    }

    /// Like [`add_category`](Self::add_category) but reports the new id, or
    /// [`EditError::ParentNotFound`] for an unknown parent.
    pub fn try_add_category(
        &self,
        parent_id: Option<&CategoryId>,
        name: &str,
        description: Option<&str>,
    ) -> Result<(Self, CategoryId), EditError> {
        let category = Category::new(
            parent_id.cloned(),
            name,
            description.map(str::to_string),
        );
        let id = category.id.clone();

        let roots = match parent_id {
            None => {
                let mut roots = self.roots.to_vec();
                roots.push(Arc::new(category));
                roots
            }
            Some(parent_id) => edit_deep(&self.roots, parent_id.as_str(), |parent| {
                Edit::Replace(parent.with_child(category))
            })
            .ok_or_else(|| EditError::ParentNotFound {
                id: parent_id.to_string(),
            })?,
        };

        Ok((Self::from_arcs(roots), id))
    }

    /// Renames the category with `id` wherever it sits in the forest.
    pub fn update_category(&self, id: &CategoryId, name: &str, description: Option<&str>) -> Self {
        or_unchanged(self.try_update_category(id, name, description), self)
    }

    pub fn try_update_category(
        &self,
        id: &CategoryId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, EditError> {
        self.edit(id, |node| {
            Edit::Replace(node.touched(|c| {
                c.name = name.to_string();
                c.description = description.map(str::to_string);
            }))
        })
    }

    /// Replaces the settings of the category with `id`.
    pub fn update_category_settings(&self, id: &CategoryId, settings: CategorySettings) -> Self {
        or_unchanged(self.try_update_category_settings(id, settings), self)
    }

    pub fn try_update_category_settings(
        &self,
        id: &CategoryId,
        settings: CategorySettings,
    ) -> Result<Self, EditError> {
        self.edit(id, |node| Edit::Replace(node.touched(|c| c.settings = settings)))
    }

    /// Removes the category with `id` together with its whole subtree.
    pub fn delete_category(&self, id: &CategoryId) -> Self {
        or_unchanged(self.try_delete_category(id), self)
    }

    pub fn try_delete_category(&self, id: &CategoryId) -> Result<Self, EditError> {
        self.edit(id, |_| Edit::Remove)
    }

    fn edit(
        &self,
        id: &CategoryId,
        edit: impl FnOnce(&Category) -> Edit<Category>,
    ) -> Result<Self, EditError> {
        edit_deep(&self.roots, id.as_str(), edit)
            .map(Self::from_arcs)
            .ok_or_else(|| EditError::not_found(ItemKind::Category, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashSet;

    /// science -> (physics -> quantum), (chemistry); arts
    fn sample() -> (CategoryForest, [CategoryId; 5]) {
        let forest = CategoryForest::default();
        let (forest, science) = forest.try_add_category(None, "Science", None).unwrap();
        let (forest, arts) = forest.try_add_category(None, "Arts", Some("Humanities")).unwrap();
        let (forest, physics) = forest
            .try_add_category(Some(&science), "Physics", None)
            .unwrap();
        let (forest, chemistry) = forest
            .try_add_category(Some(&science), "Chemistry", None)
            .unwrap();
        let (forest, quantum) = forest
            .try_add_category(Some(&physics), "Quantum", None)
            .unwrap();
        (forest, [science, arts, physics, chemistry, quantum])
    }

    fn names(forest: &CategoryForest) -> Vec<(usize, String)> {
        forest
            .walk()
            .into_iter()
            .map(|(depth, c)| (depth, c.name.clone()))
            .collect()
    }

    #[test]
    fn add_builds_nested_structure() {
        let (forest, [science, _, physics, ..]) = sample();

        assert_eq!(
            names(&forest),
            vec![
                (0, "Science".to_string()),
                (1, "Physics".to_string()),
                (2, "Quantum".to_string()),
                (1, "Chemistry".to_string()),
                (0, "Arts".to_string()),
            ]
        );
        assert_eq!(forest.find(&physics).unwrap().parent_id, Some(science));
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn add_under_unknown_parent_is_a_silent_no_op() {
        let (forest, _) = sample();
        let ghost = CategoryId::from("ghost");

        let after = forest.add_category(Some(&ghost), "Orphan", None);
        assert!(after.same_as(&forest));

        let err = forest
            .try_add_category(Some(&ghost), "Orphan", None)
            .unwrap_err();
        assert_eq!(err, EditError::ParentNotFound { id: "ghost".into() });
    }

    #[test]
    fn update_renames_at_any_depth_and_bumps_timestamp() {
        let (forest, [.., quantum]) = sample();
        let before = forest.find(&quantum).unwrap().clone();

        let after = forest.update_category(&quantum, "Quantum Mechanics", Some("Small things"));
        let updated = after.find(&quantum).unwrap();

        assert_eq!(updated.name, "Quantum Mechanics");
        assert_eq!(updated.description.as_deref(), Some("Small things"));
        assert!(updated.updated_at >= before.updated_at);
        assert_eq!(updated.created_at, before.created_at);
    }

    #[test]
    fn update_shares_untouched_subtrees() {
        let (forest, [_, _, _, chemistry, quantum]) = sample();
        let after = forest.update_category(&quantum, "Q", None);

        assert!(!after.same_as(&forest));
        // Arts root untouched
        assert!(Arc::ptr_eq(&forest.roots()[1], &after.roots()[1]));
        // Chemistry is a sibling of the rewritten path
        assert!(Arc::ptr_eq(
            forest.find(&chemistry).unwrap(),
            after.find(&chemistry).unwrap()
        ));
    }

    #[rstest]
    #[case::update(|f: &CategoryForest, id: &CategoryId| f.update_category(id, "x", None))]
    #[case::settings(|f: &CategoryForest, id: &CategoryId| f.update_category_settings(id, CategorySettings::default()))]
    #[case::delete(|f: &CategoryForest, id: &CategoryId| f.delete_category(id))]
    fn unknown_id_returns_same_forest(
        #[case] op: fn(&CategoryForest, &CategoryId) -> CategoryForest,
    ) {
        let (forest, _) = sample();
        let after = op(&forest, &CategoryId::from("missing"));
        assert!(after.same_as(&forest));
    }

    #[test]
    fn try_variants_report_not_found() {
        let (forest, _) = sample();
        let missing = CategoryId::from("missing");
        let expected = EditError::NotFound {
            kind: ItemKind::Category,
            id: "missing".into(),
        };

        assert_eq!(forest.try_update_category(&missing, "x", None), Err(expected.clone()));
        assert_eq!(forest.try_delete_category(&missing), Err(expected));
    }

    #[test]
    fn update_settings_replaces_settings_only() {
        let (forest, [_, arts, ..]) = sample();
        let settings = CategorySettings {
            default_reviewer_group_id: Some("editors".into()),
            allowed_content_types: vec!["article".into()],
            auto_approval: true,
            ..Default::default()
        };

        let after = forest.update_category_settings(&arts, settings.clone());
        let node = after.find(&arts).unwrap();
        assert_eq!(node.settings, settings);
        assert_eq!(node.name, "Arts");
    }

    #[test]
    fn delete_discards_subtree() {
        let (forest, [science, arts, physics, _, quantum]) = sample();
        let after = forest.delete_category(&physics);

        assert!(after.find(&physics).is_none());
        assert!(after.find(&quantum).is_none());
        assert_eq!(after.find(&science).unwrap().children.len(), 1);
        assert!(Arc::ptr_eq(
            forest.find(&arts).unwrap(),
            after.find(&arts).unwrap()
        ));
        assert_eq!(after.len(), 3);
    }

    #[test]
    fn delete_root() {
        let (forest, [science, ..]) = sample();
        let after = forest.delete_category(&science);
        assert_eq!(names(&after), vec![(0, "Arts".to_string())]);
    }

    #[test]
    fn path_to_gives_breadcrumb() {
        let (forest, [science, _, physics, _, quantum]) = sample();
        assert_eq!(
            forest.path_to(&quantum),
            Some(vec![science, physics, quantum])
        );
    }

    #[test]
    fn ids_stay_unique_across_adds_and_deletes() {
        let mut forest = CategoryForest::default();
        let mut live: Vec<CategoryId> = Vec::new();

        for round in 0..40 {
            let parent = live.get(round % 7).cloned();
            let (next, id) = forest
                .try_add_category(parent.as_ref(), &format!("c{round}"), None)
                .unwrap();
            forest = next;
            live.push(id);

            if round % 5 == 4 {
                let victim = live[live.len() / 2].clone();
                forest = forest.delete_category(&victim);
            }

            live.retain(|id| forest.find(id).is_some());
            let all: Vec<_> = forest.walk().into_iter().map(|(_, c)| c.id.clone()).collect();
            let unique: HashSet<_> = all.iter().collect();
            assert_eq!(all.len(), unique.len(), "duplicate id after round {round}");
        }
    }

    #[test]
    fn serializes_as_plain_array() {
        let (forest, _) = sample();
        let json = serde_json::to_value(&forest).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 2);

        let back: CategoryForest = serde_json::from_value(json).unwrap();
        assert_eq!(back, forest);
    }
}
