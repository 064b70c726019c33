use std::sync::Arc;

use super::Direction;

/// Anything addressable by a string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// A node that owns an ordered list of nodes of its own type.
pub trait Recursive: Keyed + Clone {
    fn children(&self) -> &[Arc<Self>];

    /// Returns a copy of this node with `children` swapped in.
    fn with_children(&self, children: Vec<Arc<Self>>) -> Self;
}

/// What to do with the node a path search lands on.
pub enum Edit<T> {
    Replace(T),
    Remove,
}

/// Applies `edit` at `index`, copying the list but reusing every other `Arc`.
fn splice<T>(items: &[Arc<T>], index: usize, edit: Edit<T>) -> Vec<Arc<T>> {
    let mut out = items.to_vec();
    match edit {
        Edit::Replace(node) => out[index] = Arc::new(node),
        Edit::Remove => {
            out.remove(index);
        }
    }
    out
}

/// Edits the first item of a flat list whose key matches.
///
/// Returns `None` when nothing matched, so callers can hand back the original
/// list and keep its identity.
pub fn edit_first<T: Keyed>(
    items: &[Arc<T>],
    key: &str,
    edit: impl FnOnce(&T) -> Edit<T>,
) -> Option<Vec<Arc<T>>> {
    let index = items.iter().position(|item| item.key() == key)?;
    let replacement = edit(&items[index]);
    Some(splice(items, index, replacement))
}

/// Replaces the first item for which `rewrite` produces a new value.
///
/// This is the step used to descend one level in a fixed-depth hierarchy:
/// `rewrite` searches the item's children and rebuilds the item when it found
/// something.
pub fn replace_first<T>(
    items: &[Arc<T>],
    mut rewrite: impl FnMut(&T) -> Option<T>,
) -> Option<Vec<Arc<T>>> {
    items
        .iter()
        .enumerate()
        .find_map(|(index, item)| rewrite(item).map(|node| (index, node)))
        .map(|(index, node)| splice(items, index, Edit::Replace(node)))
}

/// Locates a node by key at any depth (pre-order) and edits it.
///
/// Only the nodes on the path from the list to the target are reallocated;
/// every untouched subtree is shared with the input.
pub fn edit_deep<T, F>(items: &[Arc<T>], key: &str, edit: F) -> Option<Vec<Arc<T>>>
where
    T: Recursive,
    F: FnOnce(&T) -> Edit<T>,
{
    let mut edit = Some(edit);
    edit_deep_inner(items, key, &mut edit)
}

fn edit_deep_inner<T, F>(items: &[Arc<T>], key: &str, edit: &mut Option<F>) -> Option<Vec<Arc<T>>>
where
    T: Recursive,
    F: FnOnce(&T) -> Edit<T>,
{
    for (index, item) in items.iter().enumerate() {
        if item.key() == key {
            let edit = edit.take()?;
            return Some(splice(items, index, edit(item)));
        }
        if let Some(children) = edit_deep_inner(item.children(), key, edit) {
            return Some(splice(
                items,
                index,
                Edit::Replace(item.with_children(children)),
            ));
        }
    }
    None
}

/// Finds a node by key at any depth (pre-order).
pub fn find_deep<'a, T: Recursive>(items: &'a [Arc<T>], key: &str) -> Option<&'a Arc<T>> {
    items.iter().find_map(|item| {
        if item.key() == key {
            Some(item)
        } else {
            find_deep(item.children(), key)
        }
    })
}

/// Keys of the nodes from a root down to (and including) the node with `key`.
pub fn path_to<T: Recursive>(items: &[Arc<T>], key: &str) -> Option<Vec<String>> {
    items.iter().find_map(|item| {
        if item.key() == key {
            return Some(vec![item.key().to_string()]);
        }
        path_to(item.children(), key).map(|mut rest| {
            rest.insert(0, item.key().to_string());
            rest
        })
    })
}

/// Swaps the item at `index` with its neighbour in `direction`.
///
/// Returns `None` at either boundary.
pub fn swap_adjacent<T: Clone>(items: &[T], index: usize, direction: Direction) -> Option<Vec<T>> {
    let target = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => index + 1,
    };
    if target >= items.len() || index >= items.len() {
        return None;
    }
    let mut out = items.to_vec();
    out.swap(index, target);
    Some(out)
}
