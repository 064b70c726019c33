use std::collections::HashSet;

use coursewright_engine::{CourseItemId, CourseOutline, Level};

/// One visible row of the outline panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    pub depth: usize,
    pub id: CourseItemId,
    pub level: Level,
    pub title: String,
    pub has_children: bool,
    pub expanded: bool,
}

impl OutlineItem {
    pub fn is_folder(&self) -> bool {
        self.level != Level::Lesson
    }
}

/// Expand/collapse state for sections and subsections. Everything starts
/// collapsed.
#[derive(Debug, Default)]
pub struct OutlineView {
    expanded: HashSet<CourseItemId>,
}

impl OutlineView {
    pub fn is_expanded(&self, id: &CourseItemId) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &CourseItemId) {
        self.expanded.insert(id.clone());
    }

    pub fn collapse(&mut self, id: &CourseItemId) {
        self.expanded.remove(id);
    }

    pub fn toggle(&mut self, id: &CourseItemId) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
    }

    /// Flattens the outline into the rows currently visible.
    pub fn items(&self, outline: &CourseOutline) -> Vec<OutlineItem> {
        let mut items = Vec::new();

        for section in outline.sections() {
            let expanded = self.is_expanded(&section.id);
            items.push(OutlineItem {
                depth: 0,
                id: section.id.clone(),
                level: Level::Section,
                title: section.title.clone(),
                has_children: !section.subsections.is_empty(),
                expanded,
            });
            if !expanded {
                continue;
            }

            for subsection in &section.subsections {
                let expanded = self.is_expanded(&subsection.id);
                items.push(OutlineItem {
                    depth: 1,
                    id: subsection.id.clone(),
                    level: Level::Subsection,
                    title: subsection.title.clone(),
                    has_children: !subsection.lessons.is_empty(),
                    expanded,
                });
                if !expanded {
                    continue;
                }

                items.extend(subsection.lessons.iter().map(|lesson| OutlineItem {
                    depth: 2,
                    id: lesson.id.clone(),
                    level: Level::Lesson,
                    title: lesson.title.clone(),
                    has_children: false,
                    expanded: false,
                }));
            }
        }

        items
    }
}
