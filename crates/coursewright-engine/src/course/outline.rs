use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::model::{
    CourseSection, CourseSubsection, DEFAULT_LESSON_TITLE, DEFAULT_SECTION_TITLE,
    DEFAULT_SUBSECTION_TITLE, Lesson, LessonPatch, Level,
};
use crate::blocks::ContentDocument;
use crate::ids::CourseItemId;
use crate::tree::error::or_unchanged;
use crate::tree::path::{edit_first, replace_first, swap_adjacent};
use crate::tree::{Direction, Edit, EditError, ItemKind, Keyed};

/// A course curriculum: sections, each holding subsections, each holding
/// lessons.
///
/// Like the category forest, every operation returns a new outline sharing
/// whatever it did not touch, and a no-op hands back the same allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseOutline {
    sections: Arc<Vec<Arc<CourseSection>>>,
}

/// `order` for an item appended to a list of `len` items.
fn next_order(len: usize) -> u32 {
    u32::try_from(len).map_or(u32::MAX, |len| len.saturating_add(1))
}

fn move_in<T: Keyed>(items: &[Arc<T>], id: &str, direction: Direction) -> Option<Vec<Arc<T>>> {
    let index = items.iter().position(|item| item.key() == id)?;
    swap_adjacent(items, index, direction)
}

impl CourseOutline {
    pub fn new(sections: Vec<CourseSection>) -> Self {
        Self::from_arcs(sections.into_iter().map(Arc::new).collect())
    }

    fn from_arcs(sections: Vec<Arc<CourseSection>>) -> Self {
        Self {
            sections: Arc::new(sections),
        }
    }

    pub fn sections(&self) -> &[Arc<CourseSection>] {
        &self.sections
    }

    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sections, &other.sections)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn find_section(&self, id: &CourseItemId) -> Option<&Arc<CourseSection>> {
        self.sections.iter().find(|s| s.id == *id)
    }

    pub fn find_subsection(&self, id: &CourseItemId) -> Option<&Arc<CourseSubsection>> {
        self.sections
            .iter()
            .flat_map(|s| &s.subsections)
            .find(|ss| ss.id == *id)
    }

    pub fn find_lesson(&self, id: &CourseItemId) -> Option<&Arc<Lesson>> {
        self.sections
            .iter()
            .flat_map(|s| &s.subsections)
            .flat_map(|ss| &ss.lessons)
            .find(|l| l.id == *id)
    }

    pub fn contains(&self, id: &CourseItemId, level: Level) -> bool {
        match level {
            Level::Section => self.find_section(id).is_some(),
            Level::Subsection => self.find_subsection(id).is_some(),
            Level::Lesson => self.find_lesson(id).is_some(),
        }
    }

    pub fn add_section(&self, title: Option<&str>) -> Self {
        self.push_section(title).0
    }

    /// Appends a section and returns it along with its id.
    pub fn push_section(&self, title: Option<&str>) -> (Self, CourseItemId) {
        let id = CourseItemId::generate();
        let section = CourseSection::new(
            id.clone(),
            title.unwrap_or(DEFAULT_SECTION_TITLE),
            next_order(self.sections.len()),
        );
        let mut sections = self.sections.to_vec();
        sections.push(Arc::new(section));
        (Self::from_arcs(sections), id)
    }

    pub fn add_subsection(&self, section_id: &CourseItemId, title: Option<&str>) -> Self {
        let added = self
            .try_add_subsection(section_id, title)
            .map(|(outline, _)| outline);
        or_unchanged(added, self)
    }

    pub fn try_add_subsection(
        &self,
        section_id: &CourseItemId,
        title: Option<&str>,
    ) -> Result<(Self, CourseItemId), EditError> {
        let id = CourseItemId::generate();
        let title = title.unwrap_or(DEFAULT_SUBSECTION_TITLE);

        let sections = edit_first(&self.sections, section_id.as_str(), |section| {
            let subsection =
                CourseSubsection::new(id.clone(), title, next_order(section.subsections.len()));
            let mut subsections = section.subsections.clone();
            subsections.push(Arc::new(subsection));
            Edit::Replace(section.with_subsections(subsections))
        })
        .ok_or_else(|| EditError::not_found(ItemKind::Section, section_id))?;

        Ok((Self::from_arcs(sections), id))
    }

    pub fn add_lesson(
        &self,
        section_id: &CourseItemId,
        subsection_id: &CourseItemId,
        title: Option<&str>,
    ) -> Self {
        let added = self
            .try_add_lesson(section_id, subsection_id, title)
            .map(|(outline, _)| outline);
        or_unchanged(added, self)
    }

    /// Appends a lesson to `subsection_id`, which must belong to `section_id`.
    pub fn try_add_lesson(
        &self,
        section_id: &CourseItemId,
        subsection_id: &CourseItemId,
        title: Option<&str>,
    ) -> Result<(Self, CourseItemId), EditError> {
        let id = CourseItemId::generate();
        let title = title.unwrap_or(DEFAULT_LESSON_TITLE);

        let section = self
            .find_section(section_id)
            .ok_or_else(|| EditError::not_found(ItemKind::Section, section_id))?;
        let subsections = edit_first(&section.subsections, subsection_id.as_str(), |sub| {
            let lesson = Lesson::new(id.clone(), title, next_order(sub.lessons.len()));
            let mut lessons = sub.lessons.clone();
            lessons.push(Arc::new(lesson));
            Edit::Replace(sub.with_lessons(lessons))
        })
        .ok_or_else(|| EditError::not_found(ItemKind::Subsection, subsection_id))?;

        let updated = section.with_subsections(subsections);
        let sections = edit_first(&self.sections, section_id.as_str(), |_| {
            Edit::Replace(updated)
        })
        .ok_or_else(|| EditError::not_found(ItemKind::Section, section_id))?;

        Ok((Self::from_arcs(sections), id))
    }

    /// Retitles the first item at `level` with `id`. The level is never
    /// inferred from the id.
    pub fn update_title(&self, id: &CourseItemId, title: &str, level: Level) -> Self {
        or_unchanged(self.try_update_title(id, title, level), self)
    }

    pub fn try_update_title(
        &self,
        id: &CourseItemId,
        title: &str,
        level: Level,
    ) -> Result<Self, EditError> {
        let sections = match level {
            Level::Section => self.rewrite_sections(id, |s| {
                Edit::Replace(CourseSection {
                    title: title.to_string(),
                    ..s.clone()
                })
            }),
            Level::Subsection => self.rewrite_subsections(id, |ss| {
                Edit::Replace(CourseSubsection {
                    title: title.to_string(),
                    ..ss.clone()
                })
            }),
            Level::Lesson => self.rewrite_lessons(id, |l| {
                Edit::Replace(Lesson {
                    title: title.to_string(),
                    ..l.clone()
                })
            }),
        };
        self.finish(sections, id, level)
    }

    /// Deletes the item and everything below it. Sibling `order` values are
    /// left alone.
    pub fn delete_item(&self, id: &CourseItemId, level: Level) -> Self {
        or_unchanged(self.try_delete_item(id, level), self)
    }

    pub fn try_delete_item(&self, id: &CourseItemId, level: Level) -> Result<Self, EditError> {
        let sections = match level {
            Level::Section => self.rewrite_sections(id, |_| Edit::Remove),
            Level::Subsection => self.rewrite_subsections(id, |_| Edit::Remove),
            Level::Lesson => self.rewrite_lessons(id, |_| Edit::Remove),
        };
        self.finish(sections, id, level)
    }

    /// Swaps the item with its neighbour within the same parent. Moving past
    /// either end changes nothing.
    pub fn move_item(&self, id: &CourseItemId, level: Level, direction: Direction) -> Self {
        or_unchanged(self.try_move_item(id, level, direction), self)
    }

    pub fn try_move_item(
        &self,
        id: &CourseItemId,
        level: Level,
        direction: Direction,
    ) -> Result<Self, EditError> {
        let id_str = id.as_str();
        let sections = match level {
            Level::Section => move_in(&self.sections, id_str, direction),
            Level::Subsection => replace_first(&self.sections, |section| {
                move_in(&section.subsections, id_str, direction)
                    .map(|subsections| section.with_subsections(subsections))
            }),
            Level::Lesson => replace_first(&self.sections, |section| {
                replace_first(&section.subsections, |sub| {
                    move_in(&sub.lessons, id_str, direction).map(|lessons| sub.with_lessons(lessons))
                })
                .map(|subsections| section.with_subsections(subsections))
            }),
        };

        match sections {
            Some(sections) => Ok(Self::from_arcs(sections)),
            None if self.contains(id, level) => Err(EditError::AtBoundary {
                kind: level.into(),
                id: id.to_string(),
                edge: direction.edge(),
            }),
            None => Err(EditError::not_found(level.into(), id)),
        }
    }

    /// Overwrites the given lesson fields.
    pub fn update_lesson(&self, id: &CourseItemId, patch: &LessonPatch) -> Self {
        or_unchanged(self.try_update_lesson(id, patch), self)
    }

    pub fn try_update_lesson(
        &self,
        id: &CourseItemId,
        patch: &LessonPatch,
    ) -> Result<Self, EditError> {
        let sections = self.rewrite_lessons(id, |l| Edit::Replace(l.patched(patch)));
        self.finish(sections, id, Level::Lesson)
    }

    /// Stores `body` as the lesson's HTML content.
    pub fn set_lesson_body(&self, id: &CourseItemId, body: &ContentDocument) -> Self {
        or_unchanged(self.try_set_lesson_body(id, body), self)
    }

    pub fn try_set_lesson_body(
        &self,
        id: &CourseItemId,
        body: &ContentDocument,
    ) -> Result<Self, EditError> {
        let patch = LessonPatch {
            content: Some(body.to_html()),
            ..LessonPatch::default()
        };
        self.try_update_lesson(id, &patch)
    }

    /// The lesson's HTML content parsed into blocks.
    pub fn lesson_body(&self, id: &CourseItemId) -> Option<ContentDocument> {
        self.find_lesson(id)
            .map(|lesson| ContentDocument::from_html(&lesson.content))
    }

    /// A copy with every `order` set to its 1-based position.
    ///
    /// No other operation rewrites `order`; call this before persisting if
    /// the consumer relies on it.
    pub fn renumbered(&self) -> Self {
        let sections = self
            .sections
            .iter()
            .zip(1..)
            .map(|(section, order)| {
                let subsections = section
                    .subsections
                    .iter()
                    .zip(1..)
                    .map(|(sub, order)| {
                        let lessons = sub
                            .lessons
                            .iter()
                            .zip(1..)
                            .map(|(lesson, order)| Arc::new(Lesson { order, ..(**lesson).clone() }))
                            .collect();
                        Arc::new(CourseSubsection {
                            order,
                            ..sub.with_lessons(lessons)
                        })
                    })
                    .collect();
                Arc::new(CourseSection {
                    order,
                    ..section.with_subsections(subsections)
                })
            })
            .collect();
        Self::from_arcs(sections)
    }

    fn rewrite_sections(
        &self,
        id: &CourseItemId,
        edit: impl FnMut(&CourseSection) -> Edit<CourseSection>,
    ) -> Option<Vec<Arc<CourseSection>>> {
        edit_first(&self.sections, id.as_str(), edit)
    }

    fn rewrite_subsections(
        &self,
        id: &CourseItemId,
        mut edit: impl FnMut(&CourseSubsection) -> Edit<CourseSubsection>,
    ) -> Option<Vec<Arc<CourseSection>>> {
        replace_first(&self.sections, |section| {
            edit_first(&section.subsections, id.as_str(), &mut edit)
                .map(|subsections| section.with_subsections(subsections))
        })
    }

    fn rewrite_lessons(
        &self,
        id: &CourseItemId,
        mut edit: impl FnMut(&Lesson) -> Edit<Lesson>,
    ) -> Option<Vec<Arc<CourseSection>>> {
        replace_first(&self.sections, |section| {
            replace_first(&section.subsections, |sub| {
                edit_first(&sub.lessons, id.as_str(), &mut edit).map(|lessons| sub.with_lessons(lessons))
            })
            .map(|subsections| section.with_subsections(subsections))
        })
    }

    fn finish(
        &self,
        sections: Option<Vec<Arc<CourseSection>>>,
        id: &CourseItemId,
        level: Level,
    ) -> Result<Self, EditError> {
        sections
            .map(Self::from_arcs)
            .ok_or_else(|| EditError::not_found(level.into(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockKind, ContentBlock};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct Sample {
        outline: CourseOutline,
        section: CourseItemId,
        subsection: CourseItemId,
        lessons: [CourseItemId; 3],
    }

    /// One section, one subsection, three lessons.
    fn sample() -> Sample {
        let (outline, section) = CourseOutline::default().push_section(Some("Basics"));
        let (outline, subsection) = outline
            .try_add_subsection(&section, Some("Setup"))
            .unwrap();
        let (outline, a) = outline
            .try_add_lesson(&section, &subsection, Some("A"))
            .unwrap();
        let (outline, b) = outline
            .try_add_lesson(&section, &subsection, Some("B"))
            .unwrap();
        let (outline, c) = outline
            .try_add_lesson(&section, &subsection, Some("C"))
            .unwrap();
        Sample {
            outline,
            section,
            subsection,
            lessons: [a, b, c],
        }
    }

    fn lesson_titles(outline: &CourseOutline) -> Vec<String> {
        outline.sections()[0].subsections[0]
            .lessons
            .iter()
            .map(|l| l.title.clone())
            .collect()
    }

    #[test]
    fn new_items_are_reachable_at_the_end() {
        let outline = CourseOutline::default().add_section(None);
        let section = outline.sections().last().unwrap().id.clone();
        let outline = outline.add_subsection(&section, None);
        let subsection = outline.sections().last().unwrap().subsections.last().unwrap().id.clone();
        let outline = outline.add_lesson(&section, &subsection, None);

        let lesson = outline.sections().last().unwrap().subsections.last().unwrap().lessons.last().unwrap();
        assert_eq!(lesson.title, DEFAULT_LESSON_TITLE);
        assert_eq!(outline.sections()[0].title, DEFAULT_SECTION_TITLE);
        assert_eq!(outline.sections()[0].subsections[0].title, DEFAULT_SUBSECTION_TITLE);
    }

    #[test]
    fn order_is_length_plus_one() {
        let s = sample();
        let orders: Vec<u32> = s.outline.sections()[0].subsections[0]
            .lessons
            .iter()
            .map(|l| l.order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);

        let outline = s.outline.add_section(None);
        assert_eq!(outline.sections()[1].order, 2);
    }

    #[test]
    fn add_lesson_checks_both_parents() {
        let s = sample();
        let missing = CourseItemId::from("nope");

        assert_eq!(
            s.outline.try_add_lesson(&missing, &s.subsection, None).unwrap_err(),
            EditError::not_found(ItemKind::Section, "nope")
        );
        assert_eq!(
            s.outline.try_add_lesson(&s.section, &missing, None).unwrap_err(),
            EditError::not_found(ItemKind::Subsection, "nope")
        );
        assert!(s.outline.add_lesson(&s.section, &missing, None).same_as(&s.outline));
    }

    #[test]
    fn add_lesson_rejects_subsection_of_another_section() {
        let s = sample();
        let (outline, other) = s.outline.push_section(Some("Other"));
        assert!(outline.try_add_lesson(&other, &s.subsection, None).is_err());
    }

    #[rstest]
    #[case(Level::Section)]
    #[case(Level::Subsection)]
    #[case(Level::Lesson)]
    fn update_title_at_each_level(#[case] level: Level) {
        let s = sample();
        let id = match level {
            Level::Section => s.section.clone(),
            Level::Subsection => s.subsection.clone(),
            Level::Lesson => s.lessons[1].clone(),
        };

        let outline = s.outline.update_title(&id, "Renamed", level);
        let title = match level {
            Level::Section => outline.find_section(&id).map(|x| x.title.clone()),
            Level::Subsection => outline.find_subsection(&id).map(|x| x.title.clone()),
            Level::Lesson => outline.find_lesson(&id).map(|x| x.title.clone()),
        };
        assert_eq!(title.as_deref(), Some("Renamed"));
    }

    #[test]
    fn update_title_does_not_infer_level() {
        let s = sample();
        let outline = s.outline.update_title(&s.section, "Renamed", Level::Lesson);
        assert!(outline.same_as(&s.outline));
        assert_eq!(
            s.outline
                .try_update_title(&s.section, "Renamed", Level::Lesson)
                .unwrap_err(),
            EditError::not_found(ItemKind::Lesson, s.section.as_str())
        );
    }

    #[test]
    fn deleting_a_section_cascades() {
        let s = sample();
        let outline = s.outline.delete_item(&s.section, Level::Section);

        assert!(outline.is_empty());
        assert!(outline.find_subsection(&s.subsection).is_none());
        for lesson in &s.lessons {
            assert!(outline.find_lesson(lesson).is_none());
        }
    }

    #[test]
    fn deleting_a_subsection_cascades_to_lessons() {
        let s = sample();
        let outline = s.outline.delete_item(&s.subsection, Level::Subsection);
        assert!(outline.sections()[0].subsections.is_empty());
        assert!(outline.find_lesson(&s.lessons[0]).is_none());
    }

    #[test]
    fn delete_keeps_sibling_order_values() {
        let s = sample();
        let outline = s.outline.delete_item(&s.lessons[0], Level::Lesson);
        let orders: Vec<u32> = outline.sections()[0].subsections[0]
            .lessons
            .iter()
            .map(|l| l.order)
            .collect();
        assert_eq!(orders, vec![2, 3]);
        assert_eq!(lesson_titles(&outline), vec!["B", "C"]);
    }

    #[test]
    fn move_lessons() {
        let s = sample();
        let outline = s.outline.move_item(&s.lessons[2], Level::Lesson, Direction::Up);
        assert_eq!(lesson_titles(&outline), vec!["A", "C", "B"]);

        let outline = outline.move_item(&s.lessons[0], Level::Lesson, Direction::Down);
        assert_eq!(lesson_titles(&outline), vec!["C", "A", "B"]);
    }

    #[rstest]
    #[case(0, Direction::Up, "top")]
    #[case(2, Direction::Down, "bottom")]
    fn move_past_the_edge_is_a_no_op(
        #[case] index: usize,
        #[case] direction: Direction,
        #[case] edge: &'static str,
    ) {
        let s = sample();
        let id = &s.lessons[index];

        assert!(s.outline.move_item(id, Level::Lesson, direction).same_as(&s.outline));
        assert_eq!(
            s.outline.try_move_item(id, Level::Lesson, direction).unwrap_err(),
            EditError::AtBoundary {
                kind: ItemKind::Lesson,
                id: id.to_string(),
                edge,
            }
        );
    }

    #[test]
    fn move_sections() {
        let s = sample();
        let (outline, second) = s.outline.push_section(Some("Second"));
        let outline = outline.move_item(&second, Level::Section, Direction::Up);
        let titles: Vec<&str> = outline.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "Basics"]);
    }

    #[test]
    fn move_shares_untouched_sections() {
        let s = sample();
        let (outline, other) = s.outline.push_section(Some("Other"));
        let moved = outline.move_item(&s.lessons[1], Level::Lesson, Direction::Up);
        assert!(Arc::ptr_eq(
            &outline.sections()[1],
            &moved.sections()[1]
        ));
        assert_eq!(moved.sections()[1].id, other);
    }

    #[test]
    fn update_lesson_fields() {
        let s = sample();
        let outline = s.outline.update_lesson(
            &s.lessons[0],
            &LessonPatch {
                duration: Some(10),
                ..LessonPatch::default()
            },
        );
        let lesson = outline.find_lesson(&s.lessons[0]).unwrap();
        assert_eq!(lesson.duration, 10);
        assert_eq!(lesson.title, "A");
    }

    #[test]
    fn lesson_body_round_trips_through_html() {
        let s = sample();
        let body: ContentDocument = vec![
            ContentBlock::text(BlockKind::Heading1, "Welcome"),
            ContentBlock::text(BlockKind::Paragraph, "Let's go"),
        ]
        .into_iter()
        .collect();

        let outline = s.outline.set_lesson_body(&s.lessons[1], &body);
        let lesson = outline.find_lesson(&s.lessons[1]).unwrap();
        assert!(lesson.content.starts_with("<h1>Welcome</h1>"));

        let back = outline.lesson_body(&s.lessons[1]).unwrap();
        let kinds: Vec<BlockKind> = back.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BlockKind::Heading1, BlockKind::Paragraph]);
        assert_eq!(back.iter().nth(1).map(|b| b.content.as_str()), Some("Let's go"));
    }

    #[test]
    fn renumbered_follows_position() {
        let s = sample();
        let outline = s
            .outline
            .delete_item(&s.lessons[0], Level::Lesson)
            .move_item(&s.lessons[2], Level::Lesson, Direction::Up)
            .renumbered();

        let lessons = &outline.sections()[0].subsections[0].lessons;
        let pairs: Vec<(&str, u32)> = lessons.iter().map(|l| (l.title.as_str(), l.order)).collect();
        assert_eq!(pairs, vec![("C", 1), ("B", 2)]);
    }

    #[test]
    fn json_is_a_plain_section_array() {
        let s = sample();
        let json = serde_json::to_value(&s.outline).unwrap();
        assert!(json.is_array());
        let back: CourseOutline = serde_json::from_value(json).unwrap();
        assert_eq!(back, s.outline);
    }
}
