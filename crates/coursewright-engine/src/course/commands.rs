use serde::{Deserialize, Serialize};

use super::model::{LessonPatch, Level};
use super::outline::CourseOutline;
use crate::ids::CourseItemId;
use crate::tree::Direction;

/// An editor action against a [`CourseOutline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CourseCmd {
    SetCourse {
        outline: CourseOutline,
    },
    AddSection {
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AddSubsection {
        section_id: CourseItemId,
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AddLesson {
        section_id: CourseItemId,
        subsection_id: CourseItemId,
        title: Option<String>,
    },
    UpdateTitle {
        id: CourseItemId,
        title: String,
        level: Level,
    },
    DeleteItem {
        id: CourseItemId,
        level: Level,
    },
    MoveItem {
        id: CourseItemId,
        level: Level,
        direction: Direction,
    },
    UpdateLesson {
        id: CourseItemId,
        patch: LessonPatch,
    },
}

impl CourseOutline {
    pub fn apply(&self, cmd: &CourseCmd) -> Self {
        match cmd {
            CourseCmd::SetCourse { outline } => outline.clone(),
            CourseCmd::AddSection { title } => self.add_section(title.as_deref()),
            CourseCmd::AddSubsection { section_id, title } => {
                self.add_subsection(section_id, title.as_deref())
            }
            CourseCmd::AddLesson {
                section_id,
                subsection_id,
                title,
            } => self.add_lesson(section_id, subsection_id, title.as_deref()),
            CourseCmd::UpdateTitle { id, title, level } => self.update_title(id, title, *level),
            CourseCmd::DeleteItem { id, level } => self.delete_item(id, *level),
            CourseCmd::MoveItem {
                id,
                level,
                direction,
            } => self.move_item(id, *level, *direction),
            CourseCmd::UpdateLesson { id, patch } => self.update_lesson(id, patch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn commands_deserialize_from_editor_json() {
        let cmd: CourseCmd = serde_json::from_value(serde_json::json!({
            "type": "addLesson",
            "sectionId": "s1",
            "subsectionId": "ss1",
            "title": null
        }))
        .unwrap();

        assert_eq!(
            cmd,
            CourseCmd::AddLesson {
                section_id: "s1".into(),
                subsection_id: "ss1".into(),
                title: None,
            }
        );
    }

    #[test]
    fn replaying_commands_builds_an_outline() {
        let outline = CourseOutline::default().apply(&CourseCmd::AddSection {
            title: Some("Basics".into()),
        });
        let section_id = outline.sections()[0].id.clone();
        let outline = outline
            .apply(&CourseCmd::AddSubsection {
                section_id: section_id.clone(),
                title: None,
            })
            .apply(&CourseCmd::UpdateTitle {
                id: section_id.clone(),
                title: "Fundamentals".into(),
                level: Level::Section,
            });

        assert_eq!(outline.sections()[0].title, "Fundamentals");
        assert_eq!(outline.sections()[0].subsections.len(), 1);

        let emptied = outline.apply(&CourseCmd::DeleteItem {
            id: section_id,
            level: Level::Section,
        });
        assert!(emptied.is_empty());
    }

    #[test]
    fn unknown_targets_leave_the_outline_alone() {
        let outline = CourseOutline::default().add_section(None);
        let next = outline.apply(&CourseCmd::DeleteItem {
            id: "missing".into(),
            level: Level::Subsection,
        });
        assert!(next.same_as(&outline));
    }
}
