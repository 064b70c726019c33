use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::CourseItemId;
use crate::tree::{ItemKind, Keyed};

pub const DEFAULT_SECTION_TITLE: &str = "New Section";
pub const DEFAULT_SUBSECTION_TITLE: &str = "New Subsection";
pub const DEFAULT_LESSON_TITLE: &str = "New Lesson";

/// Which of the three outline levels an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Section,
    Subsection,
    Lesson,
}

impl From<Level> for ItemKind {
    fn from(level: Level) -> Self {
        match level {
            Level::Section => ItemKind::Section,
            Level::Subsection => ItemKind::Subsection,
            Level::Lesson => ItemKind::Lesson,
        }
    }
}

/// A single lesson. `content` holds the HTML body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: CourseItemId,
    pub title: String,
    /// Display rank at creation time. Informational only: position in the
    /// owning list is what counts.
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub content: String,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSubsection {
    pub id: CourseItemId,
    pub title: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub lessons: Vec<Arc<Lesson>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    pub id: CourseItemId,
    pub title: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub subsections: Vec<Arc<CourseSubsection>>,
}

impl Lesson {
    pub fn new(id: CourseItemId, title: impl Into<String>, order: u32) -> Self {
        Self {
            id,
            title: title.into(),
            order,
            content: String::new(),
            duration: 0,
            attachments: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn patched(&self, patch: &LessonPatch) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(content) = &patch.content {
            next.content = content.clone();
        }
        if let Some(duration) = patch.duration {
            next.duration = duration;
        }
        if let Some(attachments) = &patch.attachments {
            next.attachments = attachments.clone();
        }
        if let Some(tags) = &patch.tags {
            next.tags = tags.clone();
        }
        next
    }
}

impl CourseSubsection {
    pub fn new(id: CourseItemId, title: impl Into<String>, order: u32) -> Self {
        Self {
            id,
            title: title.into(),
            order,
            lessons: Vec::new(),
        }
    }

    pub(crate) fn with_lessons(&self, lessons: Vec<Arc<Lesson>>) -> Self {
        Self {
            lessons,
            ..self.clone()
        }
    }
}

impl CourseSection {
    pub fn new(id: CourseItemId, title: impl Into<String>, order: u32) -> Self {
        Self {
            id,
            title: title.into(),
            order,
            subsections: Vec::new(),
        }
    }

    pub(crate) fn with_subsections(&self, subsections: Vec<Arc<CourseSubsection>>) -> Self {
        Self {
            subsections,
            ..self.clone()
        }
    }
}

/// Lesson fields to overwrite; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub attachments: Option<Vec<Value>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

macro_rules! keyed_by_id {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                self.id.as_str()
            }
        })*
    };
}

keyed_by_id!(CourseSection, CourseSubsection, Lesson);
