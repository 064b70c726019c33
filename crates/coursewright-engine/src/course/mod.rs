//! # Course hierarchy engine
//!
//! CRUD over the fixed Section → Subsection → Lesson outline. Callers name
//! the level they are targeting; deletes cascade to everything below.
//!
//! `order` is stamped as `len + 1` when an item is created and is otherwise
//! left alone. Position in the owning list is the real display order;
//! [`CourseOutline::renumbered`] brings the stored values back in line.

pub mod commands;
pub mod model;
pub mod outline;

pub use commands::CourseCmd;
pub use model::{CourseSection, CourseSubsection, Lesson, LessonPatch, Level};
pub use outline::CourseOutline;
