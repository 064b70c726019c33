//! Reading and writing content files.
//!
//! A content directory holds `categories.json`, `course.json` and lesson or
//! article bodies as standalone HTML files. The engine itself never touches
//! the filesystem; these helpers are for tools built on top of it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::blocks::ContentDocument;
use crate::category::CategoryForest;
use crate::course::CourseOutline;

pub const CATEGORIES_FILE: &str = "categories.json";
pub const COURSE_FILE: &str = "course.json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    fs::write(path, content).map_err(IoError::Io)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, &text)
}

/// Reads an HTML body and parses it into blocks.
pub fn read_body(path: &Path) -> Result<ContentDocument, IoError> {
    read_file(path).map(|html| ContentDocument::from_html(&html))
}

/// Serializes `body` to HTML and writes it, with a trailing newline.
pub fn write_body(path: &Path, body: &ContentDocument) -> Result<(), IoError> {
    let mut html = body.to_html();
    if !html.is_empty() {
        html.push('\n');
    }
    write_file(path, &html)
}

pub fn load_categories(content_root: &Path) -> Result<CategoryForest, IoError> {
    read_json(&content_root.join(CATEGORIES_FILE))
}

pub fn save_categories(content_root: &Path, forest: &CategoryForest) -> Result<(), IoError> {
    write_json(&content_root.join(CATEGORIES_FILE), forest)
}

pub fn load_course(content_root: &Path) -> Result<CourseOutline, IoError> {
    read_json(&content_root.join(COURSE_FILE))
}

pub fn save_course(content_root: &Path, outline: &CourseOutline) -> Result<(), IoError> {
    write_json(&content_root.join(COURSE_FILE), outline)
}
