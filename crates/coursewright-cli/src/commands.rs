use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use coursewright_config::Config;
use coursewright_engine::{
    BlockDefaults, BlockId, BlockKind, CategoryForest, ContentDocument, CourseOutline, IoError, io,
};

use crate::render::summary;

pub fn block_defaults(config: Option<&Config>) -> BlockDefaults {
    match config {
        Some(config) => BlockDefaults {
            code_language: config.editor.default_code_language.clone(),
        },
        None => BlockDefaults::default(),
    }
}

/// `blocks <file>`: one line per block with its id and type.
pub fn list_blocks(path: &Path, out: &mut impl Write) -> Result<()> {
    let doc = io::read_body(path)?;
    for (index, block) in doc.iter().enumerate() {
        writeln!(
            out,
            "{index:>3}  {:<40}  {:<12}  {}",
            block.id.as_str(),
            block.kind.name(),
            summary(block)
        )?;
    }
    Ok(())
}

/// `normalize <file>`: the body in canonical form.
pub fn normalize(path: &Path, out: &mut impl Write) -> Result<()> {
    let doc = io::read_body(path)?;
    writeln!(out, "{}", doc.to_html())?;
    Ok(())
}

/// `new-block <file> <type> [--after <id>]`: inserts a block and writes the
/// body back. A missing file starts an empty body.
pub fn new_block(
    path: &Path,
    kind: &str,
    after: Option<&str>,
    defaults: &BlockDefaults,
) -> Result<BlockId> {
    let kind: BlockKind = kind.parse()?;
    let doc = match io::read_body(path) {
        Ok(doc) => doc,
        Err(IoError::NotFound(_)) => ContentDocument::default(),
        Err(err) => return Err(err.into()),
    };

    let after = after.map(BlockId::from);
    let (doc, id) = doc
        .try_add_block_with(kind, after.as_ref(), defaults)
        .with_context(|| format!("cannot insert into {}", path.display()))?;
    io::write_body(path, &doc)?;
    log::info!("added {kind} block {id} to {}", path.display());
    Ok(id)
}

/// `tree`: the category forest and course outline under `content_path`.
pub fn print_tree(content_path: &Path, out: &mut impl Write) -> Result<()> {
    if !content_path.is_dir() {
        bail!("content path {} is not a directory", content_path.display());
    }

    match io::load_categories(content_path) {
        Ok(forest) => write_categories(&forest, out)?,
        Err(IoError::NotFound(path)) => log::warn!("no categories at {}", path.display()),
        Err(err) => return Err(err.into()),
    }

    match io::load_course(content_path) {
        Ok(outline) => write_outline(&outline, out)?,
        Err(IoError::NotFound(path)) => log::warn!("no course at {}", path.display()),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn write_categories(forest: &CategoryForest, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Categories ({})", forest.len())?;
    for (depth, category) in forest.walk() {
        writeln!(out, "{}- {} [{}]", "  ".repeat(depth + 1), category.name, category.id)?;
    }
    Ok(())
}

fn write_outline(outline: &CourseOutline, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Course")?;
    for (i, section) in outline.sections().iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, section.title)?;
        for (j, subsection) in section.subsections.iter().enumerate() {
            writeln!(out, "    {}.{}. {}", i + 1, j + 1, subsection.title)?;
            for lesson in &subsection.lessons {
                writeln!(out, "      - {} ({} min)", lesson.title, lesson.duration)?;
            }
        }
    }
    Ok(())
}
