use coursewright_engine::{BlockKind, ContentBlock, ContentDocument};

/// Plain-text preview of a body, one entry per terminal line.
pub fn render_body(doc: &ContentDocument) -> Vec<String> {
    let mut lines = Vec::new();

    for block in doc.iter() {
        match block.kind {
            BlockKind::Heading1 | BlockKind::Heading2 | BlockKind::Heading3 => {
                let level = match block.kind {
                    BlockKind::Heading1 => 1,
                    BlockKind::Heading2 => 2,
                    _ => 3,
                };
                lines.push(format!("{} {}", "#".repeat(level), block.content));
            }
            BlockKind::Paragraph => lines.extend(block.content.lines().map(str::to_string)),
            BlockKind::Quote => {
                lines.extend(block.content.lines().map(|line| format!("> {line}")));
            }
            BlockKind::Code => {
                let data = block.code_data.clone().unwrap_or_default();
                let header = if data.filename.is_empty() {
                    format!("```{}", data.language)
                } else {
                    format!("```{} ({})", data.language, data.filename)
                };
                lines.push(header);
                lines.extend(data.code.lines().map(str::to_string));
                lines.push("```".to_string());
            }
            BlockKind::Image => lines.push(format!(
                "[image: {}] {}",
                block.image_alt.as_deref().unwrap_or_default(),
                block.image_url.as_deref().unwrap_or_default()
            )),
            BlockKind::List => {
                lines.extend(block.items().iter().map(|item| format!("• {item}")));
            }
            BlockKind::OrderedList => lines.extend(
                block
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{}. {item}", i + 1)),
            ),
            BlockKind::Divider => lines.push("---".to_string()),
        }
        lines.push(String::new());
    }

    lines
}

/// A one-line description of a block for listings.
pub fn summary(block: &ContentBlock) -> String {
    match block.kind {
        BlockKind::Code => {
            let data = block.code_data.clone().unwrap_or_default();
            let lines = data.code.lines().count();
            if data.filename.is_empty() {
                format!("{} ({lines} lines)", data.language)
            } else {
                format!("{} {} ({lines} lines)", data.language, data.filename)
            }
        }
        BlockKind::Image => block.image_url.clone().unwrap_or_default(),
        BlockKind::List | BlockKind::OrderedList => block.items().join(" | "),
        BlockKind::Divider => String::new(),
        _ => block.content.lines().next().unwrap_or_default().to_string(),
    }
}
