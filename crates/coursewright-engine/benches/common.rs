// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use coursewright_engine::{BlockKind, ContentBlock, ContentDocument};

#[allow(dead_code)]
pub fn generate_document(sections: usize) -> ContentDocument {
    let mut blocks = Vec::with_capacity(sections * 6);
    for section in 0..sections {
        blocks.push(ContentBlock::text(
            BlockKind::Heading2,
            format!("Section {section}"),
        ));
        blocks.push(ContentBlock::text(
            BlockKind::Paragraph,
            "Some paragraph content with <angle brackets> & entities. This helps create realistic document structure for benchmarking.",
        ));
        blocks.push(ContentBlock::list(
            BlockKind::List,
            (0..3).map(|i| format!("Item {i} of {section}")).collect(),
        ));
        if section % 3 == 0 {
            blocks.push(ContentBlock::code(
                "rust",
                "fn benchmark_function() {\n    let value = 42;\n    println!(\"{}\", value);\n}\n",
                "bench.rs",
            ));
        }
        blocks.push(ContentBlock::image("diagram.png", "A diagram"));
        blocks.push(ContentBlock::divider());
    }
    blocks.into_iter().collect()
}

#[allow(dead_code)]
pub fn generate_messy_html(sections: usize) -> String {
    let base = "<div class=\"wrapper\"><h2>Title<p>Unclosed paragraph <b>bold</b><ul><li>one<li>two</ul><!-- note --><span>loose</span></div>\n";
    base.repeat(sections)
}
