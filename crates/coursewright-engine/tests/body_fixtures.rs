use std::path::Path;

use coursewright_engine::{BlockKind, ContentDocument, io};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> ContentDocument {
    let path = format!("{}/tests/fixtures/{name}.html", env!("CARGO_MANIFEST_DIR"));
    io::read_body(Path::new(&path)).unwrap()
}

fn kinds(doc: &ContentDocument) -> Vec<BlockKind> {
    doc.iter().map(|block| block.kind).collect()
}

#[test]
fn fixture_legacy_article() {
    let doc = fixture("legacy_article");
    assert_eq!(
        kinds(&doc),
        vec![
            BlockKind::Heading1,
            BlockKind::Paragraph,
            BlockKind::Code,
            BlockKind::Paragraph,
            BlockKind::List,
            BlockKind::Image,
            BlockKind::Divider,
        ]
    );

    assert_snapshot!(doc.to_html(), @r#"
    <h1>Getting started</h1>
    <p>Install the toolchain first.</p>
    <pre><code class="language-bash">curl https://sh.rustup.rs | sh</code></pre>
    <p>Remember to restart your shell</p>
    <ul><li>rustc</li><li>cargo</li></ul>
    <figure><img src="rustup.png" alt="Rustup installer"/><figcaption>Rustup installer</figcaption></figure>
    <hr/>
    "#);
}

#[test]
fn fixture_broken_markup() {
    let doc = fixture("broken_markup");
    assert_snapshot!(doc.to_html(), @r#"
    <p>First paragraph</p>
    <p>Second paragraph with emphasis</p>
    <h2>Heading</h2>
    <ol><li>one</li><li>two</li></ol>
    <blockquote>Quote &amp; more</blockquote>
    <pre><code class="language-plaintext">plain preformatted</code></pre>
    <p>var x = &quot;&lt;p&gt;&quot;;</p>
    <p>loose trailing text</p>
    "#);
}

/// Normalizing an already normalized body changes nothing.
#[test]
fn normalization_is_idempotent() {
    for name in ["legacy_article", "broken_markup"] {
        let once = fixture(name).to_html();
        let twice = ContentDocument::from_html(&once).to_html();
        assert_eq!(once, twice, "{name}");
    }
}
