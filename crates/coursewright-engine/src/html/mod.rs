//! # HTML transcoder
//!
//! Converts block lists to and from a constrained HTML dialect, one
//! top-level element per block:
//!
//! | block            | markup                                                              |
//! |------------------|---------------------------------------------------------------------|
//! | paragraph        | `<p>text</p>`                                                       |
//! | heading1..3      | `<h1>`..`<h3>`                                                      |
//! | quote            | `<blockquote>text</blockquote>`                                     |
//! | code             | `<pre data-filename="f"><code class="language-L">code</code></pre>` |
//! | image            | `<figure><img src="u" alt="a"/><figcaption>a</figcaption></figure>` |
//! | list, ordered    | `<ul><li>..</li></ul>`, `<ol>..</ol>`                               |
//! | divider          | `<hr/>`                                                             |
//!
//! A language containing whitespace is also written verbatim to
//! `data-language` on `<code>`, with the class using `-` in its place.
//!
//! Serializing escapes all user text. Parsing is lenient: it accepts any
//! markup, repairs it the way a browser would, and degrades unmapped
//! top-level content to paragraphs of its text.
//!
//! For every well-formed block list, `parse(serialize(blocks))` gives back
//! the same blocks apart from ids.

mod cursor;
mod dom;
mod parse;
mod serialize;
mod tokenize;

pub use parse::parse;
pub use serialize::{block_html, serialize};

/// Prefix of the `<code>` class naming the language.
pub(crate) const LANGUAGE_PREFIX: &str = "language-";

/// Attribute on `<code>` carrying the language verbatim when it cannot be a
/// single class name.
pub(crate) const LANGUAGE_ATTR: &str = "data-language";

/// Attribute on `<pre>` carrying a code block's filename.
pub(crate) const FILENAME_ATTR: &str = "data-filename";
