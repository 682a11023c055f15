//! Transpiler from exported note-system block markup to semantic HTML
pub mod ast;
pub mod config;
pub mod escape;
pub mod image;
pub mod inline;
pub mod outline;
pub mod parser;
pub mod renderer;

pub use ast::{BlockKind, Element, InlineKind, MarkupNode};
pub use config::{ConfigError, Options};
pub use escape::{escape_html, unescape_html};
pub use image::{rewrite_image_src, rewrite_image_src_with_prefix};
pub use outline::{OutlineEntry, extract_title, outline, summarize};
pub use parser::{ParseError, Parser};
pub use renderer::HtmlRenderer;

/// Parse block markup into a tree, best effort.
pub fn parse(raw: &str) -> Element {
    Parser::new(raw).parse()
}

/// Convert block markup to embeddable semantic HTML with default options.
///
/// Never fails: malformed input renders whatever could be parsed.
pub fn transform(raw: &str) -> String {
    transform_with(raw, &Options::default())
}

pub fn transform_with(raw: &str, options: &Options) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let root = parse(raw);
    HtmlRenderer::new(options.clone()).render(&root)
}
