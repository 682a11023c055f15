//! Document queries over a parsed block tree: heading outline, title and a
//! plain-text summary.

use serde::Serialize;

use crate::ast::{BlockKind, Element, MarkupNode};
use crate::renderer::{heading_id, heading_level};

/// One heading of a document, suitable for building a table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub level: u8,
    /// Same identifier the rendered heading carries, for deep links.
    pub id: Option<String>,
    pub text: String,
}

/// Every heading block in document order, wherever it is nested.
pub fn outline(root: &Element) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    collect_headings(root, &mut entries);
    entries
}

fn collect_headings(el: &Element, entries: &mut Vec<OutlineEntry>) {
    for child in el.child_elements() {
        if child.block_kind() == BlockKind::Heading {
            entries.push(OutlineEntry {
                level: heading_level(child),
                id: heading_id(child).map(str::to_string),
                text: heading_text(child).unwrap_or_default(),
            });
        } else {
            collect_headings(child, entries);
        }
    }
}

/// Document title: the first heading block's text, falling back to the
/// first semantic `h1`-`h3` element.
pub fn extract_title(root: &Element) -> Option<String> {
    if let Some(heading) = root.find_descendant(|e| e.block_kind() == BlockKind::Heading)
        && let Some(text) = heading_text(heading)
    {
        return Some(text);
    }
    root.find_descendant(|e| matches!(e.tag.as_str(), "h1" | "h2" | "h3"))
        .map(|h| h.text_content().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn heading_text(heading: &Element) -> Option<String> {
    let text = heading.editable_region()?.text_content().trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Plain text of the whole document with whitespace collapsed, cut to
/// `max_chars` characters plus `...` when longer.
///
/// ```
/// use blockmark::{parse, summarize};
///
/// let root = parse(r#"<div data-type="NodeParagraph"><div contenteditable="true">Hello   world</div></div>"#);
/// assert_eq!(summarize(&root, 100), "Hello world");
/// assert_eq!(summarize(&root, 5), "Hello...");
/// ```
pub fn summarize(root: &Element, max_chars: usize) -> String {
    let mut raw = String::new();
    collect_plain_text(root, &mut raw);
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() <= max_chars {
        return text;
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

/// Text nodes, with a space between block-level elements so adjacent
/// paragraphs do not run together.
fn collect_plain_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element(child) => {
                let separated = matches!(
                    child.tag.as_str(),
                    "div" | "p" | "li" | "br" | "tr" | "td" | "th" | "h1" | "h2" | "h3" | "h4"
                        | "h5" | "h6" | "pre" | "blockquote"
                );
                if separated {
                    out.push(' ');
                }
                collect_plain_text(child, out);
                if separated {
                    out.push(' ');
                }
            }
        }
    }
}
