//! Tree types for the block markup dialect
use serde::{Deserialize, Serialize};

use crate::escape::escape_html;

/// Tag name of the synthetic element wrapping a parsed document.
pub const ROOT_TAG: &str = "#root";

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupNode {
    Element(Element),
    /// Character data with entities already decoded.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Lower-cased tag name.
    pub tag: String,
    /// Attributes in source order. Names are lower-cased and unique.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Element::new(ROOT_TAG)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`Element::attr`], but an empty value counts as missing.
    pub fn attr_non_empty(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.class_tokens().any(|class| class == token)
    }

    pub fn class_tokens(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn data_type(&self) -> Option<&str> {
        self.attr("data-type")
    }

    pub fn block_kind(&self) -> BlockKind {
        BlockKind::from_data_type(self.data_type())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            MarkupNode::Element(el) => Some(el),
            MarkupNode::Text(_) => None,
        })
    }

    /// First descendant (not `self`) in document order matching `pred`.
    pub fn find_descendant<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool + Copy,
    {
        for child in self.child_elements() {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(pred) {
                return Some(found);
            }
        }
        None
    }

    /// The first `<div contenteditable="true">` below this element, which
    /// holds a block's inline content.
    pub fn editable_region(&self) -> Option<&Element> {
        self.find_descendant(|e| e.tag == "div" && e.attr("contenteditable") == Some("true"))
    }

    /// Concatenated character data of all descendants, markup discarded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                MarkupNode::Text(text) => out.push_str(text),
                MarkupNode::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Re-serialize this element and its subtree.
    pub fn outer_html(&self) -> String {
        self.outer_html_where(|_| true)
    }

    /// Re-serialize, leaving out descendant elements (and their subtrees)
    /// for which `keep` returns false.
    pub fn outer_html_where<F>(&self, keep: F) -> String
    where
        F: Fn(&Element) -> bool + Copy,
    {
        let mut out = String::new();
        self.write_outer_html(&mut out, keep);
        out
    }

    fn write_outer_html<F>(&self, out: &mut String, keep: F)
    where
        F: Fn(&Element) -> bool + Copy,
    {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');
        if is_void_element(&self.tag) {
            return;
        }
        for child in &self.children {
            match child {
                MarkupNode::Text(text) => out.push_str(&escape_html(text)),
                MarkupNode::Element(el) if keep(el) => el.write_outer_html(out, keep),
                MarkupNode::Element(_) => {}
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Block classification derived from an element's `data-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Paragraph,
    List,
    ListItem,
    Blockquote,
    CodeBlock,
    Image,
    Table,
    MathBlock,
    Unrecognized,
}

impl BlockKind {
    pub fn from_data_type(data_type: Option<&str>) -> Self {
        match data_type.unwrap_or("") {
            "NodeHeading" => BlockKind::Heading,
            "NodeParagraph" => BlockKind::Paragraph,
            "NodeList" => BlockKind::List,
            "NodeListItem" => BlockKind::ListItem,
            "NodeBlockquote" => BlockKind::Blockquote,
            "NodeCodeBlock" => BlockKind::CodeBlock,
            "NodeImage" => BlockKind::Image,
            "NodeTable" => BlockKind::Table,
            "NodeMathBlock" => BlockKind::MathBlock,
            _ => BlockKind::Unrecognized,
        }
    }
}

/// Inline classification derived from tag name and, for spans, `data-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    PlainText,
    Strong,
    Emphasis,
    Underline,
    Strikethrough,
    Mark,
    Code,
    InlineImage,
    InlineMath,
    InlineMemo,
    Backslash,
    Anchor,
    LineBreak,
    Other,
}

impl InlineKind {
    pub fn of(node: &MarkupNode) -> Self {
        match node {
            MarkupNode::Text(_) => InlineKind::PlainText,
            MarkupNode::Element(el) => InlineKind::of_element(el),
        }
    }

    pub fn of_element(el: &Element) -> Self {
        match el.tag.as_str() {
            "span" => match el.data_type().unwrap_or("") {
                "strong" => InlineKind::Strong,
                "em" => InlineKind::Emphasis,
                "u" => InlineKind::Underline,
                "s" => InlineKind::Strikethrough,
                "mark" => InlineKind::Mark,
                "code" => InlineKind::Code,
                "img" => InlineKind::InlineImage,
                "inline-math" => InlineKind::InlineMath,
                "inline-memo" => InlineKind::InlineMemo,
                "backslash" => InlineKind::Backslash,
                "a" => InlineKind::Anchor,
                _ => InlineKind::Other,
            },
            "a" => InlineKind::Anchor,
            "br" => InlineKind::LineBreak,
            _ => InlineKind::Other,
        }
    }
}
