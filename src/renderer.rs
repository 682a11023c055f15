//! Semantic HTML renderer for parsed block markup
use crate::ast::{BlockKind, Element};
use crate::config::Options;
use crate::escape::{escape_html, unescape_html};
use crate::image::image_source;
use crate::inline::render_inline;

const DEFAULT_HEADING_LEVEL: u8 = 2;

pub struct HtmlRenderer {
    options: Options,
}

impl HtmlRenderer {
    pub fn new(options: Options) -> Self {
        HtmlRenderer { options }
    }

    /// Render every top-level block of a parsed document, in order.
    pub fn render(&self, root: &Element) -> String {
        root.child_elements()
            .map(|block| self.render_block(block))
            .collect()
    }

    pub fn render_block(&self, el: &Element) -> String {
        match el.block_kind() {
            BlockKind::Heading => self.render_heading(el),
            BlockKind::Paragraph => {
                let content = self.editable_inline(el);
                // blank paragraphs would only add empty lines
                if content.trim().is_empty() {
                    String::new()
                } else {
                    format!("<p>{}</p>", content)
                }
            }
            BlockKind::List => self.render_list(el),
            BlockKind::ListItem => self.render_list_item(el),
            BlockKind::Blockquote => {
                format!("<blockquote>{}</blockquote>", self.editable_inline(el))
            }
            BlockKind::CodeBlock => self.render_code_block(el),
            BlockKind::Image => self.render_image(el),
            BlockKind::Table => el.outer_html_where(|e| e.tag != "script"),
            BlockKind::MathBlock => render_node_source(el, Some("math")),
            BlockKind::Unrecognized => {
                let nested: String = el
                    .child_elements()
                    .map(|child| self.render_block(child))
                    .collect();
                if !nested.is_empty() {
                    return nested;
                }
                tracing::trace!(
                    data_type = el.data_type().unwrap_or(""),
                    "unrecognized block rendered as inline content"
                );
                self.editable_inline(el)
            }
        }
    }

    fn render_heading(&self, el: &Element) -> String {
        let level = heading_level(el);
        let id_attr = heading_id(el)
            .map(|id| format!(" id=\"{}\"", escape_html(id)))
            .unwrap_or_default();
        format!(
            "<h{level}{id_attr}>{}</h{level}>",
            self.editable_inline(el)
        )
    }

    fn render_list(&self, el: &Element) -> String {
        let tag = if el.attr("data-subtype") == Some("o") {
            "ol"
        } else {
            "ul"
        };
        let items: String = el
            .child_elements()
            .filter(|child| child.block_kind() == BlockKind::ListItem)
            .map(|item| self.render_list_item(item))
            .collect();
        format!("<{tag}>{items}</{tag}>")
    }

    fn render_list_item(&self, el: &Element) -> String {
        let mut content = String::new();
        for child in el.child_elements() {
            match child.block_kind() {
                BlockKind::Paragraph => content.push_str(&self.editable_inline(child)),
                BlockKind::List => content.push_str(&self.render_list(child)),
                _ => {}
            }
        }
        format!("<li>{}</li>", content)
    }

    fn render_code_block(&self, el: &Element) -> String {
        if el.has_class("render-node") {
            return render_node_source(el, el.attr_non_empty("data-subtype"));
        }

        let language = el
            .find_descendant(|e| e.has_class("protyle-action__language"))
            .map(|label| label.text_content().trim().to_string())
            .unwrap_or_default();
        let code = el
            .find_descendant(|e| e.has_class("hljs"))
            .map(Element::text_content)
            .unwrap_or_default();
        let class_attr = if language.is_empty() {
            String::new()
        } else {
            format!(" class=\"language-{}\"", escape_html(&language))
        };
        format!("<pre><code{class_attr}>{}</code></pre>", escape_html(&code))
    }

    fn render_image(&self, el: &Element) -> String {
        let Some(img) = el.find_descendant(|e| e.tag == "img") else {
            tracing::debug!("image block without an <img> element");
            return String::new();
        };
        let src = image_source(img, &self.options);
        format!(
            "<img src=\"{}\" title=\"{}\" style=\"{}\">",
            escape_html(&src),
            escape_html(img.attr("title").unwrap_or("")),
            escape_html(img.attr("style").unwrap_or(""))
        )
    }

    /// Inline content of the block's first `contenteditable` region, or of
    /// the block itself when it has none.
    fn editable_inline(&self, el: &Element) -> String {
        let nodes = &el.editable_region().unwrap_or(el).children;
        render_inline(nodes, &self.options)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// `<pre class="render-node">` carrying stored source for a downstream
/// diagram or math renderer.
fn render_node_source(el: &Element, subtype: Option<&str>) -> String {
    let source = unescape_html(el.attr("data-content").unwrap_or(""));
    let subtype_attr = subtype
        .map(|subtype| format!(" data-subtype=\"{}\"", escape_html(subtype)))
        .unwrap_or_default();
    format!(
        "<pre class=\"render-node\"{subtype_attr}><code>{}</code></pre>",
        escape_html(&source)
    )
}

/// Block identifier used for deep links: `id`, else `data-node-id`.
pub(crate) fn heading_id(el: &Element) -> Option<&str> {
    el.attr_non_empty("id")
        .or_else(|| el.attr_non_empty("data-node-id"))
}

/// Level from `data-subtype` (`h1`..`h6`), then from a class token, else 2.
pub(crate) fn heading_level(el: &Element) -> u8 {
    el.attr("data-subtype")
        .and_then(parse_heading_token)
        .or_else(|| el.class_tokens().find_map(parse_heading_token))
        .unwrap_or(DEFAULT_HEADING_LEVEL)
}

fn parse_heading_token(token: &str) -> Option<u8> {
    match token.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}
