//! Rendering of inline spans inside a block's editable region
use crate::ast::{Element, InlineKind, MarkupNode};
use crate::config::Options;
use crate::escape::{escape_html, unescape_html};
use crate::image::image_source;

pub fn render_inline(nodes: &[MarkupNode], options: &Options) -> String {
    let mut html = String::new();
    for node in nodes {
        render_inline_node(node, options, &mut html);
    }
    html
}

fn render_inline_node(node: &MarkupNode, options: &Options, out: &mut String) {
    let el = match node {
        MarkupNode::Text(text) => {
            out.push_str(&escape_html(text));
            return;
        }
        MarkupNode::Element(el) => el,
    };

    match InlineKind::of_element(el) {
        InlineKind::Strong => wrap(out, "strong", el, options),
        InlineKind::Emphasis => wrap(out, "em", el, options),
        InlineKind::Underline => wrap(out, "u", el, options),
        InlineKind::Strikethrough => wrap(out, "s", el, options),
        InlineKind::Mark => wrap(out, "mark", el, options),
        InlineKind::Code => wrap(out, "code", el, options),
        InlineKind::InlineImage => {
            // the wrapping span is discarded; without an <img> nothing is emitted
            if let Some(img) = el.find_descendant(|e| e.tag == "img") {
                let src = image_source(img, options);
                let alt = img.attr("alt").unwrap_or("");
                let title = img.attr("title").unwrap_or("");
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\" title=\"{}\">",
                    escape_html(&src),
                    escape_html(alt),
                    escape_html(title)
                ));
            }
        }
        InlineKind::InlineMath => {
            let source = unescape_html(el.attr("data-content").unwrap_or(""));
            out.push_str(&format!(
                "<span class=\"math-inline\">{}</span>",
                escape_html(&source)
            ));
        }
        InlineKind::InlineMemo => {
            let content = render_inline(&el.children, options);
            if !content.is_empty() {
                out.push_str(&content);
                out.push_str("<sup></sup>");
            }
        }
        InlineKind::Anchor => {
            let href = el.attr("href").unwrap_or("");
            out.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape_html(href),
                render_inline(&el.children, options)
            ));
        }
        InlineKind::LineBreak => out.push_str("<br>"),
        InlineKind::Backslash | InlineKind::Other | InlineKind::PlainText => {
            out.push_str(&render_inline(&el.children, options));
        }
    }
}

fn wrap(out: &mut String, tag: &str, el: &Element, options: &Options) {
    out.push_str(&format!(
        "<{tag}>{}</{tag}>",
        render_inline(&el.children, options)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn inline(markup: &str) -> String {
        let root = Parser::new(markup).try_parse().unwrap();
        render_inline(&root.children, &Options::default())
    }

    #[test]
    fn test_plain_text_escaped() {
        assert_eq!(inline("a &lt; b &amp; c"), "a &lt; b &amp; c");
        assert_eq!(inline("it's"), "it&#39;s");
    }

    #[test]
    fn test_formatting_spans() {
        assert_eq!(inline(r#"<span data-type="strong">B</span>"#), "<strong>B</strong>");
        assert_eq!(inline(r#"<span data-type="em">I</span>"#), "<em>I</em>");
        assert_eq!(inline(r#"<span data-type="u">U</span>"#), "<u>U</u>");
        assert_eq!(inline(r#"<span data-type="s">S</span>"#), "<s>S</s>");
        assert_eq!(inline(r#"<span data-type="mark">M</span>"#), "<mark>M</mark>");
        assert_eq!(
            inline(r#"<span data-type="code">a &lt;b&gt;</span>"#),
            "<code>a &lt;b&gt;</code>"
        );
    }

    #[test]
    fn test_nested_formatting() {
        assert_eq!(
            inline(r#"<span data-type="strong"><span data-type="em">X</span></span>"#),
            "<strong><em>X</em></strong>"
        );
    }

    #[test]
    fn test_inline_image_rewritten() {
        assert_eq!(
            inline(
                r#"<span data-type="img" class="img"><span> </span><img src="placeholder" data-src="https://host.example/path/pic.png?x=1" alt="pic" title="T"></span>"#
            ),
            r#"<img src="/image/path/pic.png?x=1" alt="pic" title="T">"#
        );
    }

    #[test]
    fn test_inline_image_local_src_unchanged() {
        assert_eq!(
            inline(r#"<span data-type="img"><img data-src="/local.png"></span>"#),
            r#"<img src="/local.png" alt="" title="">"#
        );
    }

    #[test]
    fn test_inline_image_without_img_contributes_nothing() {
        assert_eq!(inline(r#"a<span data-type="img"><span>x</span></span>b"#), "ab");
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(
            inline(r#"<span data-type="inline-math" data-content="a &lt; b"></span>"#),
            r#"<span class="math-inline">a &lt; b</span>"#
        );
    }

    #[test]
    fn test_inline_math_double_escaped_storage() {
        assert_eq!(
            inline(r#"<span data-type="inline-math" data-content="a &amp;lt; b"></span>"#),
            r#"<span class="math-inline">a &lt; b</span>"#
        );
    }

    #[test]
    fn test_inline_memo() {
        assert_eq!(
            inline(r#"<span data-type="inline-memo" data-inline-memo-content="n">word</span>"#),
            "word<sup></sup>"
        );
        assert_eq!(inline(r#"<span data-type="inline-memo"></span>"#), "");
    }

    #[test]
    fn test_backslash_unwrapped() {
        assert_eq!(
            inline(r#"<span data-type="backslash"><span>\</span>*</span>"#),
            "\\*"
        );
    }

    #[test]
    fn test_anchor_span_and_bare_tag() {
        assert_eq!(
            inline(r#"<span data-type="a" href="https://x.example/?a=1&amp;b=2">link</span>"#),
            r#"<a href="https://x.example/?a=1&amp;b=2">link</a>"#
        );
        assert_eq!(
            inline(r#"<a href="/p"><span data-type="strong">b</span></a>"#),
            r#"<a href="/p"><strong>b</strong></a>"#
        );
        assert_eq!(inline(r#"<a>x</a>"#), r#"<a href="">x</a>"#);
    }

    #[test]
    fn test_line_break() {
        assert_eq!(inline("a<br>b"), "a<br>b");
    }

    #[test]
    fn test_unknown_wrappers_flattened() {
        assert_eq!(inline(r#"<span data-type="tag">#t#</span>"#), "#t#");
        assert_eq!(inline("<code>x</code>"), "x");
        assert_eq!(inline("<wbr>"), "");
    }
}
