use blockmark::{escape_html, rewrite_image_src, transform, unescape_html};
use proptest::prelude::*;

/// Fragments of the block dialect, combined at random into possibly
/// malformed documents.
fn markup_piece() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        r#"<div data-type="NodeParagraph">"#,
        r#"<div data-type="NodeHeading" data-subtype="h3" id="x">"#,
        r#"<div data-type="NodeList" data-subtype="o">"#,
        r#"<div data-type="NodeListItem">"#,
        r#"<div data-type="NodeBlockquote">"#,
        r#"<div data-type="NodeCodeBlock" class="render-node" data-content="a&lt;b">"#,
        r#"<div data-type="NodeMathBlock" data-content="x">"#,
        r#"<div data-type="NodeTable"><table><tr><td>"#,
        r#"<div data-type="NodeImage"><img data-src="https://h.example/a.png">"#,
        r#"<div contenteditable="true">"#,
        r#"<span data-type="strong">"#,
        r#"<span data-type="img"><img src="/a.png">"#,
        r#"<span data-type="inline-math" data-content="&amp;">"#,
        r#"<span data-type="a" href="/p">"#,
        "</div>",
        "</span>",
        "</td>",
        "<br>",
        "text",
        " & ",
        "<",
        ">",
        "\"",
        "'",
        "思源",
    ])
}

proptest! {
    #[test]
    fn prop_transform_is_total_on_arbitrary_strings(input in ".*") {
        let _ = transform(&input);
    }

    #[test]
    fn prop_transform_is_total_on_markup_soup(
        pieces in prop::collection::vec(markup_piece(), 0..40)
    ) {
        let input: String = pieces.concat();
        let _ = transform(&input);
    }

    #[test]
    fn prop_output_never_contains_script(
        pieces in prop::collection::vec(markup_piece(), 0..30),
        payload in "[a-z<>/ ]{0,12}"
    ) {
        let input = format!("{}<script>{}</script>", pieces.concat(), payload);
        prop_assert!(!transform(&input).contains("<script"));
    }

    #[test]
    fn prop_unescape_inverts_escape(text in ".*") {
        prop_assert_eq!(unescape_html(&escape_html(&text)), text);
    }

    #[test]
    fn prop_escape_output_has_no_raw_specials(text in ".*") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains(|c: char| matches!(c, '<' | '>' | '"' | '\'')));
    }

    #[test]
    fn prop_relative_paths_untouched(path in "/?[a-z0-9_./-]{0,30}") {
        prop_assert_eq!(rewrite_image_src(&path), path);
    }

    #[test]
    fn prop_absolute_urls_land_on_proxy(
        host in "[a-z]{1,10}\\.example",
        path in "(/[a-z0-9]{1,8}){1,4}"
    ) {
        let rewritten = rewrite_image_src(&format!("https://{host}{path}"));
        prop_assert_eq!(rewritten, format!("/image{path}"));
    }
}
