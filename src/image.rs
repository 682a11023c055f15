//! Rewriting of remote image references to the same-origin proxy path.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::ast::Element;
use crate::config::Options;

/// Path prefix served by the image proxy.
pub const DEFAULT_IMAGE_PROXY_PREFIX: &str = "/image";

/// Fallback for absolute references the URL parser rejects.
static ABSOLUTE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://[^/]+(/.*)$").unwrap());

/// Rewrite `src` onto the default `/image` proxy path.
///
/// ```
/// use blockmark::rewrite_image_src;
///
/// assert_eq!(
///     rewrite_image_src("https://host.example/path/pic.png?x=1"),
///     "/image/path/pic.png?x=1"
/// );
/// assert_eq!(rewrite_image_src("/local.png"), "/local.png");
/// ```
pub fn rewrite_image_src(src: &str) -> String {
    rewrite_image_src_with_prefix(src, DEFAULT_IMAGE_PROXY_PREFIX)
}

/// Rewrite an absolute `http`/`https` reference to `prefix + path + query`.
/// Anything else is returned unchanged.
pub fn rewrite_image_src_with_prefix(src: &str, prefix: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    let prefix = prefix.trim_end_matches('/');

    if let Ok(url) = Url::parse(src)
        && matches!(url.scheme(), "http" | "https")
    {
        let query = match url.query() {
            Some(q) if !q.is_empty() => format!("?{q}"),
            _ => String::new(),
        };
        return format!("{prefix}{}{query}", url.path());
    }

    if let Some(rest) = ABSOLUTE_URL_RE.captures(src).and_then(|caps| caps.get(1)) {
        tracing::trace!(src, "image URL rewritten by pattern fallback");
        return format!("{prefix}{}", rest.as_str());
    }

    src.to_string()
}

/// Source of an `<img>`: `data-src`, falling back to `src`, then rewritten
/// when the options ask for it.
pub(crate) fn image_source(img: &Element, options: &Options) -> String {
    let raw = img
        .attr_non_empty("data-src")
        .or_else(|| img.attr_non_empty("src"))
        .unwrap_or("");
    if raw.is_empty() {
        tracing::debug!("image element without a source");
    }
    if options.rewrite_images {
        rewrite_image_src_with_prefix(raw, &options.image_proxy_prefix)
    } else {
        raw.to_string()
    }
}
