//! Variant banner injection for served HTML.
//!
//! The banner is spliced in immediately after the first opening `<body ...>`
//! tag; tag-boundary detection is a regex scan rather than a full HTML parse,
//! which is all the contract requires.

use std::sync::LazyLock;

use regex::Regex;

/// First case-insensitive opening body tag, attributes allowed.
static BODY_OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body[^>]*>").expect("valid regex"));

/// Inserts a fixed-position banner carrying the variant label into `html`.
///
/// The banner lands immediately after the closing `>` of the first
/// `<body ...>` tag; documents without a body tag get the banner prepended.
/// The rest of the document is untouched. Applying this twice inserts two
/// banners; callers render at most once per response.
pub fn inject_variant_banner(html: &str, variant: &str) -> String {
    let banner = format!(
        "<div style=\"position:fixed;left:0;top:0;background:#ffcc00;color:#000;padding:6px 10px;z-index:9999;font-weight:bold;\">Variant: {variant}</div>"
    );
    match BODY_OPEN_TAG.find(html) {
        Some(tag) => format!(
            "{}{}{}",
            &html[..tag.end()],
            banner,
            &html[tag.end()..]
        ),
        None => format!("{banner}{html}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner(variant: &str) -> String {
        format!(
            "<div style=\"position:fixed;left:0;top:0;background:#ffcc00;color:#000;padding:6px 10px;z-index:9999;font-weight:bold;\">Variant: {variant}</div>"
        )
    }

    #[test]
    fn banner_lands_right_after_the_body_tag() {
        let html = "<html><body><p>hi</p></body></html>";
        let rendered = inject_variant_banner(html, "v2");
        assert_eq!(
            rendered,
            format!("<html><body>{}<p>hi</p></body></html>", banner("v2"))
        );
    }

    #[test]
    fn body_tag_attributes_and_case_are_handled() {
        let html = "<HTML><BODY class=\"landing\" id='top'><h1>hi</h1></BODY></HTML>";
        let rendered = inject_variant_banner(html, "v5");
        assert_eq!(
            rendered,
            format!(
                "<HTML><BODY class=\"landing\" id='top'>{}<h1>hi</h1></BODY></HTML>",
                banner("v5")
            )
        );
    }

    #[test]
    fn only_the_first_body_tag_is_patched() {
        let html = "<body>a</body><body>b</body>";
        let rendered = inject_variant_banner(html, "v2");
        assert_eq!(
            rendered,
            format!("<body>{}a</body><body>b</body>", banner("v2"))
        );
    }

    #[test]
    fn documents_without_a_body_tag_get_the_banner_prepended() {
        let html = "<p>fragment</p>";
        let rendered = inject_variant_banner(html, "v2");
        assert_eq!(rendered, format!("{}<p>fragment</p>", banner("v2")));
    }

    #[test]
    fn surrounding_content_is_byte_identical() {
        let html = "<html>\n<body data-x=\"1\">\ncontent\n</body>\n</html>\n";
        let rendered = inject_variant_banner(html, "v9");
        let insert_at = html.find("\">").expect("body tag end") + 2;
        assert_eq!(&rendered[..insert_at], &html[..insert_at]);
        assert_eq!(&rendered[insert_at + banner("v9").len()..], &html[insert_at..]);
    }

    #[test]
    fn rendering_twice_stacks_two_banners() {
        let html = "<body>x</body>";
        let twice = inject_variant_banner(&inject_variant_banner(html, "v2"), "v2");
        assert_eq!(twice.matches("Variant: v2").count(), 2);
    }
}
