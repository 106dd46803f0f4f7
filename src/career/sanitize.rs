//! HTML cleaning for free-text career fields.
//!
//! Both cleaners parse the input as an HTML fragment, so unterminated or
//! malformed markup never survives as a tag; leftover text is escaped.

use ammonia::Builder;

const DESCRIPTION_TAGS: &[&str] = &["p", "br", "b", "i", "u", "strong", "em", "ul", "ol", "li"];
const DROP_WITH_BODY: &[&str] = &["script", "style"];

/// Remove every tag, keeping only (escaped) text content.
pub fn strip_tags(input: &str) -> String {
    cleaner(&[]).clean(input).to_string()
}

/// Keep a small set of formatting tags (attributes removed), drop the rest.
pub fn sanitize_description(input: &str) -> String {
    cleaner(DESCRIPTION_TAGS).clean(input).to_string()
}

fn cleaner(allowed: &'static [&'static str]) -> Builder<'static> {
    let mut builder = Builder::empty();
    builder
        .add_tags(allowed)
        .add_clean_content_tags(DROP_WITH_BODY)
        .strip_comments(true);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_keeps_text_only() {
        assert_eq!(strip_tags("<b>Senior</b> Engineer"), "Senior Engineer");
        assert_eq!(strip_tags("a < b"), "a &lt; b");
        assert_eq!(strip_tags("x<script>alert(1)</script>y"), "xy");
    }

    #[test]
    fn description_keeps_formatting_without_attributes() {
        assert_eq!(
            sanitize_description(r#"<p class="x" onclick="evil()">Hi<br/></p><div>there</div>"#),
            "<p>Hi<br></p>there"
        );
        assert_eq!(
            sanitize_description("<ul><li>One</li></ul><STYLE>p{}</STYLE>"),
            "<ul><li>One</li></ul>"
        );
    }

    #[test]
    fn unterminated_tag_never_reaches_output() {
        let description = sanitize_description("<p>Hi</p><img src=x onerror=alert(1) ");
        assert!(!description.contains("<img"), "got {}", description);
        assert!(description.starts_with("<p>Hi</p>"));

        let title = strip_tags("Chef <img src=x onerror=alert(1) ");
        assert!(!title.contains('<'), "got {}", title);
        assert!(!title.contains("onerror="), "got {}", title);
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(sanitize_description("<p>a<!-- <b>x</b> --></p>"), "<p>a</p>");
    }
}
