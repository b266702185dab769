//! Strips markdown code-fence markers from model output before it is
//! embedded in the results page.
//!
//! Removal is purely substring based. A marker that appears inside
//! legitimate content (an SQL comment, a sentence quoting markdown) is
//! removed as well.

/// Language-tagged markers first, so the bare marker does not leave the
/// tag behind as stray text.
const FENCE_MARKERS: [&str; 4] = ["```html", "```mermaid", "```sql", "```"];

/// Removes every fence marker and trims surrounding whitespace.
///
/// After the bare-marker pass no run of three backticks is left, so a
/// second call finds nothing to remove.
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(raw.to_string(), |text, marker| text.replace(marker, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_strips_html_fence() {
        assert_eq!(strip_code_fences("```html<p>x</p>```"), "<p>x</p>");
    }

    #[test]
    fn test_strips_mermaid_fence_and_whitespace() {
        let raw = "\n```mermaid\nerDiagram\n  BOOKS ||--o{ LOANS : has\n```\n  ";
        assert_eq!(
            strip_code_fences(raw),
            "erDiagram\n  BOOKS ||--o{ LOANS : has"
        );
    }

    #[test]
    fn test_strips_sql_fence_without_leaving_tag() {
        let raw = "<pre><code>```sql\nCREATE TABLE books (id INT);\n```</code></pre>";
        assert_eq!(
            strip_code_fences(raw),
            "<pre><code>\nCREATE TABLE books (id INT);\n</code></pre>"
        );
    }

    #[test]
    fn test_marker_inside_content_is_removed_too() {
        let raw = "<p>Wrap code in ``` blocks</p>";
        assert_eq!(strip_code_fences(raw), "<p>Wrap code in  blocks</p>");
    }

    #[test]
    fn test_long_backtick_runs() {
        assert_eq!(strip_code_fences("````html<p>x</p>````"), "`<p>x</p>`");
        assert_eq!(strip_code_fences("`````"), "``");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(
            strip_code_fences("<table class=\"table\"><tr><td>1</td></tr></table>"),
            "<table class=\"table\"><tr><td>1</td></tr></table>"
        );
        assert_eq!(strip_code_fences(""), "");
    }

    proptest! {
        #[test]
        fn prop_sanitizer_is_idempotent(raw in "[`a-z<>/ \\n]{0,64}") {
            let once = strip_code_fences(&raw);
            let twice = strip_code_fences(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_no_fence_survives(raw in "[`htmlsq \\n]{0,64}") {
            prop_assert!(!strip_code_fences(&raw).contains("```"));
        }
    }
}
