//! Turns the render service's HTML into lines a terminal can show.
//!
//! Block-level boundaries become line breaks (paragraphs are separated by one
//! blank line), list items get a bullet, every other tag is dropped and
//! entities are decoded. Text without tags passes through as-is.

use std::sync::LazyLock;

use regex::Regex;

static INTER_TAG_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">[ \t]*\r?\n\s*<").expect("inter-tag pattern must compile"));
static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(p|h[1-6]|div|pre|blockquote|ul|ol|table)\s*>|<hr\s*/?>")
        .expect("block end pattern must compile")
});
static LINE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(li|tr)\s*>").expect("line end pattern must compile")
});
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li(\s[^>]*)?>").expect("list item pattern must compile"));
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern must compile"));

/// Convert preview HTML to display lines.
pub fn html_to_lines(html: &str) -> Vec<String> {
    if !html.contains('<') {
        return html.split('\n').map(str::to_string).collect();
    }
    let text = INTER_TAG_SPACE.replace_all(html, "><");
    let text = BLOCK_END.replace_all(&text, "$0\n\n");
    let text = LINE_END.replace_all(&text, "$0\n");
    let text = LIST_ITEM.replace_all(&text, "• ");
    let text = TAG.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);

    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let line = line.trim_end();
        // Nested blocks leave runs of blank lines; keep one.
        if line.is_empty() && lines.last().is_none_or(String::is_empty) {
            continue;
        }
        lines.push(line.to_string());
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(
            html_to_lines("Error processing markdown"),
            vec!["Error processing markdown".to_string()]
        );
    }

    #[test]
    fn test_empty_html_is_one_empty_line() {
        assert_eq!(html_to_lines(""), vec![String::new()]);
    }

    #[test]
    fn test_blocks_become_lines() {
        let lines = html_to_lines("<h1>Title</h1>\n<p>Hello <strong>world</strong></p>");
        assert_eq!(
            lines,
            vec!["Title".to_string(), String::new(), "Hello world".to_string()]
        );
    }

    #[test]
    fn test_list_items_get_bullets() {
        let lines = html_to_lines("<ul>\n<li>one</li>\n<li class=\"x\">two</li>\n</ul>");
        assert_eq!(lines, vec!["• one".to_string(), "• two".to_string()]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let lines = html_to_lines("<p>a &lt;b&gt; &amp; &quot;c&quot;</p>");
        assert_eq!(lines, vec!["a <b> & \"c\"".to_string()]);
    }

    #[test]
    fn test_inline_spacing_is_kept() {
        let lines = html_to_lines("<p><strong>a</strong> <em>b</em></p>");
        assert_eq!(lines, vec!["a b".to_string()]);
    }

    #[test]
    fn test_line_breaks() {
        let lines = html_to_lines("<p>one<br>two<br/>three</p>");
        assert_eq!(
            lines,
            vec!["one".to_string(), "two".to_string(), "three".to_string()]
        );
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let lines = html_to_lines("<pre><code>fn a() {}\nfn b() {}\n</code></pre>");
        assert_eq!(lines, vec!["fn a() {}".to_string(), "fn b() {}".to_string()]);
    }
}
