//! Line-level markdown highlighting for the editor pane.
//!
//! This is a display hint, not a markdown parser. Each line is split into
//! [`Segment`]s by folding over a fixed, ordered list of [`PatternRule`]s:
//! earlier rules claim text first, later rules only re-scan what is still
//! unstyled. Nothing spans a line break or a `\r`, and there is no
//! escaping.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Classification attached to a highlighted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    #[serde(rename = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    Heading2,
    Bold,
    Italic,
    Code,
    Link,
}

impl StyleTag {
    /// Stable tag name, used in the token dump.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heading1 => "heading-1",
            Self::Heading2 => "heading-2",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::Link => "link",
        }
    }
}

/// A contiguous slice of one line with at most one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub style: Option<StyleTag>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    pub const fn is_styled(&self) -> bool {
        self.style.is_some()
    }
}

/// A pattern paired with the style it assigns to its matches.
#[derive(Debug)]
pub struct PatternRule {
    pub pattern: Regex,
    pub style: StyleTag,
}

impl PatternRule {
    fn new(pattern: &str, style: StyleTag) -> Self {
        Self {
            // The patterns are literals; a failure here is a programming error.
            pattern: Regex::new(pattern).expect("highlight pattern must compile"),
            style,
        }
    }
}

static RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule::new(r"^# [^\r]*", StyleTag::Heading1),
        PatternRule::new(r"^## [^\r]*", StyleTag::Heading2),
        PatternRule::new(r"\*\*[^\r]*?\*\*", StyleTag::Bold),
        PatternRule::new(r"\*[^\r]*?\*", StyleTag::Italic),
        PatternRule::new(r"`[^\r]*?`", StyleTag::Code),
        PatternRule::new(r"\[[^\r]*?\]\([^\r]*?\)", StyleTag::Link),
    ]
});

/// The rule list in application order.
pub fn rules() -> &'static [PatternRule] {
    &RULES
}

/// Tokenize a whole document, one segment list per line.
///
/// Lines are split on `\n` only. A trailing newline produces a trailing
/// empty line, so joining the lines with `\n` gives back the input.
pub fn tokenize(text: &str) -> Vec<Vec<Segment>> {
    text.split('\n').map(tokenize_line).collect()
}

/// Tokenize a single line (which must not contain `\n`).
pub fn tokenize_line(line: &str) -> Vec<Segment> {
    let mut segments = vec![Segment::plain(line)];
    for rule in rules() {
        segments = apply_rule(segments, rule);
    }
    segments
}

/// Run one rule over a segment list. Styled segments are claimed and pass
/// through; only unstyled segments are re-scanned.
pub fn apply_rule(segments: Vec<Segment>, rule: &PatternRule) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.is_styled() {
            out.push(segment);
        } else {
            out.extend(split_unstyled(&segment.text, rule));
        }
    }
    out
}

/// Split unstyled text by one rule's leftmost non-overlapping matches.
///
/// Matches become segments tagged with the rule's style. The gaps between
/// them stay unstyled; empty gaps are dropped.
pub fn split_unstyled(text: &str, rule: &PatternRule) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in rule.pattern.find_iter(text) {
        if m.start() > last {
            out.push(Segment::plain(&text[last..m.start()]));
        }
        if !m.as_str().is_empty() {
            out.push(Segment::styled(m.as_str(), rule.style));
        }
        last = m.end();
    }
    if last < text.len() {
        out.push(Segment::plain(&text[last..]));
    }
    out
}
