use proptest::prelude::*;

use splitmark::highlight::{StyleTag, tokenize, tokenize_line};

fn markdownish() -> impl Strategy<Value = String> {
    // Bias towards the characters the rules care about.
    proptest::collection::vec(
        prop_oneof![
            Just("#".to_string()),
            Just("## ".to_string()),
            Just("*".to_string()),
            Just("**".to_string()),
            Just("`".to_string()),
            Just("[".to_string()),
            Just("](".to_string()),
            Just(")".to_string()),
            Just("\n".to_string()),
            Just("\r".to_string()),
            Just(" ".to_string()),
            "[a-zé漢]{1,4}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn tokenize_is_lossless(text in markdownish()) {
        let rebuilt = tokenize(&text)
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn tokenize_is_lossless_for_arbitrary_text(text in any::<String>()) {
        let rebuilt = tokenize(&text)
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn line_count_matches_newlines(text in markdownish()) {
        prop_assert_eq!(tokenize(&text).len(), text.matches('\n').count() + 1);
    }

    #[test]
    fn segments_are_never_empty(text in markdownish()) {
        for line in tokenize(&text) {
            for segment in line {
                prop_assert!(!segment.text.is_empty());
            }
        }
    }

    #[test]
    fn headings_only_start_a_line(text in markdownish()) {
        for line in tokenize(&text) {
            for (idx, segment) in line.iter().enumerate() {
                if matches!(segment.style, Some(StyleTag::Heading1 | StyleTag::Heading2)) {
                    prop_assert_eq!(idx, 0);
                    prop_assert!(!segment.text.contains('\r'));
                }
            }
        }
    }

    #[test]
    fn styled_segments_never_hold_carriage_returns(text in markdownish()) {
        for segment in tokenize(&text).into_iter().flatten() {
            if segment.is_styled() {
                prop_assert!(!segment.text.contains('\r'));
            }
        }
    }

    #[test]
    fn tokenize_is_deterministic(text in markdownish()) {
        prop_assert_eq!(tokenize(&text), tokenize(&text));
    }
}

#[test]
fn bold_wins_over_heading_inside_markers() {
    let segments = tokenize_line("**# heading**");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].style, Some(StyleTag::Bold));
}

#[test]
fn mixed_inline_line_from_docs() {
    let segments = tokenize_line("Hello **world** and *universe*");
    let got: Vec<(&str, Option<StyleTag>)> = segments
        .iter()
        .map(|s| (s.text.as_str(), s.style))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Hello ", None),
            ("**world**", Some(StyleTag::Bold)),
            (" and ", None),
            ("*universe*", Some(StyleTag::Italic)),
        ]
    );
}

#[test]
fn third_level_heading_is_plain() {
    let segments = tokenize_line("### Three");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].style, None);
}
