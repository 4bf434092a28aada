//! Passage cleaning: drop table-of-contents noise and fragments, normalize prose

use once_cell::sync::Lazy;
use regex::Regex;

/// Dotted leader that marks table-of-contents lines
pub const TOC_LEADER: &str = "....";

/// Passages with fewer whitespace-separated tokens are fragments
pub const MIN_PASSAGE_TOKENS: usize = 6;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Clean a single passage, or `None` if it should be discarded
pub fn clean_passage(text: &str) -> Option<String> {
    let text = text.trim();

    if text.contains(TOC_LEADER) {
        return None;
    }

    if text.split_whitespace().count() < MIN_PASSAGE_TOKENS {
        return None;
    }

    let mut sentence = WHITESPACE_RUN.replace_all(text, " ").into_owned();
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    Some(sentence)
}

/// Clean every passage and merge the survivors into one paragraph
///
/// Returns an empty string when nothing survives. Input order is kept.
pub fn clean_and_merge<'a, I>(texts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let sentences: Vec<String> = texts.into_iter().filter_map(clean_passage).collect();
    if sentences.is_empty() {
        return String::new();
    }

    sentences.join(" ").replace(" .", ".").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_toc_lines_dropped() {
        assert_eq!(
            clean_passage("Fully managed RAG options ........................ 4"),
            None
        );
    }

    #[test]
    fn test_fragments_dropped() {
        assert_eq!(clean_passage("Amazon Kendra overview page"), None);
        assert!(clean_passage("Amazon Kendra is a search service").is_some());
    }

    #[test]
    fn test_whitespace_collapsed_and_period_added() {
        assert_eq!(
            clean_passage("  Amazon Kendra\tis a   highly\naccurate search service  ").unwrap(),
            "Amazon Kendra is a highly accurate search service."
        );
    }

    #[test]
    fn test_merge_keeps_order_and_fixes_spaced_periods() {
        let merged = clean_and_merge([
            "Retrievers fetch relevant passages from the index",
            "tiny fragment",
            "Generators turn the evidence into an answer .",
        ]);
        assert_eq!(
            merged,
            "Retrievers fetch relevant passages from the index. Generators turn the evidence into an answer."
        );
    }

    #[test]
    fn test_nothing_survives() {
        assert_eq!(clean_and_merge(["Contents ........ 1", "short"]), "");
        assert_eq!(clean_and_merge(std::iter::empty()), "");
    }

    fn sentence() -> impl Strategy<Value = String> {
        (
            prop::collection::vec("[a-z]{1,8}", MIN_PASSAGE_TOKENS..12),
            prop::collection::vec(prop::sample::select(vec![" ", "  ", "\n", "\t "]), 12),
        )
            .prop_map(|(words, gaps)| {
                let mut text = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i > 0 {
                        text.push_str(gaps[i % gaps.len()]);
                    }
                    text.push_str(word);
                }
                text
            })
    }

    proptest! {
        #[test]
        fn prop_cleaning_is_idempotent_on_clean_text(sentences in prop::collection::vec(sentence(), 1..6)) {
            let merged = clean_and_merge(sentences.iter().map(String::as_str));
            let resplit: Vec<&str> = merged.split(". ").collect();
            prop_assert_eq!(clean_and_merge(resplit), merged);
        }

        #[test]
        fn prop_merged_output_has_single_spaces(sentences in prop::collection::vec(sentence(), 1..6)) {
            let merged = clean_and_merge(sentences.iter().map(String::as_str));
            prop_assert!(!merged.contains("  "));
            prop_assert!(!merged.contains('\n'));
            prop_assert!(merged.ends_with('.'));
        }
    }
}
