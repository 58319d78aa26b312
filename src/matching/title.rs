//! Title similarity scoring

use std::collections::HashSet;

/// Score of two titles with identical word sets
pub const MAX_SIMILARITY: f64 = 100.0;

/// Canonical form of a title: lowercase ASCII words separated by single spaces
pub fn normalize_title(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unique words of a normalized title
pub fn title_tokens(title: &str) -> HashSet<String> {
    normalize_title(title)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Similarity of two titles in `[0, 100]`
///
/// Shared words divided by the size of the larger word set, so a title
/// that is a subset of a slightly longer one still scores high. Either
/// title being empty after normalization scores 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    token_similarity(&title_tokens(a), &title_tokens(b))
}

/// [`similarity`] over already tokenized titles
pub fn token_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let shared = a.intersection(b).count();
    let larger = a.len().max(b.len());
    MAX_SIMILARITY * shared as f64 / larger as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Will X win the Election?  "), "will x win the election");
        assert_eq!(normalize_title("BTC > $100k by 2025-12-31"), "btc 100k by 2025 12 31");
        assert_eq!(normalize_title("tabs\tand\nnewlines"), "tabs and newlines");
        assert_eq!(normalize_title("?!..."), "");
    }

    #[test]
    fn test_non_ascii_letters_become_separators() {
        assert_eq!(normalize_title("Pokémon"), "pok mon");
    }

    #[test]
    fn test_title_tokens_dedupe() {
        let tokens = title_tokens("yes yes YES no");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("yes"));
        assert!(tokens.contains("no"));
    }

    #[test]
    fn test_identical_titles_score_max() {
        assert_eq!(similarity("Fed cuts rates in June", "Fed cuts rates in June"), 100.0);
        assert_eq!(similarity("Fed cuts rates", "fed, CUTS rates!"), 100.0);
    }

    #[test]
    fn test_empty_titles_score_zero() {
        assert_eq!(similarity("", "anything"), 0.0);
        assert_eq!(similarity("???", "???"), 0.0);
        assert_eq!(similarity("real title", "--- !!!"), 0.0);
    }

    #[test]
    fn test_subset_scaled_by_larger_side() {
        // 4 shared words, larger side has 5
        let score = similarity("Will X win election", "Will X win the election?");
        assert_eq!(score, 80.0);
    }

    #[test]
    fn test_duplicates_do_not_inflate_score() {
        assert_eq!(similarity("win win win", "win"), 100.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("Will X win election", "Will X win the election?"),
            ("Fed cuts rates in June", "Will the Fed cut rates"),
            ("", "abc"),
            ("a b c d e", "c d e f"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_disjoint_titles() {
        assert_eq!(similarity("rain in london", "snow tokyo"), 0.0);
    }

    #[test]
    fn test_score_bounds() {
        let score = similarity("a b c", "a b d e f");
        assert!((0.0..=MAX_SIMILARITY).contains(&score));
        assert_eq!(score, 40.0);
    }
}
