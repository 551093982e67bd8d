use icu_normalizer::ComposingNormalizerBorrowed;

use crate::trainer::word::Collection;

/// Fold text for case-insensitive matching. NFC first so that a composed
/// "é" typed in the search line matches a decomposed one in the data.
pub fn normalize(text: &str) -> String {
    let nfc = ComposingNormalizerBorrowed::new_nfc();
    nfc.normalize(text).to_lowercase()
}

/// Collection indices whose word or sentence contains `term`, in collection
/// order. `term` must already be normalized.
pub fn filter_indices(collection: &Collection, term: &str) -> Vec<usize> {
    collection
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.matches(term))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::word::Word;

    fn collection(words: &[(&str, &str)]) -> Collection {
        let mut c = Collection::default();
        c.replace(words.iter().map(|(w, s)| Word::new(w, s)).collect());
        c
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("HeLLo"), "hello");
    }

    #[test]
    fn test_normalize_composes_accents() {
        assert_eq!(normalize("Cafe\u{301}"), normalize("caf\u{e9}"));
    }

    #[test]
    fn test_empty_term_keeps_everything_in_order() {
        let c = collection(&[("b", ""), ("a", ""), ("c", "")]);
        assert_eq!(filter_indices(&c, ""), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_matches_sentence_too() {
        let c = collection(&[
            ("cat", "The cat sat."),
            ("dog", "A dog barks."),
            ("bird", "Cats chase birds."),
        ]);
        assert_eq!(filter_indices(&c, "cat"), vec![0, 2]);
        assert_eq!(filter_indices(&c, "bark"), vec![1]);
        assert!(filter_indices(&c, "fish").is_empty());
    }
}
