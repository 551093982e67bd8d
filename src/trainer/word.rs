use serde::{Deserialize, Serialize};

use crate::trainer::search;

/// A vocabulary entry as served by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    #[serde(default)]
    pub sentence: String,
}

impl Word {
    pub fn new(word: &str, sentence: &str) -> Self {
        Self {
            word: word.to_string(),
            sentence: sentence.to_string(),
        }
    }
}

/// Stable identity for a word within one loaded collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(pub u64);

#[derive(Clone, Debug)]
pub struct Entry {
    pub id: WordId,
    pub word: Word,
    // Lowercased, NFC-normalized copies used by search.
    word_key: String,
    sentence_key: String,
}

impl Entry {
    fn new(id: WordId, word: Word) -> Self {
        let word_key = search::normalize(&word.word);
        let sentence_key = search::normalize(&word.sentence);
        Self {
            id,
            word,
            word_key,
            sentence_key,
        }
    }

    pub fn matches(&self, term: &str) -> bool {
        term.is_empty() || self.word_key.contains(term) || self.sentence_key.contains(term)
    }
}

/// The full word list, in backend order.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Collection {
    /// Replace every entry. Ids keep increasing across reloads so a stale id
    /// never resolves to a different word.
    pub fn replace(&mut self, words: Vec<Word>) {
        let mut entries = Vec::with_capacity(words.len());
        for word in words {
            entries.push(Entry::new(WordId(self.next_id), word));
            self.next_id += 1;
        }
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Positional index of `id`, the only identity the backend understands.
    pub fn position_of(&self, id: WordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_assigns_fresh_ids() {
        let mut collection = Collection::default();
        collection.replace(vec![Word::new("cat", ""), Word::new("dog", "")]);
        let first_ids: Vec<WordId> = collection.entries().iter().map(|e| e.id).collect();

        collection.replace(vec![Word::new("cat", "")]);
        assert_eq!(collection.len(), 1);
        assert!(!first_ids.contains(&collection.entries()[0].id));
    }

    #[test]
    fn test_position_of_stale_id_is_none() {
        let mut collection = Collection::default();
        collection.replace(vec![Word::new("cat", "")]);
        let stale = collection.entries()[0].id;
        collection.replace(vec![Word::new("cat", "")]);
        assert_eq!(collection.position_of(stale), None);
        assert_eq!(collection.position_of(collection.entries()[0].id), Some(0));
    }

    #[test]
    fn test_word_deserializes_without_sentence() {
        let word: Word = serde_json::from_str(r#"{"word": "hola"}"#).unwrap();
        assert_eq!(word, Word::new("hola", ""));
    }

    #[test]
    fn test_entry_matches_word_or_sentence() {
        let entry = Entry::new(WordId(0), Word::new("Katze", "Die Katze schläft."));
        assert!(entry.matches("katz"));
        assert!(entry.matches("schläft"));
        assert!(entry.matches(""));
        assert!(!entry.matches("hund"));
    }
}
