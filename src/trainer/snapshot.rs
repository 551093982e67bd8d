use crate::trainer::typing::TypingFeedback;
use crate::trainer::word::Word;

#[derive(Clone, Debug, PartialEq)]
pub enum WordDisplay {
    Loading,
    LoadFailed,
    /// The collection itself is empty.
    NoWords,
    /// The collection has words but none match the search term.
    NoMatches,
    Word {
        word: Word,
        /// 1-based position within the filtered view.
        position: usize,
    },
}

impl WordDisplay {
    /// Placeholder text for the word and sentence lines when no word is shown.
    pub fn placeholder(&self) -> Option<(&'static str, &'static str)> {
        match self {
            WordDisplay::Loading => Some(("Loading words...", "")),
            WordDisplay::LoadFailed => Some(("Failed to load words.", "Check the log for errors.")),
            WordDisplay::NoWords => Some(("No words available. Add some!", "")),
            WordDisplay::NoMatches => Some(("No matching words", "")),
            WordDisplay::Word { .. } => None,
        }
    }
}

/// Everything the UI needs to draw one frame. Produced by
/// `Trainer::snapshot` after each state change; never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainerSnapshot {
    pub display: WordDisplay,
    pub total: usize,
    pub filtered: usize,
    pub search_term: String,
    pub locale: String,
    pub typing_mode: bool,
    pub feedback: Option<TypingFeedback>,
    pub streak: u32,
    pub accuracy_percent: f64,
    pub advance_pending: bool,
    /// Bumped whenever the typing input must be cleared.
    pub input_generation: u64,
}

impl TrainerSnapshot {
    pub fn count_text(&self) -> String {
        if self.filtered == self.total {
            format!("Total words: {}", self.total)
        } else {
            format!("Showing {} of {} words", self.filtered, self.total)
        }
    }

    pub fn streak_text(&self) -> String {
        format!("Streak: {}", self.streak)
    }

    pub fn accuracy_text(&self) -> String {
        format!("Accuracy: {:.2}%", self.accuracy_percent)
    }

    pub fn feedback_text(&self) -> &'static str {
        self.feedback.map(TypingFeedback::message).unwrap_or("")
    }

    pub fn current_word(&self) -> Option<&Word> {
        match &self.display {
            WordDisplay::Word { word, .. } => Some(word),
            _ => None,
        }
    }
}
