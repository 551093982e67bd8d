#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingFeedback {
    /// Input is an exact prefix of the target.
    InProgress,
    /// Input equals the target.
    Completed,
    Mismatch,
}

impl TypingFeedback {
    pub fn message(self) -> &'static str {
        match self {
            TypingFeedback::InProgress => "Keep going...",
            TypingFeedback::Completed => "Correct! Next word!",
            TypingFeedback::Mismatch => "Incorrect. Try again.",
        }
    }

    pub fn is_correct(self) -> bool {
        !matches!(self, TypingFeedback::Mismatch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypingReport {
    pub feedback: TypingFeedback,
    pub streak: u32,
    pub accuracy_percent: f64,
}

/// Cumulative practice statistics. Counters survive navigation and mode
/// toggles; only a mismatch touches the streak.
#[derive(Clone, Debug, Default)]
pub struct TypingSession {
    pub mode: bool,
    pub streak: u32,
    pub correct_chars: u64,
    pub total_chars: u64,
}

impl TypingSession {
    /// Compare one input event against `target`. Every call counts as a
    /// keystroke, so accuracy is correct events over all events rather than
    /// per character.
    pub fn check(&mut self, target: &str, input: &str) -> TypingReport {
        self.total_chars += 1;

        let feedback = if target.starts_with(input) {
            self.correct_chars += 1;
            if input == target {
                self.streak += 1;
                TypingFeedback::Completed
            } else {
                TypingFeedback::InProgress
            }
        } else {
            self.streak = 0;
            TypingFeedback::Mismatch
        };

        TypingReport {
            feedback,
            streak: self.streak,
            accuracy_percent: self.accuracy_percent(),
        }
    }

    pub fn accuracy_percent(&self) -> f64 {
        if self.total_chars == 0 {
            return 0.0;
        }
        let raw = self.correct_chars as f64 / self.total_chars as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    }
}
