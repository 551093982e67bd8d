use std::time::{Duration, Instant};

use thiserror::Error;

use crate::store::{StoreError, WordStore};
use crate::trainer::search;
use crate::trainer::snapshot::{TrainerSnapshot, WordDisplay};
use crate::trainer::typing::{TypingFeedback, TypingReport, TypingSession};
use crate::trainer::word::{Collection, Entry, Word, WordId};

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

/// A backend change that is followed by a full reload of the word list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    Remove { index: usize, word: Word },
    Add { word: Word },
    Update { index: usize, word: Word },
}

impl Mutation {
    pub fn verb(&self) -> &'static str {
        match self {
            Mutation::Remove { .. } => "remove",
            Mutation::Add { .. } => "add",
            Mutation::Update { .. } => "update",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::Remove { .. } => "Word removed successfully!",
            Mutation::Add { .. } => "Word added successfully!",
            Mutation::Update { .. } => "Word updated successfully!",
        }
    }

    /// Perform the change and fetch the resulting list. Blocks; the app runs
    /// this on a worker thread.
    pub fn run(&self, store: &dyn WordStore) -> Result<Vec<Word>, MutationError> {
        let applied = match self {
            Mutation::Remove { index, .. } => store.delete_word(*index),
            Mutation::Add { word } => store.add_word(word),
            Mutation::Update { index, word } => store.update_word(*index, word),
        };
        applied.map_err(MutationError::from_store)?;
        store.list_words().map_err(MutationError::Reload)
    }
}

#[derive(Debug, Error)]
pub enum MutationError {
    /// The backend answered with an error status.
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Store(StoreError),
    /// The change went through but the fresh list could not be fetched.
    #[error("reload failed: {0}")]
    Reload(StoreError),
}

impl MutationError {
    fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::Rejected { reason, .. } => MutationError::Rejected(reason),
            other => MutationError::Store(other),
        }
    }

    /// User-facing message, e.g. "Failed to remove word: Invalid index".
    pub fn message(&self, verb: &str) -> String {
        match self {
            MutationError::Rejected(reason) => format!("Failed to {verb} word: {reason}"),
            _ => format!("Failed to {verb} word. Check the log for details."),
        }
    }
}

pub type RemoveError = MutationError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Word must not be empty")]
    EmptyWord,
}

/// The word on screen, pinned by its id. Requests built from it resolve the
/// id again, so a reload in between can never retarget them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetWord {
    pub id: WordId,
    pub word: Word,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PronounceRequest {
    pub text: String,
    pub locale: String,
}

/// Owns the word list, the filtered view over it, the cursor and the typing
/// session. Every mutation happens through `&mut self` on the event loop.
pub struct Trainer {
    collection: Collection,
    // Collection indices of the words matching `search_term`, in order.
    view: Vec<usize>,
    cursor: usize,
    search_term: String,
    typing: TypingSession,
    feedback: Option<TypingFeedback>,
    locale: String,
    status: LoadStatus,
    advance_delay: Duration,
    pending_advance: Option<Instant>,
    input_generation: u64,
}

impl Trainer {
    pub fn new(locale: &str, advance_delay: Duration) -> Self {
        Self {
            collection: Collection::default(),
            view: Vec::new(),
            cursor: 0,
            search_term: String::new(),
            typing: TypingSession::default(),
            feedback: None,
            locale: locale.to_string(),
            status: LoadStatus::Loading,
            advance_delay,
            pending_advance: None,
            input_generation: 0,
        }
    }

    // --- collection ---

    pub fn load(&mut self, words: Vec<Word>) {
        self.collection.replace(words);
        self.status = LoadStatus::Ready;
        self.refilter();
        self.cancel_advance();
        self.reset_input();
        tracing::info!(
            total = self.collection.len(),
            filtered = self.view.len(),
            "word list loaded"
        );
    }

    pub fn load_failed(&mut self) {
        self.status = LoadStatus::Failed;
        self.cancel_advance();
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn total(&self) -> usize {
        self.collection.len()
    }

    // --- search ---

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = search::normalize(term);
        self.refilter();
        self.cancel_advance();
        tracing::debug!(term = %self.search_term, matches = self.view.len(), "search applied");
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    fn refilter(&mut self) {
        self.view = search::filter_indices(&self.collection, &self.search_term);
        self.cursor = 0;
    }

    /// The words currently in the filtered view, in order.
    pub fn filtered(&self) -> Vec<&Word> {
        self.view
            .iter()
            .filter_map(|&i| self.collection.get(i))
            .map(|e| &e.word)
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    // --- navigation ---

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Entry> {
        self.view
            .get(self.cursor)
            .and_then(|&i| self.collection.get(i))
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.current().map(|e| &e.word)
    }

    pub fn next(&mut self) {
        self.cancel_advance();
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.cancel_advance();
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
        self.reset_input();
    }

    // --- mutations ---

    /// The word on screen, or `None` when nothing is shown.
    pub fn target(&self) -> Option<TargetWord> {
        let entry = self.current()?;
        Some(TargetWord {
            id: entry.id,
            word: entry.word.clone(),
        })
    }

    /// Delete request for `target`, addressed by its position in the full
    /// list (not in the filtered view) as of now. `None` once a reload has
    /// replaced the word.
    pub fn remove_request(&self, target: &TargetWord) -> Option<Mutation> {
        let index = self.collection.position_of(target.id)?;
        Some(Mutation::Remove {
            index,
            word: target.word.clone(),
        })
    }

    pub fn add_request(&self, word: Word) -> Result<Mutation, EditError> {
        Ok(Mutation::Add {
            word: validate(word)?,
        })
    }

    /// Replace `target` with `word`. `Ok(None)` once a reload has replaced
    /// the target.
    pub fn edit_request(
        &self,
        target: &TargetWord,
        word: Word,
    ) -> Result<Option<Mutation>, EditError> {
        let word = validate(word)?;
        Ok(self
            .collection
            .position_of(target.id)
            .map(|index| Mutation::Update { index, word }))
    }

    /// Apply the outcome of `Mutation::run`. On success the returned list
    /// replaces the collection; a rejected change leaves everything as is.
    pub fn complete(
        &mut self,
        mutation: &Mutation,
        result: Result<Vec<Word>, MutationError>,
    ) -> Result<(), MutationError> {
        match result {
            Ok(words) => {
                tracing::info!(action = mutation.verb(), "backend change applied");
                self.load(words);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(action = mutation.verb(), error = %err, "backend change failed");
                if matches!(err, MutationError::Reload(_)) {
                    self.load_failed();
                }
                Err(err)
            }
        }
    }

    /// Remove the displayed word synchronously. `Ok(None)` when there was
    /// nothing to remove.
    pub fn remove(&mut self, store: &dyn WordStore) -> Result<Option<Word>, RemoveError> {
        let Some(target) = self.target() else {
            return Ok(None);
        };
        let Some(mutation) = self.remove_request(&target) else {
            return Ok(None);
        };
        let result = mutation.run(store);
        self.complete(&mutation, result)?;
        Ok(Some(target.word))
    }

    // --- typing practice ---

    pub fn typing(&self) -> &TypingSession {
        &self.typing
    }

    pub fn typing_mode(&self) -> bool {
        self.typing.mode
    }

    pub fn toggle_typing_mode(&mut self) -> bool {
        self.typing.mode = !self.typing.mode;
        self.cancel_advance();
        if self.typing.mode {
            self.reset_input();
        }
        self.typing.mode
    }

    pub fn check_typing(&mut self, input: &str) -> Option<TypingReport> {
        self.check_typing_at(input, Instant::now())
    }

    pub fn check_typing_at(&mut self, input: &str, now: Instant) -> Option<TypingReport> {
        let target = self.current_word()?.word.clone();
        let report = self.typing.check(&target, input);
        self.feedback = Some(report.feedback);

        if report.feedback == TypingFeedback::Completed {
            self.input_generation += 1;
            self.pending_advance = Some(now + self.advance_delay);
            tracing::debug!(word = %target, streak = report.streak, "word completed");
        }
        Some(report)
    }

    /// Fire the deferred advance if it is due. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_advance {
            Some(due) if now >= due => {
                self.pending_advance = None;
                self.step(1);
                true
            }
            _ => false,
        }
    }

    pub fn advance_pending(&self) -> bool {
        self.pending_advance.is_some()
    }

    fn cancel_advance(&mut self) {
        self.pending_advance = None;
    }

    fn reset_input(&mut self) {
        self.feedback = None;
        self.input_generation += 1;
    }

    // --- pronunciation ---

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn change_locale(&mut self, locale: &str) {
        self.locale = locale.to_string();
    }

    pub fn pronounce(&self) -> Option<PronounceRequest> {
        let word = self.current_word()?;
        Some(PronounceRequest {
            text: word.word.clone(),
            locale: self.locale.clone(),
        })
    }

    // --- rendering ---

    pub fn snapshot(&self) -> TrainerSnapshot {
        let display = match (self.status, self.current_word()) {
            (LoadStatus::Loading, _) => WordDisplay::Loading,
            (LoadStatus::Failed, _) => WordDisplay::LoadFailed,
            (LoadStatus::Ready, Some(word)) => WordDisplay::Word {
                word: word.clone(),
                position: self.cursor + 1,
            },
            (LoadStatus::Ready, None) if self.collection.is_empty() => WordDisplay::NoWords,
            (LoadStatus::Ready, None) => WordDisplay::NoMatches,
        };

        TrainerSnapshot {
            display,
            total: self.collection.len(),
            filtered: self.view.len(),
            search_term: self.search_term.clone(),
            locale: self.locale.clone(),
            typing_mode: self.typing.mode,
            feedback: self.feedback,
            streak: self.typing.streak,
            accuracy_percent: self.typing.accuracy_percent(),
            advance_pending: self.pending_advance.is_some(),
            input_generation: self.input_generation,
        }
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new("en-US", DEFAULT_ADVANCE_DELAY)
    }
}

fn validate(word: Word) -> Result<Word, EditError> {
    let text = word.word.trim();
    if text.is_empty() {
        return Err(EditError::EmptyWord);
    }
    Ok(Word::new(text, word.sentence.trim()))
}
