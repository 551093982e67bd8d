use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::config::Config;
use crate::event::{AppEvent, StoreEvent};
use crate::speech::Speaker;
use crate::store::WordStore;
use crate::store::download::save_download;
use crate::trainer::{Mutation, TargetWord, Trainer, TrainerSnapshot, Word};
use crate::ui::components::dialog::EditorField;
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKind {
    Add,
    Edit,
}

impl EditorKind {
    pub fn title(self) -> &'static str {
        match self {
            EditorKind::Add => "Add Word",
            EditorKind::Edit => "Edit Word",
        }
    }
}

pub struct EditorState {
    pub kind: EditorKind,
    pub word: LineInput,
    pub sentence: LineInput,
    pub active: EditorField,
    pub error: Option<String>,
    // Word being edited; `None` when adding.
    target: Option<TargetWord>,
}

impl EditorState {
    fn new(kind: EditorKind, target: Option<TargetWord>) -> Self {
        let (word, sentence) = match &target {
            Some(t) => (t.word.word.as_str(), t.word.sentence.as_str()),
            None => ("", ""),
        };
        Self {
            kind,
            word: LineInput::new(word),
            sentence: LineInput::new(sentence),
            active: EditorField::Word,
            error: None,
            target,
        }
    }

    fn active_input(&mut self) -> &mut LineInput {
        match self.active {
            EditorField::Word => &mut self.word,
            EditorField::Sentence => &mut self.sentence,
        }
    }
}

pub enum Focus {
    Browse,
    Search,
    Typing,
    ConfirmRemove(TargetWord),
    Editor(EditorState),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
    pub expires_at: Instant,
}

pub struct App {
    pub trainer: Trainer,
    pub snapshot: TrainerSnapshot,
    pub focus: Focus,
    pub search_input: LineInput,
    pub typing_input: LineInput,
    pub message: Option<Message>,
    pub config: Config,
    pub config_dirty: bool,
    pub theme: &'static Theme,
    pub should_quit: bool,
    store: Arc<dyn WordStore>,
    speaker: Box<dyn Speaker>,
    events: Sender<AppEvent>,
    seen_generation: u64,
}

impl App {
    pub fn new(
        config: Config,
        theme: &'static Theme,
        store: Arc<dyn WordStore>,
        speaker: Box<dyn Speaker>,
        events: Sender<AppEvent>,
    ) -> Self {
        let trainer = Trainer::new(&config.locale, config.advance_delay());
        let snapshot = trainer.snapshot();
        let seen_generation = snapshot.input_generation;
        Self {
            trainer,
            snapshot,
            focus: Focus::Browse,
            search_input: LineInput::default(),
            typing_input: LineInput::default(),
            message: None,
            config,
            config_dirty: false,
            theme,
            should_quit: false,
            store,
            speaker,
            events,
            seen_generation,
        }
    }

    /// Re-read controller state after a mutation. Clears the typing line when
    /// the controller asked for it.
    fn refresh(&mut self) {
        self.snapshot = self.trainer.snapshot();
        if self.snapshot.input_generation != self.seen_generation {
            self.seen_generation = self.snapshot.input_generation;
            self.typing_input.clear();
        }
    }

    pub fn flash(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.message = Some(Message {
            text: text.into(),
            kind,
            expires_at: Instant::now() + self.config.message_duration(),
        });
    }

    /// Run a backend call on a worker thread; its result comes back through
    /// the event channel.
    fn spawn_store<F>(&self, job: F)
    where
        F: FnOnce(&dyn WordStore) -> StoreEvent + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let tx = self.events.clone();
        thread::spawn(move || {
            let event = job(store.as_ref());
            let _ = tx.send(AppEvent::Store(event));
        });
    }

    pub fn reload(&mut self) {
        tracing::info!("loading word list");
        self.spawn_store(|store| StoreEvent::Loaded(store.list_words()));
    }

    pub fn handle_store_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Loaded(Ok(words)) => self.trainer.load(words),
            StoreEvent::Loaded(Err(err)) => {
                tracing::error!(error = %err, "failed to load words");
                self.trainer.load_failed();
            }
            StoreEvent::Mutated(mutation, result) => {
                match self.trainer.complete(&mutation, result) {
                    Ok(()) => self.flash(mutation.success_message(), MessageKind::Info),
                    Err(err) => {
                        tracing::error!(action = mutation.verb(), error = %err, "word change failed");
                        self.flash(err.message(mutation.verb()), MessageKind::Error);
                    }
                }
            }
            StoreEvent::Downloaded(Ok(path)) => {
                tracing::info!(path = %path.display(), "download saved");
                self.flash(format!("Saved {}", path.display()), MessageKind::Info);
            }
            StoreEvent::Downloaded(Err(err)) => {
                tracing::error!(error = %err, "download failed");
                self.flash("Download failed. Check the log for details.", MessageKind::Error);
            }
        }
        self.refresh();
    }

    pub fn tick(&mut self, now: Instant) {
        if self.trainer.tick(now) {
            self.refresh();
        }
        if self.message.as_ref().is_some_and(|m| now >= m.expires_at) {
            self.message = None;
        }
    }

    // --- browsing ---

    pub fn next(&mut self) {
        self.trainer.next();
        self.refresh();
    }

    pub fn previous(&mut self) {
        self.trainer.previous();
        self.refresh();
    }

    pub fn start_search(&mut self) {
        self.focus = Focus::Search;
    }

    pub fn search_key(&mut self, key: KeyEvent) {
        match self.search_input.handle(key) {
            InputResult::Changed => {
                self.trainer.set_search_term(self.search_input.value());
                self.refresh();
            }
            InputResult::Submit | InputResult::Cancel => self.focus = Focus::Browse,
            InputResult::Continue => {}
        }
    }

    pub fn cycle_locale(&mut self, step: isize) {
        let locale = self.config.cycle_locale(self.trainer.locale(), step);
        self.trainer.change_locale(&locale);
        self.config.locale = locale;
        self.config_dirty = true;
        self.refresh();
    }

    pub fn pronounce(&mut self) {
        let Some(request) = self.trainer.pronounce() else {
            return;
        };
        if let Err(err) = self.speaker.speak(&request) {
            tracing::warn!(error = %err, "pronunciation failed");
            self.flash(format!("Pronunciation failed: {err}"), MessageKind::Error);
        }
    }

    pub fn download(&mut self) {
        let dir = PathBuf::from(&self.config.download_dir);
        tracing::info!(dir = %dir.display(), "downloading word list");
        self.spawn_store(move |store| {
            let result = store
                .download()
                .and_then(|bytes| save_download(&dir, &bytes));
            StoreEvent::Downloaded(result)
        });
    }

    // --- typing practice ---

    pub fn toggle_typing(&mut self) {
        let on = self.trainer.toggle_typing_mode();
        self.focus = if on { Focus::Typing } else { Focus::Browse };
        self.refresh();
    }

    pub fn typing_key(&mut self, key: KeyEvent) {
        match self.typing_input.handle(key) {
            InputResult::Changed => {
                self.trainer.check_typing(self.typing_input.value());
                self.refresh();
            }
            InputResult::Cancel => self.toggle_typing(),
            InputResult::Submit | InputResult::Continue => {}
        }
    }

    // --- remove ---

    pub fn request_remove(&mut self) {
        if let Some(target) = self.trainer.target() {
            self.focus = Focus::ConfirmRemove(target);
        }
    }

    /// The position is resolved here, not when the dialog opened: a reload
    /// may have landed in between.
    pub fn confirm_remove(&mut self, confirmed: bool) {
        let focus = std::mem::replace(&mut self.focus, Focus::Browse);
        if let Focus::ConfirmRemove(target) = focus {
            if confirmed {
                match self.trainer.remove_request(&target) {
                    Some(mutation) => self.submit(mutation),
                    None => self.target_gone(&target, "remove"),
                }
            }
        }
        self.restore_typing_focus();
    }

    fn target_gone(&mut self, target: &TargetWord, verb: &str) {
        tracing::warn!(word = %target.word.word, action = verb, "word reloaded before the change was sent");
        self.flash(
            format!(
                "\"{}\" changed before it could be {verb}d. Nothing was sent.",
                target.word.word
            ),
            MessageKind::Error,
        );
    }

    fn submit(&self, mutation: Mutation) {
        tracing::info!(action = mutation.verb(), "sending word change");
        self.spawn_store(move |store| {
            let result = mutation.run(store);
            StoreEvent::Mutated(mutation, result)
        });
    }

    fn restore_typing_focus(&mut self) {
        if self.trainer.typing_mode() && matches!(self.focus, Focus::Browse) {
            self.focus = Focus::Typing;
        }
    }

    // --- add / edit ---

    pub fn open_editor(&mut self, kind: EditorKind) {
        let target = match kind {
            EditorKind::Add => None,
            EditorKind::Edit => match self.trainer.target() {
                Some(target) => Some(target),
                None => return,
            },
        };
        self.focus = Focus::Editor(EditorState::new(kind, target));
    }

    pub fn editor_key(&mut self, key: KeyEvent) {
        let Focus::Editor(editor) = &mut self.focus else {
            return;
        };
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            editor.active = editor.active.toggle();
            return;
        }
        match editor.active_input().handle(key) {
            InputResult::Cancel => {
                self.focus = Focus::Browse;
                self.restore_typing_focus();
            }
            InputResult::Submit => self.submit_editor(),
            InputResult::Changed => editor.error = None,
            InputResult::Continue => {}
        }
    }

    fn submit_editor(&mut self) {
        let Focus::Editor(editor) = &mut self.focus else {
            return;
        };
        let word = Word::new(editor.word.value(), editor.sentence.value());
        let request = match (&editor.target, editor.kind) {
            (Some(target), EditorKind::Edit) => self
                .trainer
                .edit_request(target, word)
                .map(|m| m.ok_or_else(|| target.clone())),
            _ => self.trainer.add_request(word).map(Ok),
        };
        match request {
            Err(err) => editor.error = Some(err.to_string()),
            Ok(outcome) => {
                self.focus = Focus::Browse;
                match outcome {
                    Ok(mutation) => self.submit(mutation),
                    Err(stale) => self.target_gone(&stale, "update"),
                }
                self.restore_typing_focus();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    use crate::speech::SpeechError;
    use crate::store::FileWordStore;
    use crate::trainer::PronounceRequest;
    use crate::trainer::typing::TypingFeedback;

    struct RecordingSpeaker(Rc<RefCell<Vec<PronounceRequest>>>);

    impl Speaker for RecordingSpeaker {
        fn speak(&self, request: &PronounceRequest) -> Result<(), SpeechError> {
            self.0.borrow_mut().push(request.clone());
            Ok(())
        }
    }

    struct Harness {
        app: App,
        rx: Receiver<AppEvent>,
        spoken: Rc<RefCell<Vec<PronounceRequest>>>,
        dir: TempDir,
    }

    impl Harness {
        fn new(words: &[(&str, &str)]) -> Self {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("words.json");
            let list: Vec<Word> = words.iter().map(|(w, s)| Word::new(w, s)).collect();
            std::fs::write(&path, serde_json::to_string(&list).unwrap()).unwrap();

            let mut config = Config::default();
            config.download_dir = dir.path().join("downloads").to_string_lossy().to_string();
            let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
            let spoken = Rc::new(RefCell::new(Vec::new()));
            let (tx, rx) = mpsc::channel();
            let app = App::new(
                config,
                theme,
                Arc::new(FileWordStore::new(path)),
                Box::new(RecordingSpeaker(Rc::clone(&spoken))),
                tx,
            );
            let mut harness = Self { app, rx, spoken, dir };
            harness.app.reload();
            harness.pump();
            harness
        }

        /// Deliver the next worker result to the app.
        fn pump(&mut self) {
            match self.rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                AppEvent::Store(event) => self.app.handle_store_event(event),
                _ => panic!("expected a store event"),
            }
        }

        fn type_str(&mut self, text: &str) {
            for ch in text.chars() {
                self.app.typing_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_initial_load() {
        let h = Harness::new(&[("cat", "The cat."), ("dog", "The dog.")]);
        assert_eq!(h.app.snapshot.total, 2);
        assert_eq!(h.app.snapshot.current_word().unwrap().word, "cat");
    }

    #[test]
    fn test_load_failure_shows_failed_state() {
        let mut h = Harness::new(&[]);
        std::fs::write(h.dir.path().join("words.json"), "garbage").unwrap();
        h.app.reload();
        h.pump();
        assert_eq!(h.app.snapshot.display, crate::trainer::WordDisplay::LoadFailed);
    }

    #[test]
    fn test_search_applies_per_keystroke() {
        let mut h = Harness::new(&[("cat", ""), ("cow", ""), ("dog", "")]);
        h.app.start_search();
        h.app.search_key(key(KeyCode::Char('c')));
        assert_eq!(h.app.snapshot.filtered, 2);
        h.app.search_key(key(KeyCode::Char('o')));
        assert_eq!(h.app.snapshot.filtered, 1);
        h.app.search_key(key(KeyCode::Enter));
        assert!(matches!(h.app.focus, Focus::Browse));
    }

    #[test]
    fn test_typing_completion_clears_input_and_advances() {
        let mut h = Harness::new(&[("hi", ""), ("yo", "")]);
        h.app.toggle_typing();
        assert!(matches!(h.app.focus, Focus::Typing));
        h.type_str("hi");
        assert_eq!(h.app.snapshot.feedback, Some(TypingFeedback::Completed));
        assert_eq!(h.app.typing_input.value(), "");
        assert_eq!(h.app.snapshot.streak, 1);

        h.app.tick(Instant::now() + Duration::from_secs(2));
        assert_eq!(h.app.snapshot.current_word().unwrap().word, "yo");
    }

    #[test]
    fn test_typing_mismatch_keeps_input() {
        let mut h = Harness::new(&[("hi", "")]);
        h.app.toggle_typing();
        h.type_str("hx");
        assert_eq!(h.app.snapshot.feedback, Some(TypingFeedback::Mismatch));
        assert_eq!(h.app.typing_input.value(), "hx");
        h.app.typing_key(key(KeyCode::Esc));
        assert!(!h.app.snapshot.typing_mode);
        assert!(matches!(h.app.focus, Focus::Browse));
    }

    #[test]
    fn test_navigation_clears_typing_input() {
        let mut h = Harness::new(&[("hello", ""), ("world", "")]);
        h.app.toggle_typing();
        h.type_str("he");
        h.app.next();
        assert_eq!(h.app.typing_input.value(), "");
        assert_eq!(h.app.snapshot.feedback, None);
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut h = Harness::new(&[("cat", ""), ("dog", "")]);
        h.app.request_remove();
        assert!(matches!(h.app.focus, Focus::ConfirmRemove(_)));
        h.app.confirm_remove(false);
        assert!(matches!(h.app.focus, Focus::Browse));
        assert!(h.rx.try_recv().is_err());
        assert_eq!(h.app.snapshot.total, 2);
    }

    #[test]
    fn test_remove_under_search_deletes_displayed_word() {
        let mut h = Harness::new(&[("cat", ""), ("dog", ""), ("cow", "")]);
        h.app.start_search();
        h.app.search_key(key(KeyCode::Char('o')));
        h.app.next(); // view: dog, cow -> cow
        assert_eq!(h.app.snapshot.current_word().unwrap().word, "cow");

        h.app.request_remove();
        h.app.confirm_remove(true);
        h.pump();

        assert_eq!(h.app.snapshot.total, 2);
        assert_eq!(h.app.message.as_ref().unwrap().text, "Word removed successfully!");
        let store = FileWordStore::new(h.dir.path().join("words.json"));
        let left: Vec<String> = store.list_words().unwrap().into_iter().map(|w| w.word).collect();
        assert_eq!(left, vec!["cat", "dog"]);
    }

    #[test]
    fn test_confirm_after_reload_never_deletes_another_word() {
        let mut h = Harness::new(&[("cat", ""), ("dog", ""), ("owl", "")]);
        h.app.next();
        h.app.request_remove();
        h.app.confirm_remove(true); // first delete of "dog" in flight

        // Still showing "dog": ask again before the first result lands.
        h.app.request_remove();
        match &h.app.focus {
            Focus::ConfirmRemove(target) => assert_eq!(target.word.word, "dog"),
            _ => panic!("confirm dialog should be open"),
        }
        h.pump();
        h.app.confirm_remove(true);

        assert!(h.rx.try_recv().is_err());
        let message = h.app.message.as_ref().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.contains("\"dog\""));

        let store = FileWordStore::new(h.dir.path().join("words.json"));
        let left: Vec<String> = store.list_words().unwrap().into_iter().map(|w| w.word).collect();
        assert_eq!(left, vec!["cat", "owl"]);
    }

    #[test]
    fn test_edit_after_reload_is_not_sent() {
        let mut h = Harness::new(&[("cat", ""), ("dog", "")]);
        h.app.next();
        h.app.open_editor(EditorKind::Edit);
        h.app.reload();
        h.pump();
        h.app.editor_key(key(KeyCode::Char('s')));
        h.app.editor_key(key(KeyCode::Enter));

        assert!(matches!(h.app.focus, Focus::Browse));
        assert!(h.rx.try_recv().is_err());
        assert_eq!(h.app.message.as_ref().unwrap().kind, MessageKind::Error);
        let store = FileWordStore::new(h.dir.path().join("words.json"));
        let words: Vec<String> = store.list_words().unwrap().into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_edit_updates_displayed_word() {
        let mut h = Harness::new(&[("cat", ""), ("dog", "")]);
        h.app.next();
        h.app.open_editor(EditorKind::Edit);
        h.app.editor_key(key(KeyCode::Char('s')));
        h.app.editor_key(key(KeyCode::Enter));
        h.pump();

        assert_eq!(h.app.message.as_ref().unwrap().text, "Word updated successfully!");
        let store = FileWordStore::new(h.dir.path().join("words.json"));
        let words: Vec<String> = store.list_words().unwrap().into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["cat", "dogs"]);
    }

    #[test]
    fn test_remove_on_empty_does_nothing() {
        let mut h = Harness::new(&[]);
        h.app.request_remove();
        assert!(matches!(h.app.focus, Focus::Browse));
    }

    #[test]
    fn test_add_word_through_editor() {
        let mut h = Harness::new(&[("cat", "")]);
        h.app.open_editor(EditorKind::Add);
        for ch in "owl".chars() {
            h.app.editor_key(key(KeyCode::Char(ch)));
        }
        h.app.editor_key(key(KeyCode::Tab));
        for ch in "An owl.".chars() {
            h.app.editor_key(key(KeyCode::Char(ch)));
        }
        h.app.editor_key(key(KeyCode::Enter));
        h.pump();
        assert_eq!(h.app.snapshot.total, 2);
        assert_eq!(h.app.message.as_ref().unwrap().text, "Word added successfully!");
    }

    #[test]
    fn test_editor_rejects_empty_word() {
        let mut h = Harness::new(&[("cat", "")]);
        h.app.open_editor(EditorKind::Add);
        h.app.editor_key(key(KeyCode::Enter));
        match &h.app.focus {
            Focus::Editor(editor) => assert_eq!(editor.error.as_deref(), Some("Word must not be empty")),
            _ => panic!("editor should stay open"),
        }
    }

    #[test]
    fn test_edit_prefills_current_word() {
        let mut h = Harness::new(&[("cat", "The cat.")]);
        h.app.open_editor(EditorKind::Edit);
        match &h.app.focus {
            Focus::Editor(editor) => {
                assert_eq!(editor.word.value(), "cat");
                assert_eq!(editor.sentence.value(), "The cat.");
            }
            _ => panic!("editor should be open"),
        }
    }

    #[test]
    fn test_pronounce_and_locale_cycle() {
        let mut h = Harness::new(&[("gato", "")]);
        h.app.config.locales = vec!["en-US".into(), "es-ES".into()];
        h.app.cycle_locale(1);
        h.app.pronounce();
        let spoken = h.spoken.borrow();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "gato");
        assert_eq!(spoken[0].locale, "es-ES");
        assert!(h.app.config_dirty);
    }

    #[test]
    fn test_download_writes_words_json() {
        let mut h = Harness::new(&[("cat", "")]);
        h.app.download();
        h.pump();
        let saved = h.dir.path().join("downloads").join("words.json");
        assert!(saved.exists());
        assert_eq!(h.app.message.as_ref().unwrap().kind, MessageKind::Info);
    }

    #[test]
    fn test_message_expires() {
        let mut h = Harness::new(&[("cat", "")]);
        h.app.flash("hello", MessageKind::Info);
        h.app.tick(Instant::now() + Duration::from_secs(10));
        assert!(h.app.message.is_none());
    }
}
