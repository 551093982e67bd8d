mod app;
mod config;
mod event;
mod logging;
mod speech;
mod store;
mod trainer;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, EditorKind, Focus, MessageKind};
use config::Config;
use event::{AppEvent, EventHandler};
use speech::CommandSpeaker;
use store::{FileWordStore, HttpWordStore, WordStore};
use ui::components::dialog::{ConfirmDialog, EditorDialog};
use ui::components::search_bar::SearchBar;
use ui::components::typing_panel::TypingPanel;
use ui::components::word_card::WordCard;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "vocab-trainer",
    version,
    about = "Terminal vocabulary trainer with search, typing practice and pronunciation"
)]
struct Cli {
    #[arg(short, long, help = "Base URL of the word API (e.g. http://127.0.0.1:5000)")]
    api_url: Option<String>,

    #[arg(short, long, help = "Use a local words.json instead of the HTTP API")]
    file: Option<PathBuf>,

    #[arg(short, long, help = "Pronunciation locale (e.g. en-US, es-ES)")]
    locale: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Log level filter (overridden by RUST_LOG)")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(locale) = cli.locale {
        if !config.locales.contains(&locale) {
            config.locales.push(locale.clone());
        }
        config.locale = locale;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let log_path = logging::default_log_path();
    if let Err(err) = logging::init_logging(&config.log_level, &log_path) {
        eprintln!("Warning: logging disabled: {err:#}");
    }

    let store: Arc<dyn WordStore> = match cli.file {
        Some(path) => {
            tracing::info!(path = %path.display(), "using local word file");
            Arc::new(FileWordStore::new(path))
        }
        None => {
            tracing::info!(url = %config.api_base_url, "using word API");
            Arc::new(HttpWordStore::new(&config.api_base_url, config.request_timeout())?)
        }
    };

    let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
    let speaker = Box::new(CommandSpeaker::new(config.speech_command.clone()));

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, theme, store, speaker, events.sender());
    app.reload();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if app.config_dirty {
        if let Err(err) = app.config.save() {
            tracing::warn!(error = %err, "could not save config");
        }
    }

    if let Err(err) = result {
        tracing::error!(error = %err, "exited with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
            AppEvent::Store(event) => app.handle_store_event(event),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.focus {
        Focus::Browse => handle_browse_key(app, key),
        Focus::Search => app.search_key(key),
        Focus::Typing => handle_typing_key(app, key),
        Focus::ConfirmRemove(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_remove(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_remove(false),
            _ => {}
        },
        Focus::Editor(_) => app.editor_key(key),
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Right | KeyCode::Char('n') => app.next(),
        KeyCode::Left | KeyCode::Char('p') => app.previous(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('t') => app.toggle_typing(),
        KeyCode::Char(' ') => app.pronounce(),
        KeyCode::Char('l') => app.cycle_locale(1),
        KeyCode::Char('L') => app.cycle_locale(-1),
        KeyCode::Char('d') | KeyCode::Delete => app.request_remove(),
        KeyCode::Char('a') => app.open_editor(EditorKind::Add),
        KeyCode::Char('e') => app.open_editor(EditorKind::Edit),
        KeyCode::Char('s') => app.download(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.previous(),
        KeyCode::Down => app.next(),
        KeyCode::Tab => app.pronounce(),
        _ => app.typing_key(key),
    }
}

fn footer_hints(focus: &Focus) -> &'static [&'static str] {
    match focus {
        Focus::Browse => &[
            "[←/→] Prev/Next",
            "[/] Search",
            "[t] Typing",
            "[space] Speak",
            "[l/L] Locale",
            "[a] Add",
            "[e] Edit",
            "[d] Delete",
            "[s] Download",
            "[r] Reload",
            "[q] Quit",
        ],
        Focus::Search => &["[type] Filter", "[Enter/Esc] Done", "[Ctrl-U] Clear"],
        Focus::Typing => &["[type] Practice", "[↑/↓] Prev/Next", "[Tab] Speak", "[Esc] Leave typing"],
        Focus::ConfirmRemove(_) => &["[y] Remove", "[n] Keep"],
        Focus::Editor(_) => &["[Tab] Switch field", "[Enter] Save", "[Esc] Cancel"],
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let snapshot = &app.snapshot;

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);

    let hints = pack_hint_lines(footer_hints(&app.focus), area.width as usize);
    let layout = AppLayout::new(area, snapshot.typing_mode, hints.len() as u16);

    let mode = if snapshot.typing_mode { "Typing" } else { "Browse" };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " vocab-trainer ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {mode} | {} | Voice: {}", snapshot.count_text(), snapshot.locale),
            Style::default().fg(colors.text_pending()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let search = SearchBar::new(
        &app.search_input,
        matches!(app.focus, Focus::Search),
        snapshot.count_text(),
        app.theme,
    );
    frame.render_widget(search, layout.search);

    frame.render_widget(WordCard::new(snapshot, app.theme), layout.card);

    if let Some(typing_area) = layout.typing {
        let panel = TypingPanel::new(&app.typing_input, snapshot, layout.tier, app.theme);
        frame.render_widget(panel, typing_area);
    }

    if let Some(ref message) = app.message {
        let color = match message.kind {
            MessageKind::Info => colors.success(),
            MessageKind::Error => colors.error(),
        };
        let line = Paragraph::new(Span::styled(
            format!(" {}", message.text),
            Style::default().fg(color),
        ));
        frame.render_widget(line, layout.message);
    }

    let footer_lines: Vec<Line> = hints
        .into_iter()
        .map(|h| Line::from(Span::styled(h, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);

    match &app.focus {
        Focus::ConfirmRemove(target) => {
            let popup = centered_rect(50, 30, area);
            let message = format!(
                "Are you sure you want to remove the word \"{}\"?",
                target.word.word
            );
            frame.render_widget(ConfirmDialog::new(message, app.theme), popup);
        }
        Focus::Editor(editor) => {
            let popup = centered_rect(60, 50, area);
            let dialog = EditorDialog::new(
                editor.kind.title(),
                &editor.word,
                &editor.sentence,
                editor.active,
                app.theme,
            )
            .error(editor.error.as_deref());
            frame.render_widget(dialog, popup);
        }
        _ => {}
    }
}
