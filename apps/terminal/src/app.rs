//! Application state: the loaded set and whichever study mode is active.

use crate::events::AppEvent;
use anyhow::Result;
use clap::ValueEnum;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crate::ui;
use flashdeck_core::viewer::SWIPE_THRESHOLD;
use flashdeck_core::{
    write_csv, Exam, FlashcardSet, LearnSession, LearnState, MatchGame, Viewer, ViewerKey,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Position, Rect};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Tiles per row in the match grid.
pub const MATCH_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeKind {
    Viewer,
    Learn,
    Match,
    Test,
}

impl ModeKind {
    pub const ALL: [ModeKind; 4] = [Self::Viewer, Self::Learn, Self::Match, Self::Test];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Viewer => "Flashcards",
            Self::Learn => "Learn",
            Self::Match => "Match",
            Self::Test => "Test",
        }
    }

    fn from_function_key(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

/// Match game plus the keyboard cursor over its tiles.
#[derive(Debug)]
pub struct MatchView {
    pub game: MatchGame<StdRng>,
    pub cursor: usize,
}

/// Test session plus the card whose answer is being edited.
#[derive(Debug)]
pub struct TestView {
    pub exam: Exam,
    pub cursor: usize,
}

#[derive(Debug)]
pub enum Mode {
    Viewer(Viewer<StdRng>),
    Learn(LearnSession<StdRng>),
    Match(MatchView),
    Test(TestView),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Viewer(_) => ModeKind::Viewer,
            Self::Learn(_) => ModeKind::Learn,
            Self::Match(_) => ModeKind::Match,
            Self::Test(_) => ModeKind::Test,
        }
    }
}

#[derive(Debug)]
pub struct App {
    set: Arc<FlashcardSet>,
    mode: Mode,
    export_dir: PathBuf,
    seed: Option<u64>,
    status: Option<String>,
    screen: Rect,
    drag_from: Option<u16>,
    should_quit: bool,
}

impl App {
    pub fn new(
        set: Arc<FlashcardSet>,
        kind: ModeKind,
        export_dir: PathBuf,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mode = build_mode(&set, kind, seed)?;
        Ok(Self {
            set,
            mode,
            export_dir,
            seed,
            status: None,
            screen: Rect::default(),
            drag_from: None,
            should_quit: false,
        })
    }

    pub fn set(&self) -> &FlashcardSet {
        &self.set
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Record the size of the last drawn frame, for mouse hit-testing.
    pub fn resize(&mut self, screen: Rect) {
        self.screen = screen;
    }

    /// Whether the 100 ms clock should be running.
    pub fn needs_ticker(&self) -> bool {
        matches!(self.mode, Mode::Match(_))
    }

    /// Leave the current mode and enter a fresh session of `kind`.
    pub fn switch_mode(&mut self, kind: ModeKind) -> Result<()> {
        self.mode = build_mode(&self.set, kind, self.seed)?;
        self.status = None;
        self.drag_from = None;
        tracing::info!(mode = kind.label(), "switched mode");
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {
                if let Mode::Match(view) = &mut self.mode {
                    view.game.tick();
                }
            }
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key)?;
            }
            AppEvent::Input(Event::Mouse(mouse)) => self.handle_mouse(mouse),
            AppEvent::Input(_) => {}
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        if let KeyCode::F(n) = key.code {
            if let Some(kind) = ModeKind::from_function_key(n) {
                return self.switch_mode(kind);
            }
        }

        let handled = match &mut self.mode {
            Mode::Viewer(viewer) => {
                if viewer.search_overlay().is_none() && key.code == KeyCode::Char('e') {
                    self.status = Some(export_status(&self.set, &self.export_dir));
                    true
                } else {
                    viewer_key(key.code).is_some_and(|k| viewer.handle_key(k))
                }
            }
            Mode::Learn(session) => handle_learn_key(session, key),
            Mode::Match(view) => handle_match_key(view, key),
            Mode::Test(view) => handle_test_key(view, key),
        };

        if !handled && key.code == KeyCode::Char('q') {
            self.should_quit = true;
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Mode::Viewer(viewer) = &mut self.mode else {
            return;
        };
        if viewer.search_overlay().is_some() {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // presses outside the card never flip or swipe
                let card = ui::viewer_card_area(self.screen);
                self.drag_from = card
                    .contains(Position::new(mouse.column, mouse.row))
                    .then_some(mouse.column);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(from) = self.drag_from.take() else {
                    return;
                };
                let (from, to) = (i32::from(from), i32::from(mouse.column));
                if (from - to).abs() > SWIPE_THRESHOLD {
                    viewer.swipe(from, to);
                } else {
                    viewer.tap();
                }
            }
            _ => {}
        }
    }
}

/// Write the set as CSV and describe the outcome for the status line.
fn export_status(set: &FlashcardSet, dir: &Path) -> String {
    match write_csv(set, dir) {
        Ok(path) => format!("Exported {} cards to {}", set.len(), path.display()),
        Err(e) => {
            tracing::warn!(error = %e, "export failed");
            format!("Export failed: {e}")
        }
    }
}

fn build_mode(set: &Arc<FlashcardSet>, kind: ModeKind, seed: Option<u64>) -> Result<Mode> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mode = match kind {
        ModeKind::Viewer => Mode::Viewer(Viewer::new(set.clone(), rng)?),
        ModeKind::Learn => Mode::Learn(LearnSession::new(set.clone(), rng)?),
        ModeKind::Match => Mode::Match(MatchView {
            game: MatchGame::new(set.clone(), rng)?,
            cursor: 0,
        }),
        ModeKind::Test => Mode::Test(TestView {
            exam: Exam::new(set.clone(), &mut rng)?,
            cursor: 0,
        }),
    };
    Ok(mode)
}

fn viewer_key(code: KeyCode) -> Option<ViewerKey> {
    let key = match code {
        KeyCode::Char(' ') => ViewerKey::Space,
        KeyCode::Char(c) => ViewerKey::Char(c),
        KeyCode::Enter => ViewerKey::Enter,
        KeyCode::Left => ViewerKey::Left,
        KeyCode::Right => ViewerKey::Right,
        KeyCode::Up => ViewerKey::Up,
        KeyCode::Down => ViewerKey::Down,
        KeyCode::Esc => ViewerKey::Escape,
        KeyCode::Backspace => ViewerKey::Backspace,
        _ => return None,
    };
    Some(key)
}

fn handle_learn_key(session: &mut LearnSession<StdRng>, key: KeyEvent) -> bool {
    match (session.state(), key.code) {
        (LearnState::Asking, KeyCode::Char(c @ '1'..='9')) => {
            let option = c as usize - '1' as usize;
            session.select(option).is_some()
        }
        (LearnState::Revealed { .. }, KeyCode::Enter | KeyCode::Char(' ')) => session.advance(),
        (LearnState::Finished { .. }, KeyCode::Enter | KeyCode::Char('r')) => {
            session.restart();
            true
        }
        _ => false,
    }
}

fn handle_match_key(view: &mut MatchView, key: KeyEvent) -> bool {
    let len = view.game.tiles().len();
    match key.code {
        KeyCode::Left => view.cursor = view.cursor.saturating_sub(1),
        KeyCode::Right => view.cursor = (view.cursor + 1).min(len.saturating_sub(1)),
        KeyCode::Up => view.cursor = view.cursor.saturating_sub(MATCH_COLUMNS),
        KeyCode::Down => {
            if view.cursor + MATCH_COLUMNS < len {
                view.cursor += MATCH_COLUMNS;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            view.game.click(view.cursor);
        }
        KeyCode::Char('r') => {
            view.game.reset();
            view.cursor = 0;
        }
        _ => return false,
    }
    true
}

fn handle_test_key(view: &mut TestView, key: KeyEvent) -> bool {
    let len = view.exam.len();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Up | KeyCode::BackTab => view.cursor = view.cursor.saturating_sub(1),
        KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
            view.cursor = (view.cursor + 1).min(len.saturating_sub(1));
        }
        KeyCode::Char('s') if ctrl => view.exam.submit(),
        KeyCode::Char('r') if ctrl || view.exam.is_submitted() => {
            view.exam.retake();
            view.cursor = 0;
        }
        _ if view.exam.is_submitted() => return false,
        KeyCode::Backspace => edit_answer(view, |text| {
            text.pop();
        }),
        KeyCode::Char(c) if !ctrl => edit_answer(view, |text| text.push(c)),
        _ => return false,
    }
    true
}

fn edit_answer(view: &mut TestView, edit: impl FnOnce(&mut String)) {
    let Some(card_id) = view.exam.card_at(view.cursor).map(|card| card.id) else {
        return;
    };
    let mut text = view.exam.answer(card_id).to_string();
    edit(&mut text);
    if let Err(e) = view.exam.set_answer(card_id, text) {
        tracing::debug!(error = %e, "answer edit ignored");
    }
}
