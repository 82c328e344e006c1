use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};

use crate::board::Board;
use crate::config::Config;
use crate::game::{Action, Effect, Phase, clamp_wager, default_wager, step_wager};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Answer,
}

/// Board cell under the cursor: category column and point-value row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub column: usize,
    pub row: usize,
}

/// Terminal host: owns the board and the single player session and turns each
/// key press into at most one game action.
pub struct App {
    pub board: Board,
    pub session: Session,
    pub cursor: Cursor,
    pub wager_draft: i64,
    pub answer_draft: String,
    pub input_mode: InputMode,
    pub countdown: Duration,
    pub help_overlay: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: Board, config: &Config) -> Self {
        let mut session = Session::new();
        session.push_log("[INFO] Choose a question, reveal the answer, and keep score!");
        Self {
            board,
            session,
            cursor: Cursor::default(),
            wager_draft: 0,
            answer_draft: String::new(),
            input_mode: InputMode::Normal,
            countdown: config.countdown(),
            help_overlay: false,
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if self.input_mode == InputMode::Answer {
            self.on_answer_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_overlay = !self.help_overlay,
            KeyCode::Esc => self.help_overlay = false,
            _ => match self.session.game.phase() {
                Phase::MainBoard => self.on_board_key(key),
                Phase::FinalRound => self.on_final_key(key, now),
            },
        }
    }

    fn on_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.move_column(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_column(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_row(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_row(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some((category, value)) = self.selected_cell() {
                    self.dispatch(Action::SelectQuestion { category, value });
                }
            }
            KeyCode::Char('r') => self.dispatch(Action::RevealAnswer),
            KeyCode::Char('a') => self.dispatch(Action::AwardPoints),
            KeyCode::Char('s') => self.dispatch(Action::DeductPoints),
            KeyCode::Char('f') => {
                if self.try_dispatch(Action::StartFinal).is_some() {
                    self.wager_draft = default_wager(self.session.game.score());
                    self.answer_draft.clear();
                }
            }
            _ => {}
        }
    }

    fn on_final_key(&mut self, key: KeyEvent, now: Instant) {
        let score = self.session.game.score();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                self.wager_draft = step_wager(self.wager_draft, -1, score);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.wager_draft = step_wager(self.wager_draft, 1, score);
            }
            KeyCode::Enter => {
                self.wager_draft = clamp_wager(self.wager_draft, score);
                self.dispatch(Action::LockWager(self.wager_draft));
            }
            KeyCode::Char('t') => self.dispatch(Action::StartCountdown {
                now,
                duration: self.countdown,
            }),
            KeyCode::Char('i') => {
                if self.session.game.final_wager() > 0 {
                    self.input_mode = InputMode::Answer;
                }
            }
            KeyCode::Char('r') => self.dispatch(Action::RevealFinalAnswer),
            KeyCode::Char('y') => self.resolve_final(true),
            KeyCode::Char('n') => self.resolve_final(false),
            KeyCode::Char('e') => {
                if self.try_dispatch(Action::EndGame).is_some() {
                    self.wager_draft = 0;
                    self.answer_draft.clear();
                }
            }
            _ => {}
        }
    }

    /// The score moves on resolution, so the draft is pulled back into the new range.
    fn resolve_final(&mut self, correct: bool) {
        if self.try_dispatch(Action::ResolveFinal { correct }).is_some() {
            self.wager_draft = clamp_wager(self.wager_draft, self.session.game.score());
        }
    }

    fn on_answer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.answer_draft.pop();
            }
            KeyCode::Char(c) => self.answer_draft.push(c),
            _ => {}
        }
    }

    /// Rejections are already reported to the console by the session.
    fn dispatch(&mut self, action: Action) {
        let _ = self.session.dispatch(&self.board, action);
    }

    fn try_dispatch(&mut self, action: Action) -> Option<Effect> {
        self.session.dispatch(&self.board, action).ok()
    }

    pub fn selected_cell(&self) -> Option<(String, u32)> {
        let category = self.board.categories().get(self.cursor.column)?;
        let value = *category.clues.keys().nth(self.cursor.row)?;
        Some((category.name.clone(), value))
    }

    fn move_column(&mut self, step: isize) {
        let total = self.board.categories().len();
        if total == 0 {
            return;
        }
        self.cursor.column = wrap(self.cursor.column, step, total);
        self.clamp_row();
    }

    fn move_row(&mut self, step: isize) {
        let total = self.column_len();
        if total == 0 {
            self.cursor.row = 0;
            return;
        }
        self.cursor.row = wrap(self.cursor.row, step, total);
    }

    fn clamp_row(&mut self) {
        let total = self.column_len();
        if total == 0 {
            self.cursor.row = 0;
        } else if self.cursor.row >= total {
            self.cursor.row = total - 1;
        }
    }

    fn column_len(&self) -> usize {
        self.board
            .categories()
            .get(self.cursor.column)
            .map(|c| c.clues.len())
            .unwrap_or(0)
    }
}

fn wrap(index: usize, step: isize, total: usize) -> usize {
    let total = total as isize;
    (index as isize + step).rem_euclid(total) as usize
}
