use std::collections::VecDeque;

use crate::board::Board;
use crate::game::{Action, Effect, GameError, GameState, apply_action};

pub const MAX_LOGS: usize = 200;

/// One player's state for the lifetime of the process, plus the console log
/// shown under the board.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub game: GameState,
    pub logs: VecDeque<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            game: GameState::new(),
            logs: VecDeque::with_capacity(MAX_LOGS),
        }
    }

    pub fn dispatch(&mut self, board: &Board, action: Action) -> Result<Effect, GameError> {
        let name = action.name();
        match apply_action(&mut self.game, board, action) {
            Ok(effect) => {
                tracing::info!(
                    action = name,
                    score = self.game.score(),
                    high_score = self.game.high_score(),
                    phase = %self.game.phase(),
                    "{effect}"
                );
                self.push_log(format!("[INFO] {effect}"));
                Ok(effect)
            }
            Err(err) => {
                tracing::warn!(action = name, phase = %self.game.phase(), "rejected: {err}");
                self.push_log(format!("[WARN] {err}"));
                Err(err)
            }
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
