//! Game state machine.
//!
//! All score changes go through [`GameState::apply_score_delta`], which keeps
//! `high_score >= score` after every mutation. Every transition validates its
//! preconditions before touching any field, so a rejected action leaves the
//! state exactly as it was.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::board::Board;
use crate::timer::Countdown;

pub const WAGER_STEP: i64 = 10;
pub const DEFAULT_WAGER: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    MainBoard,
    FinalRound,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::MainBoard => f.write_str("main board"),
            Phase::FinalRound => f.write_str("final round"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentQuestion {
    pub category: String,
    pub prompt: String,
    pub answer: String,
    pub value: u32,
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalOutcome {
    pub correct: bool,
    pub wager: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectQuestion { category: String, value: u32 },
    RevealAnswer,
    AwardPoints,
    DeductPoints,
    StartFinal,
    LockWager(i64),
    StartCountdown { now: Instant, duration: Duration },
    RevealFinalAnswer,
    ResolveFinal { correct: bool },
    EndGame,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectQuestion { .. } => "select question",
            Action::RevealAnswer => "reveal answer",
            Action::AwardPoints => "add points",
            Action::DeductPoints => "subtract points",
            Action::StartFinal => "start final jeopardy",
            Action::LockWager(_) => "lock wager",
            Action::StartCountdown { .. } => "start timer",
            Action::RevealFinalAnswer => "reveal final answer",
            Action::ResolveFinal { .. } => "resolve final",
            Action::EndGame => "end game",
        }
    }
}

/// What a successful transition did, for the host to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    QuestionSelected { category: String, value: u32 },
    AnswerRevealed { answer: String },
    ScoreChanged { delta: i64, score: i64 },
    FinalStarted,
    WagerLocked(i64),
    CountdownStarted { secs: u64 },
    FinalAnswerRevealed,
    FinalResolved(FinalOutcome),
    GameEnded { games_played: u32 },
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::QuestionSelected { category, value } => {
                write!(f, "Selected {category} for {value}")
            }
            Effect::AnswerRevealed { answer } => write!(f, "Answer: {answer}"),
            Effect::ScoreChanged { delta, score } => {
                write!(f, "{delta:+} points (score {score})")
            }
            Effect::FinalStarted => f.write_str("Final Jeopardy started"),
            Effect::WagerLocked(wager) => write!(f, "Wager locked in: {wager} points"),
            Effect::CountdownStarted { secs } => write!(f, "{secs}-second timer started"),
            Effect::FinalAnswerRevealed => f.write_str("Final answer revealed"),
            Effect::FinalResolved(outcome) if outcome.correct => {
                write!(f, "You won {} points!", outcome.wager)
            }
            Effect::FinalResolved(outcome) => write!(f, "You lost {} points!", outcome.wager),
            Effect::GameEnded { games_played } => {
                write!(f, "Game over, board reset (games played: {games_played})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot {action}: {reason}")]
    InvalidTransition {
        action: &'static str,
        reason: String,
    },
    #[error("wager {amount} is outside 0..={max}")]
    WagerOutOfRange { amount: i64, max: i64 },
    #[error("no clue for {category} at {value}")]
    UnknownClue { category: String, value: u32 },
}

fn invalid(action: &'static str, reason: impl Into<String>) -> GameError {
    GameError::InvalidTransition {
        action,
        reason: reason.into(),
    }
}

pub fn max_wager(score: i64) -> i64 {
    score.max(0)
}

/// Initial value of the wager field: 100, or less when the score can't cover it.
pub fn default_wager(score: i64) -> i64 {
    DEFAULT_WAGER.min(max_wager(score))
}

/// Moves a wager draft by `steps` increments of [`WAGER_STEP`], clamped to the legal range.
pub fn step_wager(draft: i64, steps: i64, score: i64) -> i64 {
    clamp_wager(draft.saturating_add(steps.saturating_mul(WAGER_STEP)), score)
}

pub fn clamp_wager(amount: i64, score: i64) -> i64 {
    amount.clamp(0, max_wager(score))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    score: i64,
    high_score: i64,
    games_played: u32,
    phase: Phase,
    current_question: Option<CurrentQuestion>,
    final_wager: i64,
    final_revealed: bool,
    final_outcome: Option<FinalOutcome>,
    countdown: Option<Countdown>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh main-board state whose score starts at `score`.
    pub fn with_score(score: i64) -> Self {
        let mut state = Self::new();
        state.apply_score_delta(score);
        state
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn in_final(&self) -> bool {
        self.phase == Phase::FinalRound
    }

    pub fn current_question(&self) -> Option<&CurrentQuestion> {
        self.current_question.as_ref()
    }

    pub fn final_wager(&self) -> i64 {
        self.final_wager
    }

    pub fn final_revealed(&self) -> bool {
        self.final_revealed
    }

    pub fn final_outcome(&self) -> Option<FinalOutcome> {
        self.final_outcome
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn max_wager(&self) -> i64 {
        max_wager(self.score)
    }

    pub fn select_question(
        &mut self,
        board: &Board,
        category: &str,
        value: u32,
    ) -> Result<Effect, GameError> {
        self.require_phase(Phase::MainBoard, "select question")?;
        let clue = board
            .clue(category, value)
            .ok_or_else(|| GameError::UnknownClue {
                category: category.to_string(),
                value,
            })?;
        self.current_question = Some(CurrentQuestion {
            category: category.to_string(),
            prompt: clue.prompt.clone(),
            answer: clue.answer.clone(),
            value,
            revealed: false,
        });
        Ok(Effect::QuestionSelected {
            category: category.to_string(),
            value,
        })
    }

    pub fn reveal_answer(&mut self) -> Result<Effect, GameError> {
        let Some(question) = self.current_question.as_mut() else {
            return Err(invalid("reveal answer", "no question selected"));
        };
        question.revealed = true;
        Ok(Effect::AnswerRevealed {
            answer: question.answer.clone(),
        })
    }

    pub fn award_points(&mut self) -> Result<Effect, GameError> {
        self.resolve_question("add points", 1)
    }

    pub fn deduct_points(&mut self) -> Result<Effect, GameError> {
        self.resolve_question("subtract points", -1)
    }

    fn resolve_question(&mut self, action: &'static str, sign: i64) -> Result<Effect, GameError> {
        let value = match &self.current_question {
            Some(q) if q.revealed => i64::from(q.value),
            Some(_) => return Err(invalid(action, "answer not revealed yet")),
            None => return Err(invalid(action, "no question selected")),
        };
        let delta = sign * value;
        self.apply_score_delta(delta);
        self.current_question = None;
        Ok(Effect::ScoreChanged {
            delta,
            score: self.score,
        })
    }

    pub fn start_final(&mut self) -> Result<Effect, GameError> {
        self.require_phase(Phase::MainBoard, "start final jeopardy")?;
        // final_wager is only reset by end_game.
        self.phase = Phase::FinalRound;
        self.current_question = None;
        self.final_revealed = false;
        self.final_outcome = None;
        self.countdown = None;
        Ok(Effect::FinalStarted)
    }

    pub fn lock_wager(&mut self, amount: i64) -> Result<Effect, GameError> {
        self.require_phase(Phase::FinalRound, "lock wager")?;
        let max = self.max_wager();
        if !(0..=max).contains(&amount) {
            return Err(GameError::WagerOutOfRange { amount, max });
        }
        self.final_wager = amount;
        Ok(Effect::WagerLocked(amount))
    }

    pub fn start_countdown(&mut self, now: Instant, duration: Duration) -> Result<Effect, GameError> {
        self.require_wagered("start timer")?;
        self.countdown = Some(Countdown::start(now, duration));
        Ok(Effect::CountdownStarted {
            secs: duration.as_secs(),
        })
    }

    pub fn reveal_final_answer(&mut self) -> Result<Effect, GameError> {
        self.require_wagered("reveal final answer")?;
        self.final_revealed = true;
        Ok(Effect::FinalAnswerRevealed)
    }

    pub fn resolve_final(&mut self, correct: bool) -> Result<Effect, GameError> {
        self.require_wagered("resolve final")?;
        if self.final_outcome.is_some() {
            return Err(invalid("resolve final", "final answer already scored"));
        }
        let wager = self.final_wager;
        self.apply_score_delta(if correct { wager } else { -wager });
        let outcome = FinalOutcome { correct, wager };
        self.final_outcome = Some(outcome);
        Ok(Effect::FinalResolved(outcome))
    }

    pub fn end_game(&mut self) -> Result<Effect, GameError> {
        self.require_phase(Phase::FinalRound, "end game")?;
        self.games_played += 1;
        self.phase = Phase::MainBoard;
        self.final_wager = 0;
        self.current_question = None;
        self.final_revealed = false;
        self.final_outcome = None;
        self.countdown = None;
        Ok(Effect::GameEnded {
            games_played: self.games_played,
        })
    }

    fn apply_score_delta(&mut self, delta: i64) {
        self.score = self.score.saturating_add(delta);
        self.high_score = self.high_score.max(self.score);
    }

    fn require_phase(&self, phase: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(invalid(action, format!("only allowed on the {phase}")))
        }
    }

    fn require_wagered(&self, action: &'static str) -> Result<(), GameError> {
        self.require_phase(Phase::FinalRound, action)?;
        if self.final_wager > 0 {
            Ok(())
        } else {
            Err(invalid(action, "no wager locked in"))
        }
    }
}

/// Applies one action. On error the state is left untouched.
pub fn apply_action(state: &mut GameState, board: &Board, action: Action) -> Result<Effect, GameError> {
    match action {
        Action::SelectQuestion { category, value } => {
            state.select_question(board, &category, value)
        }
        Action::RevealAnswer => state.reveal_answer(),
        Action::AwardPoints => state.award_points(),
        Action::DeductPoints => state.deduct_points(),
        Action::StartFinal => state.start_final(),
        Action::LockWager(amount) => state.lock_wager(amount),
        Action::StartCountdown { now, duration } => state.start_countdown(now, duration),
        Action::RevealFinalAnswer => state.reveal_final_answer(),
        Action::ResolveFinal { correct } => state.resolve_final(correct),
        Action::EndGame => state.end_game(),
    }
}
