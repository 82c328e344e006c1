use std::time::{Duration, Instant};

use cyber_jeopardy::board::Board;
use cyber_jeopardy::game::{
    Action, Effect, FinalOutcome, GameError, GameState, Phase, apply_action,
};

fn play(state: &mut GameState, board: &Board, action: Action) -> Effect {
    apply_action(state, board, action).expect("action should be accepted")
}

fn select(category: &str, value: u32) -> Action {
    Action::SelectQuestion {
        category: category.to_string(),
        value,
    }
}

#[test]
fn award_then_deduct_scenario() {
    let board = Board::builtin();
    let mut state = GameState::new();

    play(&mut state, &board, select("Networking", 200));
    play(&mut state, &board, Action::RevealAnswer);
    play(&mut state, &board, Action::AwardPoints);
    assert_eq!(state.score(), 200);
    assert_eq!(state.high_score(), 200);
    assert!(state.current_question().is_none());

    play(&mut state, &board, select("Cyber Attacks", 400));
    play(&mut state, &board, Action::RevealAnswer);
    play(&mut state, &board, Action::DeductPoints);
    assert_eq!(state.score(), -200);
    assert_eq!(state.high_score(), 200);
    assert!(state.current_question().is_none());
}

#[test]
fn select_copies_clue_from_board_and_overwrites() {
    let board = Board::builtin();
    let mut state = GameState::new();

    play(&mut state, &board, select("OSINT", 100));
    play(&mut state, &board, select("Security Tools", 300));
    let q = state.current_question().expect("question selected");
    assert_eq!(q.category, "Security Tools");
    assert_eq!(q.value, 300);
    assert_eq!(q.prompt, "What tool tests password strength?");
    assert_eq!(q.answer, "John the Ripper");
    assert!(!q.revealed);
    assert_eq!(state.score(), 0);
}

#[test]
fn unknown_clue_is_rejected() {
    let board = Board::builtin();
    let mut state = GameState::new();
    let err = apply_action(&mut state, &board, select("Cryptography", 100)).unwrap_err();
    assert_eq!(
        err,
        GameError::UnknownClue {
            category: "Cryptography".to_string(),
            value: 100
        }
    );
    let err = apply_action(&mut state, &board, select("Networking", 500)).unwrap_err();
    assert!(matches!(err, GameError::UnknownClue { value: 500, .. }));
    assert_eq!(state, GameState::new());
}

#[test]
fn scoring_requires_revealed_question() {
    let board = Board::builtin();
    let mut state = GameState::new();

    let err = apply_action(&mut state, &board, Action::AwardPoints).unwrap_err();
    assert!(matches!(err, GameError::InvalidTransition { .. }));

    play(&mut state, &board, select("Networking", 100));
    let before = state.clone();
    let err = apply_action(&mut state, &board, Action::DeductPoints).unwrap_err();
    assert!(matches!(err, GameError::InvalidTransition { .. }));
    assert_eq!(state, before);

    let err = apply_action(&mut GameState::new(), &board, Action::RevealAnswer).unwrap_err();
    assert!(matches!(err, GameError::InvalidTransition { .. }));
}

#[test]
fn final_round_win_scenario() {
    let board = Board::builtin();
    let mut state = GameState::with_score(500);

    play(&mut state, &board, Action::StartFinal);
    assert!(state.in_final());
    assert_eq!(
        play(&mut state, &board, Action::LockWager(300)),
        Effect::WagerLocked(300)
    );
    assert_eq!(state.final_wager(), 300);

    let effect = play(&mut state, &board, Action::ResolveFinal { correct: true });
    assert_eq!(effect.to_string(), "You won 300 points!");
    assert_eq!(state.score(), 800);
    assert_eq!(state.high_score(), 800);
    assert_eq!(state.final_wager(), 300);
    assert!(state.in_final());

    play(&mut state, &board, Action::EndGame);
    assert!(!state.in_final());
    assert_eq!(state.final_wager(), 0);
    assert_eq!(state.games_played(), 1);
    assert_eq!(state.score(), 800);
}

#[test]
fn final_round_loss_keeps_high_score() {
    let board = Board::builtin();
    let mut state = GameState::with_score(400);
    play(&mut state, &board, Action::StartFinal);
    play(&mut state, &board, Action::LockWager(400));
    let effect = play(&mut state, &board, Action::ResolveFinal { correct: false });
    assert_eq!(
        effect,
        Effect::FinalResolved(FinalOutcome {
            correct: false,
            wager: 400
        })
    );
    assert_eq!(effect.to_string(), "You lost 400 points!");
    assert_eq!(state.score(), 0);
    assert_eq!(state.high_score(), 400);
}

#[test]
fn wager_above_score_is_rejected_not_clamped() {
    let board = Board::builtin();
    let mut state = GameState::with_score(100);
    play(&mut state, &board, Action::StartFinal);

    let err = apply_action(&mut state, &board, Action::LockWager(150)).unwrap_err();
    assert_eq!(
        err,
        GameError::WagerOutOfRange {
            amount: 150,
            max: 100
        }
    );
    assert_eq!(state.final_wager(), 0);

    let err = apply_action(&mut state, &board, Action::LockWager(-10)).unwrap_err();
    assert!(matches!(err, GameError::WagerOutOfRange { amount: -10, .. }));

    play(&mut state, &board, Action::LockWager(100));
    assert_eq!(state.final_wager(), 100);
}

#[test]
fn negative_score_can_only_wager_zero() {
    let board = Board::builtin();
    let mut state = GameState::with_score(-50);
    play(&mut state, &board, Action::StartFinal);
    assert_eq!(state.max_wager(), 0);
    assert!(apply_action(&mut state, &board, Action::LockWager(10)).is_err());
    play(&mut state, &board, Action::LockWager(0));

    let err = apply_action(&mut state, &board, Action::ResolveFinal { correct: true }).unwrap_err();
    assert!(matches!(err, GameError::InvalidTransition { .. }));

    play(&mut state, &board, Action::EndGame);
    assert_eq!(state.games_played(), 1);
    assert_eq!(state.score(), -50);
}

#[test]
fn phase_guards_reject_out_of_round_actions() {
    let board = Board::builtin();
    let mut state = GameState::with_score(300);

    for action in [
        Action::LockWager(100),
        Action::EndGame,
        Action::RevealFinalAnswer,
        Action::ResolveFinal { correct: true },
    ] {
        let err = apply_action(&mut state, &board, action).unwrap_err();
        assert!(matches!(err, GameError::InvalidTransition { .. }));
    }
    assert_eq!(state.phase(), Phase::MainBoard);
    assert_eq!(state.games_played(), 0);

    play(&mut state, &board, Action::StartFinal);
    for action in [Action::StartFinal, select("Networking", 100)] {
        let err = apply_action(&mut state, &board, action).unwrap_err();
        assert!(matches!(err, GameError::InvalidTransition { .. }));
    }
    assert_eq!(state.phase(), Phase::FinalRound);
}

#[test]
fn start_final_clears_pending_question() {
    let board = Board::builtin();
    let mut state = GameState::new();
    play(&mut state, &board, select("OSINT", 400));
    play(&mut state, &board, Action::StartFinal);
    assert!(state.current_question().is_none());
    assert_eq!(state.phase(), Phase::FinalRound);
}

#[test]
fn final_answer_is_scored_once_per_round() {
    let board = Board::builtin();
    let mut state = GameState::with_score(200);
    play(&mut state, &board, Action::StartFinal);
    play(&mut state, &board, Action::LockWager(200));
    play(&mut state, &board, Action::RevealFinalAnswer);
    assert!(state.final_revealed());
    play(&mut state, &board, Action::ResolveFinal { correct: true });

    let before = state.clone();
    let err = apply_action(&mut state, &board, Action::ResolveFinal { correct: true }).unwrap_err();
    assert!(matches!(err, GameError::InvalidTransition { .. }));
    assert_eq!(state, before);
    assert_eq!(state.score(), 400);
}

#[test]
fn end_game_resets_round_fields_only() {
    let board = Board::builtin();
    let mut state = GameState::with_score(600);
    let t0 = Instant::now();

    play(&mut state, &board, Action::StartFinal);
    play(&mut state, &board, Action::LockWager(250));
    play(
        &mut state,
        &board,
        Action::StartCountdown {
            now: t0,
            duration: Duration::from_secs(30),
        },
    );
    play(&mut state, &board, Action::RevealFinalAnswer);
    play(&mut state, &board, Action::ResolveFinal { correct: false });

    let games_before = state.games_played();
    play(&mut state, &board, Action::EndGame);
    assert!(!state.in_final());
    assert_eq!(state.final_wager(), 0);
    assert!(state.current_question().is_none());
    assert_eq!(state.games_played(), games_before + 1);
    assert!(state.countdown().is_none());
    assert!(!state.final_revealed());
    assert!(state.final_outcome().is_none());
    assert_eq!(state.score(), 350);
    assert_eq!(state.high_score(), 600);

    // A second game in the same session starts from the carried score.
    play(&mut state, &board, Action::StartFinal);
    play(&mut state, &board, Action::LockWager(350));
    play(&mut state, &board, Action::ResolveFinal { correct: true });
    play(&mut state, &board, Action::EndGame);
    assert_eq!(state.games_played(), 2);
    assert_eq!(state.score(), 700);
    assert_eq!(state.high_score(), 700);
}

#[test]
fn countdown_needs_locked_wager_and_restarts() {
    let board = Board::builtin();
    let mut state = GameState::with_score(100);
    let t0 = Instant::now();
    let start = |now| Action::StartCountdown {
        now,
        duration: Duration::from_secs(30),
    };

    play(&mut state, &board, Action::StartFinal);
    assert!(apply_action(&mut state, &board, start(t0)).is_err());

    play(&mut state, &board, Action::LockWager(50));
    assert_eq!(
        play(&mut state, &board, start(t0)),
        Effect::CountdownStarted { secs: 30 }
    );
    let countdown = *state.countdown().expect("countdown running");
    assert_eq!(countdown.seconds_left(t0 + Duration::from_secs(10)), 20);

    let later = t0 + Duration::from_secs(40);
    assert!(countdown.is_expired(later));
    play(&mut state, &board, start(later));
    let restarted = state.countdown().expect("countdown running");
    assert_eq!(restarted.seconds_left(later), 30);
}

#[test]
fn high_score_is_running_max_over_mixed_play() {
    let board = Board::builtin();
    let mut state = GameState::new();
    let mut running_max = 0;
    let plays = [
        ("Networking", 400, true),
        ("OSINT", 300, false),
        ("Security Tools", 100, true),
        ("Cyber Attacks", 400, false),
        ("Cyber Attacks", 400, false),
        ("OSINT", 200, true),
        ("Networking", 300, true),
        ("Networking", 400, true),
    ];
    for (category, value, correct) in plays {
        let high_before = state.high_score();
        let score_before = state.score();
        play(&mut state, &board, select(category, value));
        play(&mut state, &board, Action::RevealAnswer);
        let action = if correct {
            Action::AwardPoints
        } else {
            Action::DeductPoints
        };
        play(&mut state, &board, action);

        let delta = if correct { value as i64 } else { -(value as i64) };
        assert_eq!(state.score(), score_before + delta);
        running_max = running_max.max(state.score());
        assert_eq!(state.high_score(), running_max);
        assert!(state.high_score() >= high_before);
    }
    assert_eq!(state.score(), 300);
    assert_eq!(state.high_score(), 400);
}

#[test]
fn repeated_all_in_wins_saturate_score() {
    let board = Board::builtin();
    let mut state = GameState::with_score(400);

    for _ in 0..70 {
        play(&mut state, &board, Action::StartFinal);
        let all_in = state.max_wager();
        play(&mut state, &board, Action::LockWager(all_in));
        play(&mut state, &board, Action::ResolveFinal { correct: true });
        play(&mut state, &board, Action::EndGame);
    }

    assert_eq!(state.score(), i64::MAX);
    assert_eq!(state.high_score(), i64::MAX);
    assert_eq!(state.games_played(), 70);
}
