//! Property tests for the session phase machine.
//!
//! Random interleavings of player commands and ticks must keep the session consistent:
//! the active piece always fits, counters only grow, the level follows the line count,
//! and transient phases are never observable.

use proptest::prelude::*;

use blocktris::core::{calculate_level, GameSession, PhaseKind, SessionPhase};
use blocktris::types::{GameAction, LINES_PER_LEVEL};

#[derive(Debug, Clone, Copy)]
enum Input {
    Action(GameAction),
    Tick(u32),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        3 => (0u32..1200).prop_map(Input::Tick),
        1 => Just(Input::Action(GameAction::MoveLeft)),
        1 => Just(Input::Action(GameAction::MoveRight)),
        1 => Just(Input::Action(GameAction::SoftDrop)),
        1 => Just(Input::Action(GameAction::HardDrop)),
        1 => Just(Input::Action(GameAction::RotateCw)),
        1 => Just(Input::Action(GameAction::RotateCcw)),
        1 => Just(Input::Action(GameAction::Hold)),
        1 => Just(Input::Action(GameAction::ToggleGhost)),
    ]
}

fn apply(session: &mut GameSession, input: Input) {
    match input {
        Input::Action(action) => {
            session.apply_action(action);
        }
        Input::Tick(ms) => {
            session.tick(ms);
        }
    }
}

fn assert_consistent(session: &GameSession) -> Result<(), TestCaseError> {
    prop_assert!(!matches!(
        session.phase(),
        SessionPhase::Spawning | SessionPhase::Locking
    ));
    prop_assert_eq!(session.level(), calculate_level(session.lines(), LINES_PER_LEVEL));

    match session.active() {
        Some(piece) => {
            prop_assert!(piece.fits(session.board()));
            if let Some(ghost) = session.ghost() {
                prop_assert!(ghost.fits(session.board()));
                prop_assert!(ghost.is_grounded(session.board()));
                prop_assert!(ghost.y >= piece.y);
                prop_assert_eq!(ghost.x, piece.x);
            }
        }
        // The locked piece is already part of the board while rows flash.
        None => prop_assert!(
            session.game_over() || matches!(session.phase(), SessionPhase::LineClear { .. }),
            "no active piece outside game over or line clear"
        ),
    }

    if let SessionPhase::LineClear { rows, .. } = session.phase() {
        prop_assert!(!rows.is_empty());
        for &y in rows {
            prop_assert!(session.board().is_row_full(y));
        }
    } else {
        prop_assert!(session.board().full_rows().is_empty());
    }
    Ok(())
}

proptest! {
    #[test]
    fn random_play_keeps_session_consistent(
        seed in any::<u32>(),
        inputs in prop::collection::vec(input(), 1..300),
    ) {
        let mut session = GameSession::new(seed);
        assert_consistent(&session)?;

        for input in inputs {
            let (score, lines) = (session.score(), session.lines());
            apply(&mut session, input);

            prop_assert!(session.score() >= score);
            prop_assert!(session.lines() >= lines);
            assert_consistent(&session)?;
        }
    }

    #[test]
    fn replaying_inputs_is_deterministic(
        seed in any::<u32>(),
        inputs in prop::collection::vec(input(), 1..150),
    ) {
        let mut a = GameSession::new(seed);
        let mut b = GameSession::new(seed);
        for input in inputs {
            apply(&mut a, input);
            apply(&mut b, input);
            prop_assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn rejected_commands_change_nothing(
        seed in any::<u32>(),
        warmup in prop::collection::vec(input(), 0..60),
        action in prop_oneof![
            Just(GameAction::MoveLeft),
            Just(GameAction::MoveRight),
            Just(GameAction::RotateCw),
            Just(GameAction::RotateCcw),
            Just(GameAction::SoftDrop),
            Just(GameAction::Hold),
        ],
    ) {
        let mut session = GameSession::new(seed);
        for input in warmup {
            apply(&mut session, input);
        }
        let before = session.snapshot();
        if !session.apply_action(action) {
            prop_assert_eq!(session.snapshot(), before);
        }
    }

    #[test]
    fn snapshot_never_shows_ghost_outside_falling(
        seed in any::<u32>(),
        inputs in prop::collection::vec(input(), 1..200),
    ) {
        let mut session = GameSession::new(seed);
        for input in inputs {
            apply(&mut session, input);
            let snap = session.snapshot();
            if snap.phase != PhaseKind::Falling || !snap.ghost_enabled {
                prop_assert!(snap.ghost.is_none());
            }
            prop_assert_eq!(snap.line_clear.is_some(), snap.phase == PhaseKind::LineClear);
        }
    }
}
