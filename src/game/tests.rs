use std::io::Cursor;
use std::time::Duration;

use crate::expression::Operator;
use crate::game::{DigitStatus, Game, InputError, InputEvent, TerminalPresenter, View, parse_line};
use crate::locale::Locale;
use crate::problem::{Problem, generate};
use crate::session::constants::{INDEX_KEY, LOCALE_KEY};
use crate::session::{Feedback, Phase, Session};
use crate::storage::{KeyValueStore, MemoryStore};

type TestGame = Game<MemoryStore, TerminalPresenter<Vec<u8>>>;

fn new_game(store: MemoryStore) -> TestGame {
    let session = Session::load(generate(), store, Locale::En);
    Game::new(session, TerminalPresenter::new(Vec::new()), Duration::ZERO)
}

fn play(store: MemoryStore, input: &str) -> (Session<MemoryStore>, String) {
    let mut game = new_game(store);
    let result = game.run(Cursor::new(input.to_string()));
    assert!(result.is_ok(), "game loop failed: {:?}", result.err());
    let (session, presenter) = game.into_parts();
    let output = String::from_utf8_lossy(&presenter.into_inner()).into_owned();
    (session, output)
}

fn first_problem() -> Option<Problem> {
    Problem::new([1, 2, 3, 4])
}

#[test]
fn test_parse_line_digits_and_operators() {
    let problem = first_problem();
    let events = parse_line("(4 + 1) × 2", problem.as_ref());
    assert_eq!(
        events,
        Ok(vec![
            InputEvent::Operator(Operator::LeftParen),
            InputEvent::Digit { slot: 3 },
            InputEvent::Operator(Operator::Add),
            InputEvent::Digit { slot: 0 },
            InputEvent::Operator(Operator::RightParen),
            InputEvent::Operator(Operator::Mul),
            InputEvent::Digit { slot: 1 },
        ])
    );
}

#[test]
fn test_parse_line_commands() {
    let problem = first_problem();
    assert_eq!(
        parse_line("back CLEAR reset ? lang ja q", problem.as_ref()),
        Ok(vec![
            InputEvent::Backspace,
            InputEvent::Clear,
            InputEvent::Restart,
            InputEvent::Hint,
            InputEvent::Locale("ja".to_string()),
            InputEvent::Quit,
        ])
    );
    assert_eq!(parse_line("   ", problem.as_ref()), Ok(vec![]));
}

#[test]
fn test_parse_line_errors() {
    let problem = first_problem();
    assert_eq!(
        parse_line("1+9", problem.as_ref()),
        Err(InputError::DigitUnavailable('9'))
    );
    assert_eq!(
        parse_line("1^2", problem.as_ref()),
        Err(InputError::Unrecognized("1^2".to_string()))
    );
    assert_eq!(parse_line("lang", problem.as_ref()), Err(InputError::MissingLocale));
    assert_eq!(parse_line("1", None), Err(InputError::DigitUnavailable('1')));
}

#[test]
fn test_view_marks_used_digits() {
    let mut session = Session::load(generate(), MemoryStore::new(), Locale::En);
    assert_eq!(session.append_digit(1), Ok(()));
    session.append_operator(Operator::Add);
    let view = View::from_session(&session);
    assert_eq!(view.problem_number, 1);
    assert_eq!(view.total, 126);
    assert_eq!(view.expression_text, "2 +");
    assert_eq!(view.display_value, None);
    assert_eq!(
        view.digits,
        vec![
            DigitStatus { value: 1, used: false },
            DigitStatus { value: 2, used: true },
            DigitStatus { value: 3, used: false },
            DigitStatus { value: 4, used: false },
        ]
    );
}

#[test]
fn test_solving_advances_and_persists() {
    let (session, output) = play(MemoryStore::new(), "1+2+3+4\n");
    assert_eq!(session.index(), 1);
    assert_eq!(
        session.store().get(INDEX_KEY).ok().flatten().as_deref(),
        Some("1")
    );
    assert!(output.contains("OK! Correct!"));
    assert!(output.contains("Problem 2/126"));
}

#[test]
fn test_events_after_solve_are_dropped() {
    let (session, _) = play(MemoryStore::new(), "1+2+3+4 + 1\n");
    assert_eq!(session.index(), 1);
    assert!(session.expression().is_empty());
}

#[test]
fn test_wrong_answer_stays_silent() {
    let (session, output) = play(MemoryStore::new(), "1*2*3*4\n");
    assert_eq!(session.index(), 0);
    assert_eq!(session.feedback(), None);
    assert!(output.contains("= 24"));
    assert!(!output.contains("OK! Correct!"));
}

#[test]
fn test_backspace_then_retry() {
    let (session, output) = play(MemoryStore::new(), "1+2+3*4\nback back\n+4\n");
    assert!(output.contains("= 15"));
    assert_eq!(session.index(), 1);
}

#[test]
fn test_unknown_digit_sets_feedback() {
    let (session, output) = play(MemoryStore::new(), "1+2\n9\n");
    assert_eq!(session.expression().to_infix(), "1+2");
    assert_eq!(session.feedback(), Some(&Feedback::DigitUnavailable));
    assert!(output.contains("That digit is not part of this problem"));
}

#[test]
fn test_reused_digit_sets_feedback() {
    let (session, _) = play(MemoryStore::new(), "1+1\n");
    assert_eq!(session.expression().to_infix(), "1+");
    assert_eq!(session.feedback(), Some(&Feedback::DigitUnavailable));
}

#[test]
fn test_restart_requires_confirmation() {
    let store = MemoryStore::new().with_entry(INDEX_KEY, "5");
    let (session, output) = play(store.clone(), "restart\nn\n");
    assert_eq!(session.index(), 5);
    assert!(output.contains("Reset your progress"));

    let (session, _) = play(store, "restart\ny\n");
    assert_eq!(session.index(), 0);
}

#[test]
fn test_restart_from_completion_is_immediate() {
    let store = MemoryStore::new().with_entry(INDEX_KEY, "126");
    let (session, output) = play(store, "restart\n");
    assert_eq!(session.index(), 0);
    assert_eq!(session.phase(), Phase::InProgress);
    assert!(output.contains("All problems solved!"));
}

#[test]
fn test_last_problem_reaches_completion() {
    let store = MemoryStore::new().with_entry(INDEX_KEY, "125");
    let (session, output) = play(store, "(9-7)*8-6\n");
    assert_eq!(session.index(), 126);
    assert_eq!(session.phase(), Phase::Completed);
    assert!(output.contains("All problems solved!"));
    assert!(output.contains("Problem 126/126"));
}

#[test]
fn test_locale_switch_and_fallback() {
    let (session, output) = play(MemoryStore::new(), "lang ja\n");
    assert_eq!(session.locale(), Locale::Ja);
    assert_eq!(
        session.store().get(LOCALE_KEY).ok().flatten().as_deref(),
        Some("ja")
    );
    assert!(output.contains("10を作ろう"));

    let (session, _) = play(MemoryStore::new(), "lang fr\n");
    assert_eq!(session.locale(), Locale::En);
}

#[test]
fn test_hint_shows_solution() {
    let (session, output) = play(MemoryStore::new(), "hint\n");
    assert!(matches!(session.feedback(), Some(Feedback::Hint(Some(_)))));
    assert!(output.contains("Hint: "));
}

#[test]
fn test_quit_stops_processing() {
    let (session, _) = play(MemoryStore::new(), "1+\nquit\n2+3+4\n");
    assert_eq!(session.expression().to_infix(), "1+");
    assert_eq!(session.index(), 0);
}
