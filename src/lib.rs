//! Make 10 - a puzzle where four distinct digits must be combined with
//! `+ - * /` and parentheses into an expression equal to ten
//!
//! The crate provides the fixed problem set, a session that tracks the
//! player's expression and progress, and a small terminal driver.

pub mod expression;
pub mod game;
pub mod locale;
pub mod problem;
pub mod session;
pub mod solver;
pub mod storage;

// Re-export the main public API
pub use expression::{Expression, ExpressionError, Operator, Token};
pub use problem::{PROBLEM_COUNT, Problem, generate};
pub use session::{Phase, Session, SessionError, SolveStatus};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Checks whether `text` uses exactly the digits of `problem`, each once,
/// and evaluates to ten
///
/// # Examples
///
/// ```
/// use make10::{Problem, is_solution};
///
/// let problem = Problem::new([6, 7, 8, 9]).unwrap();
/// assert!(is_solution(&problem, "(9-7)*8-6"));
/// assert!(!is_solution(&problem, "(9-7)*(8-6)"));
/// assert!(!is_solution(&problem, "9+1"));
/// ```
pub fn is_solution(problem: &Problem, text: &str) -> bool {
    let mut digits: Vec<u8> = text
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| u8::try_from(d).ok())
        .collect();
    digits.sort_unstable();
    if digits.as_slice() != problem.digits().as_slice() {
        return false;
    }

    expression::evaluate_str(text)
        .map(|value| (value - session::constants::TARGET).abs() < session::constants::EPSILON)
        .unwrap_or(false)
}
