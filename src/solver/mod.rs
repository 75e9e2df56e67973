//! Exhaustive search for a solution of a problem, used for hints and for
//! checking the whole problem set

mod core;

pub use self::core::{find_solution, solve_all};
