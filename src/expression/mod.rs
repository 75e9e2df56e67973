//! Player-built expressions: tokens tied back to problem slots, and a
//! recursive-descent evaluator restricted to single digits, `+ - * /` and parentheses

mod display;
mod errors;
mod eval;
mod token;

pub use errors::ExpressionError;
pub use eval::{evaluate_str, evaluate_tokens};
pub use token::{Expression, Operator, Token};
