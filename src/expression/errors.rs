use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Expression is empty")]
    Empty,
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unexpected token \"{token}\" at {index}")]
    UnexpectedToken { token: String, index: usize },
    #[error("Invalid character '{ch}' at {index}")]
    InvalidCharacter { ch: char, index: usize },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result is not a finite number")]
    NonFinite,
}
