use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Digit {0} is not part of the current problem")]
    DigitUnavailable(char),
    #[error("Unrecognized input: {0}")]
    Unrecognized(String),
    #[error("Missing locale code after 'lang'")]
    MissingLocale,
}
