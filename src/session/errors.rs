use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Slot {0} is out of range or already used")]
    InvalidSlot(usize),
    #[error("All problems are solved; restart to play again")]
    NoActiveProblem,
}
