pub mod constants;
mod core;
mod errors;

pub use self::core::{Feedback, Phase, Session, SolveStatus};
pub use errors::SessionError;
