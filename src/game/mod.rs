//! Terminal driver: turns input lines into session operations and renders
//! after every mutation

mod core;
mod errors;
mod input;
mod view;

pub use self::core::Game;
pub use errors::InputError;
pub use input::{InputEvent, parse_line};
pub use view::{DigitStatus, Presenter, TerminalPresenter, View};

#[cfg(test)]
mod tests;
