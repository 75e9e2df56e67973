//! Localized display strings

mod messages;

pub use messages::{Locale, MessageKey, lookup};
