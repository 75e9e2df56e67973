use log::debug;

use crate::expression::Operator;
use crate::game::errors::InputError;
use crate::problem::Problem;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Digit { slot: usize },
    Operator(Operator),
    Backspace,
    Clear,
    Restart,
    Locale(String),
    Hint,
    Quit,
}

fn command(word: &str) -> Option<InputEvent> {
    match word.to_ascii_lowercase().as_str() {
        "back" | "bs" | "<" => Some(InputEvent::Backspace),
        "clear" | "c" => Some(InputEvent::Clear),
        "restart" | "reset" => Some(InputEvent::Restart),
        "hint" | "?" => Some(InputEvent::Hint),
        "quit" | "q" | "exit" => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Splits a line into events. Digits are resolved to the slot holding them in
/// `problem`; words such as `clear` or `lang ja` become commands.
///
/// # Errors
///
/// Returns an error, and no events, if any part of the line is not understood.
pub fn parse_line(line: &str, problem: Option<&Problem>) -> Result<Vec<InputEvent>, InputError> {
    let mut events = Vec::new();
    let mut words = line.split_whitespace();

    while let Some(word) = words.next() {
        if let Some(event) = command(word) {
            events.push(event);
            continue;
        }
        if word.eq_ignore_ascii_case("lang") {
            let code = words.next().ok_or(InputError::MissingLocale)?;
            events.push(InputEvent::Locale(code.to_string()));
            continue;
        }

        for ch in word.chars() {
            if let Some(d) = ch.to_digit(10) {
                let slot = problem
                    .and_then(|p| u8::try_from(d).ok().and_then(|v| p.slot_of(v)))
                    .ok_or(InputError::DigitUnavailable(ch))?;
                events.push(InputEvent::Digit { slot });
            } else if let Some(op) = Operator::from_char(ch) {
                events.push(InputEvent::Operator(op));
            } else {
                return Err(InputError::Unrecognized(word.to_string()));
            }
        }
    }

    debug!("Parsed '{}' into {} events", line, events.len());
    Ok(events)
}
