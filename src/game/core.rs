use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::expression::Expression;
use crate::game::errors::InputError;
use crate::game::input::{InputEvent, parse_line};
use crate::game::view::{Presenter, View};
use crate::session::{Feedback, Phase, Session, SolveStatus};
use crate::solver::find_solution;
use crate::storage::KeyValueStore;

/// What to do with the rest of the current input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// The problem changed; remaining events referred to the old one
    SkipLine,
    Quit,
}

/// Owns the session and a presenter; every mutation is followed by a render
pub struct Game<S: KeyValueStore, P: Presenter> {
    session: Session<S>,
    presenter: P,
    advance_delay: Duration,
}

impl<S: KeyValueStore, P: Presenter> Game<S, P> {
    pub fn new(session: Session<S>, presenter: P, advance_delay: Duration) -> Self {
        Self {
            session,
            presenter,
            advance_delay,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn into_parts(self) -> (Session<S>, P) {
        (self.session, self.presenter)
    }

    /// Processes input lines until end of input or a quit command.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.render()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next() {
            let line = line?;
            let events = match parse_line(&line, self.session.current_problem()) {
                Ok(events) => events,
                Err(e) => {
                    debug!("Rejected input: {}", e);
                    self.session.set_feedback(match e {
                        InputError::DigitUnavailable(_) => Feedback::DigitUnavailable,
                        InputError::Unrecognized(_) | InputError::MissingLocale => {
                            Feedback::UnknownInput
                        }
                    });
                    self.render()?;
                    continue;
                }
            };

            if events.is_empty() {
                self.render()?;
            }

            for event in events {
                match self.dispatch(event, &mut lines)? {
                    Flow::Continue => {}
                    Flow::SkipLine => break,
                    Flow::Quit => {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let view = View::from_session(&self.session);
        self.presenter.render(&view)
    }

    fn dispatch<I>(&mut self, event: InputEvent, lines: &mut I) -> io::Result<Flow>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        debug!("Dispatching {:?}", event);
        match event {
            InputEvent::Digit { slot } => {
                if let Err(e) = self.session.append_digit(slot) {
                    debug!("{}", e);
                    self.session.set_feedback(Feedback::DigitUnavailable);
                }
                self.after_mutation()
            }
            InputEvent::Operator(op) => {
                self.session.append_operator(op);
                self.after_mutation()
            }
            InputEvent::Backspace => {
                self.session.backspace();
                self.after_mutation()
            }
            InputEvent::Clear => {
                self.session.clear();
                self.after_mutation()
            }
            InputEvent::Restart => {
                if self.session.phase() != Phase::Completed && !self.confirm(lines)? {
                    self.render()?;
                    return Ok(Flow::SkipLine);
                }
                self.session.restart();
                self.render()?;
                Ok(Flow::SkipLine)
            }
            InputEvent::Locale(code) => {
                let locale = self.session.set_locale(&code);
                info!("Locale set to {}", locale);
                self.render()?;
                Ok(Flow::Continue)
            }
            InputEvent::Hint => {
                if let Some(problem) = self.session.current_problem() {
                    let hint = find_solution(problem)
                        .map(|tokens| Expression::from_tokens(tokens).to_string());
                    self.session.set_feedback(Feedback::Hint(hint));
                }
                self.render()?;
                Ok(Flow::Continue)
            }
            InputEvent::Quit => Ok(Flow::Quit),
        }
    }

    fn confirm<I>(&mut self, lines: &mut I) -> io::Result<bool>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        self.presenter.confirm_reset(self.session.locale())?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => return Ok(false),
        };
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn after_mutation(&mut self) -> io::Result<Flow> {
        let status = self.session.check_solved();
        self.render()?;

        if status != SolveStatus::Solved {
            return Ok(Flow::Continue);
        }

        if !self.advance_delay.is_zero() {
            thread::sleep(self.advance_delay);
        }
        self.session.advance();
        self.render()?;
        Ok(Flow::SkipLine)
    }
}
