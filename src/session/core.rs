use log::{debug, info, warn};

use crate::expression::{Expression, Operator, Token};
use crate::locale::Locale;
use crate::problem::{Problem, SLOT_COUNT};
use crate::session::constants::{DISPLAY_DECIMALS, EPSILON, INDEX_KEY, LOCALE_KEY, TARGET};
use crate::session::errors::SessionError;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    /// A solution was found and the advance is pending
    SolvedTransition,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Fewer than four slots used
    NotYet,
    NotSolved,
    Solved,
}

/// Transient message shown until the next input
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Success,
    DigitUnavailable,
    UnknownInput,
    Hint(Option<String>),
}

/// Progress through the problem set, persisted through a [`KeyValueStore`]
pub struct Session<S: KeyValueStore> {
    problems: Vec<Problem>,
    index: usize,
    expression: Expression,
    locale: Locale,
    feedback: Option<Feedback>,
    solved: bool,
    store: S,
}

fn round_for_display(value: f64) -> f64 {
    let scale = 10_f64.powi(DISPLAY_DECIMALS);
    (value * scale).round() / scale
}

impl<S: KeyValueStore> Session<S> {
    /// Restores index and locale from `store`, falling back to index 0 and
    /// `fallback_locale` when entries are missing or malformed.
    pub fn load(problems: Vec<Problem>, store: S, fallback_locale: Locale) -> Self {
        let total = problems.len();

        let index = match store.get(INDEX_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<usize>() {
                Ok(i) if i <= total => i,
                _ => {
                    warn!("Ignoring invalid stored problem index '{}'", raw);
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                warn!("Could not read problem index: {}", e);
                0
            }
        };

        let locale = match store.get(LOCALE_KEY) {
            Ok(Some(code)) => Locale::from_code(&code).unwrap_or_else(|| {
                warn!("Ignoring unsupported stored locale '{}'", code);
                fallback_locale
            }),
            Ok(None) => fallback_locale,
            Err(e) => {
                warn!("Could not read locale: {}", e);
                fallback_locale
            }
        };

        info!("Session loaded at problem {}/{} ({})", index, total, locale);

        Self {
            problems,
            index,
            expression: Expression::new(),
            locale,
            feedback: None,
            solved: false,
            store,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.index >= self.problems.len() {
            Phase::Completed
        } else if self.solved {
            Phase::SolvedTransition
        } else {
            Phase::InProgress
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.problems.len()
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.problems.get(self.index)
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Per-slot usage in the current expression
    pub fn used_slots(&self) -> [bool; SLOT_COUNT] {
        let mut used = [false; SLOT_COUNT];
        for (slot, flag) in used.iter_mut().enumerate() {
            *flag = self.expression.uses_slot(slot);
        }
        used
    }

    /// # Errors
    ///
    /// Returns `InvalidSlot` if `slot` is out of range or already used, and
    /// `NoActiveProblem` once every problem is solved.
    pub fn append_digit(&mut self, slot: usize) -> Result<(), SessionError> {
        let problem = self.current_problem().ok_or(SessionError::NoActiveProblem)?;
        let value = problem.digit(slot).ok_or(SessionError::InvalidSlot(slot))?;
        if self.expression.uses_slot(slot) {
            debug!("Rejecting reuse of slot {}", slot);
            return Err(SessionError::InvalidSlot(slot));
        }

        self.expression.push(Token::Digit { value, slot });
        self.expression_changed();
        Ok(())
    }

    pub fn append_operator(&mut self, op: Operator) {
        if self.phase() == Phase::Completed {
            return;
        }
        self.expression.push(Token::Operator(op));
        self.expression_changed();
    }

    pub fn backspace(&mut self) {
        self.expression.pop();
        self.expression_changed();
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.expression_changed();
    }

    /// Any edit drops transient feedback and a pending solve; `check_solved`
    /// re-establishes the latter.
    fn expression_changed(&mut self) {
        self.feedback = None;
        self.solved = false;
    }

    pub fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
    }

    /// Running value rounded for presentation, `None` while the expression is
    /// empty or malformed
    pub fn display_value(&self) -> Option<f64> {
        self.expression.evaluate().ok().map(round_for_display)
    }

    pub fn check_solved(&mut self) -> SolveStatus {
        if self.phase() == Phase::Completed || self.expression.used_slot_count() < SLOT_COUNT {
            return SolveStatus::NotYet;
        }

        match self.expression.evaluate() {
            Ok(value) if (value - TARGET).abs() < EPSILON => {
                info!(
                    "Problem {} solved: {}",
                    self.index + 1,
                    self.expression.to_infix()
                );
                self.solved = true;
                self.feedback = Some(Feedback::Success);
                SolveStatus::Solved
            }
            Ok(value) => {
                debug!("All digits used but value is {}", value);
                SolveStatus::NotSolved
            }
            Err(e) => {
                debug!("All digits used but expression is invalid: {}", e);
                SolveStatus::NotSolved
            }
        }
    }

    /// Moves to the next problem; returns `false` unless a solve is pending.
    pub fn advance(&mut self) -> bool {
        if self.phase() != Phase::SolvedTransition {
            debug!("Ignoring advance outside a solved transition");
            return false;
        }

        self.index += 1;
        self.solved = false;
        self.persist_index();
        self.expression.clear();
        self.feedback = None;

        if self.phase() == Phase::Completed {
            info!("All {} problems solved", self.total());
        }
        true
    }

    pub fn restart(&mut self) {
        info!("Restarting from the first problem");
        self.index = 0;
        self.solved = false;
        self.persist_index();
        self.expression.clear();
        self.feedback = None;
    }

    /// Switches locale, returning the one actually used
    pub fn set_locale(&mut self, code: &str) -> Locale {
        self.locale = Locale::resolve(code);
        if let Err(e) = self.store.set(LOCALE_KEY, self.locale.code()) {
            warn!("Could not persist locale: {}", e);
        }
        self.locale
    }

    fn persist_index(&mut self) {
        if let Err(e) = self.store.set(INDEX_KEY, &self.index.to_string()) {
            warn!("Could not persist problem index: {}", e);
        }
    }
}
