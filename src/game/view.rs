use std::io::{self, Write};

use crate::locale::{Locale, MessageKey};
use crate::session::{Feedback, Phase, Session};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitStatus {
    pub value: u8,
    pub used: bool,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub locale: Locale,
    pub phase: Phase,
    /// One-based; equals `total` once completed
    pub problem_number: usize,
    pub total: usize,
    pub expression_text: String,
    pub display_value: Option<f64>,
    pub digits: Vec<DigitStatus>,
    pub feedback: Option<Feedback>,
}

impl View {
    pub fn from_session<S: KeyValueStore>(session: &Session<S>) -> Self {
        let used = session.used_slots();
        let digits = session
            .current_problem()
            .map(|p| {
                p.digits()
                    .iter()
                    .zip(used)
                    .map(|(&value, used)| DigitStatus { value, used })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            locale: session.locale(),
            phase: session.phase(),
            problem_number: (session.index() + 1).min(session.total()),
            total: session.total(),
            expression_text: session.expression().to_string(),
            display_value: session.display_value(),
            digits,
            feedback: session.feedback().cloned(),
        }
    }
}

pub trait Presenter {
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn render(&mut self, view: &View) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn confirm_reset(&mut self, locale: Locale) -> io::Result<()>;
}

/// Plain-text frames written to any [`Write`]
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_feedback(&mut self, locale: Locale, feedback: &Feedback) -> io::Result<()> {
        match feedback {
            Feedback::Success => writeln!(self.out, "{}", locale.text(MessageKey::SuccessMessage)),
            Feedback::DigitUnavailable => {
                writeln!(self.out, "{}", locale.text(MessageKey::DigitUnavailable))
            }
            Feedback::UnknownInput => writeln!(self.out, "{}", locale.text(MessageKey::UnknownInput)),
            Feedback::Hint(Some(solution)) => writeln!(
                self.out,
                "{}: {}",
                locale.text(MessageKey::HintLabel),
                solution
            ),
            Feedback::Hint(None) => writeln!(self.out, "{}", locale.text(MessageKey::NoHint)),
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, view: &View) -> io::Result<()> {
        let locale = view.locale;
        writeln!(
            self.out,
            "== {} ==  {} {}/{}",
            locale.text(MessageKey::Title),
            locale.text(MessageKey::ProblemLabel),
            view.problem_number,
            view.total
        )?;

        if view.phase == Phase::Completed {
            writeln!(self.out, "{}", locale.text(MessageKey::CompletionMessage))?;
            writeln!(self.out, "[{}]", locale.text(MessageKey::RestartButton))?;
            return self.out.flush();
        }

        let digits: Vec<String> = view
            .digits
            .iter()
            .map(|d| {
                if d.used {
                    "_".to_string()
                } else {
                    d.value.to_string()
                }
            })
            .collect();
        writeln!(self.out, "  {}", digits.join(" "))?;

        match view.display_value {
            Some(value) => writeln!(self.out, "> {}  = {}", view.expression_text, value)?,
            None => writeln!(self.out, "> {}", view.expression_text)?,
        }

        if let Some(feedback) = &view.feedback {
            self.write_feedback(locale, feedback)?;
        }

        writeln!(
            self.out,
            "  + - * / ( )  [{}] [{}] [{}] [hint] [lang <code>] [quit]",
            locale.text(MessageKey::BackspaceButton),
            locale.text(MessageKey::ClearButton),
            locale.text(MessageKey::ResetButton)
        )?;
        self.out.flush()
    }

    fn confirm_reset(&mut self, locale: Locale) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {}",
            locale.text(MessageKey::ConfirmResetPrompt),
            locale.text(MessageKey::ConfirmYesHint)
        )?;
        self.out.flush()
    }
}
