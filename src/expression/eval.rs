use log::debug;

use crate::expression::errors::ExpressionError;
use crate::expression::token::{Operator, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lexeme {
    Number(f64),
    Op(Operator),
}

impl Lexeme {
    fn describe(self) -> String {
        match self {
            Lexeme::Number(n) => format!("{}", n),
            Lexeme::Op(op) => op.symbol().to_string(),
        }
    }
}

#[inline]
fn is_zero(value: f64) -> bool {
    value.abs() < f64::EPSILON
}

/// Each ASCII digit is a separate operand; whitespace is skipped.
fn lex(text: &str) -> Result<Vec<Lexeme>, ExpressionError> {
    let mut lexemes = Vec::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        if let Some(d) = ch.to_digit(10) {
            lexemes.push(Lexeme::Number(f64::from(d)));
        } else if let Some(op) = Operator::from_char(ch) {
            lexemes.push(Lexeme::Op(op));
        } else {
            return Err(ExpressionError::InvalidCharacter { ch, index });
        }
    }
    Ok(lexemes)
}

struct Parser<'a> {
    lexemes: &'a [Lexeme],
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(lexemes: &'a [Lexeme]) -> Self {
        Self {
            lexemes,
            position: 0,
        }
    }

    fn peek(&self) -> Option<Lexeme> {
        self.lexemes.get(self.position).copied()
    }

    fn next(&mut self) -> Option<Lexeme> {
        let lexeme = self.peek();
        if lexeme.is_some() {
            self.position += 1;
        }
        lexeme
    }

    fn unexpected(&self, lexeme: Lexeme) -> ExpressionError {
        ExpressionError::UnexpectedToken {
            token: lexeme.describe(),
            index: self.position.saturating_sub(1),
        }
    }

    fn parse_expression(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.parse_term()?;
        while let Some(Lexeme::Op(op @ (Operator::Add | Operator::Sub))) = self.peek() {
            self.position += 1;
            let right = self.parse_term()?;
            value = if op == Operator::Add {
                value + right
            } else {
                value - right
            };
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.parse_factor()?;
        while let Some(Lexeme::Op(op @ (Operator::Mul | Operator::Div))) = self.peek() {
            self.position += 1;
            let right = self.parse_factor()?;
            value = if op == Operator::Mul {
                value * right
            } else {
                if is_zero(right) {
                    debug!("Division by zero attempted");
                    return Err(ExpressionError::DivisionByZero);
                }
                value / right
            };
        }
        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<f64, ExpressionError> {
        match self.next() {
            Some(Lexeme::Number(n)) => Ok(n),
            Some(Lexeme::Op(Operator::LeftParen)) => {
                let value = self.parse_expression()?;
                match self.next() {
                    Some(Lexeme::Op(Operator::RightParen)) => Ok(value),
                    Some(other) => Err(self.unexpected(other)),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some(other) => Err(self.unexpected(other)),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

fn evaluate_lexemes(lexemes: &[Lexeme]) -> Result<f64, ExpressionError> {
    if lexemes.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut parser = Parser::new(lexemes);
    let result = parser.parse_expression().and_then(|value| match parser.next() {
        // Anything left over, e.g. adjacent digits or a stray ')'
        Some(extra) => Err(parser.unexpected(extra)),
        None if value.is_finite() => Ok(value),
        None => Err(ExpressionError::NonFinite),
    });

    match &result {
        Ok(value) => debug!("Expression evaluated to: {}", value),
        Err(e) => debug!("Expression evaluation failed: {}", e),
    }

    result
}

/// # Errors
///
/// Returns an error if the tokens are empty, malformed, divide by zero
/// or produce a non-finite value.
pub fn evaluate_tokens(tokens: &[Token]) -> Result<f64, ExpressionError> {
    let lexemes: Vec<Lexeme> = tokens
        .iter()
        .map(|t| match *t {
            Token::Digit { value, .. } => Lexeme::Number(f64::from(value)),
            Token::Operator(op) => Lexeme::Op(op),
        })
        .collect();
    evaluate_lexemes(&lexemes)
}

/// Evaluates infix text made of single digits, `+ - * / × ÷` and parentheses.
///
/// # Errors
///
/// Returns an error for any character outside that alphabet, and for the same
/// conditions as [`evaluate_tokens`].
pub fn evaluate_str(text: &str) -> Result<f64, ExpressionError> {
    debug!("Evaluating expression text: '{}'", text);
    let lexemes = lex(text)?;
    evaluate_lexemes(&lexemes)
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::{Lexeme, is_zero, lex};
    use crate::expression::{ExpressionError, Operator};

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(f64::EPSILON / 2.0));
        assert!(!is_zero(f64::EPSILON * 2.0));
        assert!(!is_zero(1.0));
    }

    #[test]
    fn test_lex_splits_digits() {
        let lexemes = lex("12 + 3");
        assert_eq!(
            lexemes,
            Ok(vec![
                Lexeme::Number(1.0),
                Lexeme::Number(2.0),
                Lexeme::Op(Operator::Add),
                Lexeme::Number(3.0),
            ])
        );
    }

    #[test]
    fn test_lex_rejects_unknown_characters() {
        assert_eq!(
            lex("1+x"),
            Err(ExpressionError::InvalidCharacter { ch: 'x', index: 2 })
        );
        assert!(lex("2^3").is_err());
        assert!(lex("1.5").is_err());
    }
}
