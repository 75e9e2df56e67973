use crate::expression::errors::ExpressionError;
use crate::expression::eval::evaluate_tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    LeftParen,
    RightParen,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::LeftParen,
        Operator::RightParen,
    ];

    /// Binary arithmetic operators only
    pub const ARITHMETIC: [Operator; 4] =
        [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// ASCII symbol used in infix text
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::LeftParen => '(',
            Operator::RightParen => ')',
        }
    }

    /// Symbol shown to the player
    pub fn display_symbol(self) -> char {
        match self {
            Operator::Mul => '×',
            Operator::Div => '÷',
            other => other.symbol(),
        }
    }

    /// Accepts both the ASCII and the display symbols
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' | '×' => Some(Operator::Mul),
            '/' | '÷' => Some(Operator::Div),
            '(' => Some(Operator::LeftParen),
            ')' => Some(Operator::RightParen),
            _ => None,
        }
    }
}

/// One unit of a player-built expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A digit together with the problem slot it was taken from
    Digit { value: u8, slot: usize },
    Operator(Operator),
}

impl Token {
    pub fn slot(self) -> Option<usize> {
        match self {
            Token::Digit { slot, .. } => Some(slot),
            Token::Operator(_) => None,
        }
    }
}

/// Ordered token sequence built by appending and popping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn uses_slot(&self, slot: usize) -> bool {
        self.tokens.iter().any(|t| t.slot() == Some(slot))
    }

    /// Number of distinct slots referenced by digit tokens
    pub fn used_slot_count(&self) -> usize {
        let mut slots: Vec<usize> = self.tokens.iter().filter_map(|t| t.slot()).collect();
        slots.sort_unstable();
        slots.dedup();
        slots.len()
    }

    /// Token values concatenated as plain infix text, e.g. `(1+4)*2`
    pub fn to_infix(&self) -> String {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Digit { value, .. } => char::from(b'0' + value),
                Token::Operator(op) => op.symbol(),
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error if the tokens do not form a complete arithmetic
    /// expression or the result is not finite.
    pub fn evaluate(&self) -> Result<f64, ExpressionError> {
        evaluate_tokens(&self.tokens)
    }
}
