//! The fixed problem set: every choice of four distinct digits from 1-9

mod generator;

pub use generator::{DIGIT_MAX, DIGIT_MIN, PROBLEM_COUNT, SLOT_COUNT, generate};

use std::fmt;

/// Four distinct digits in strictly increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Problem {
    digits: [u8; SLOT_COUNT],
}

impl Problem {
    /// Returns `None` unless the digits are in `DIGIT_MIN..=DIGIT_MAX` and strictly increasing
    pub fn new(digits: [u8; SLOT_COUNT]) -> Option<Self> {
        let in_range = digits.iter().all(|d| (DIGIT_MIN..=DIGIT_MAX).contains(d));
        let increasing = digits.windows(2).all(|w| w[0] < w[1]);
        (in_range && increasing).then_some(Self { digits })
    }

    pub fn digits(&self) -> &[u8; SLOT_COUNT] {
        &self.digits
    }

    pub fn digit(&self, slot: usize) -> Option<u8> {
        self.digits.get(slot).copied()
    }

    /// Slot holding `value`, if the problem contains it
    pub fn slot_of(&self, value: u8) -> Option<usize> {
        self.digits.iter().position(|&d| d == value)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d] = self.digits;
        write!(f, "{} {} {} {}", a, b, c, d)
    }
}
