use itertools::Itertools;
use log::debug;

use crate::problem::Problem;

pub const DIGIT_MIN: u8 = 1;
pub const DIGIT_MAX: u8 = 9;
pub const SLOT_COUNT: usize = 4;

/// Number of problems, C(9, 4)
pub const PROBLEM_COUNT: usize = binomial((DIGIT_MAX - DIGIT_MIN + 1) as usize, SLOT_COUNT);

const fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let mut result = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result
}

/// All four-digit combinations, lexicographically ordered
pub fn generate() -> Vec<Problem> {
    let problems: Vec<Problem> = (DIGIT_MIN..=DIGIT_MAX)
        .combinations(SLOT_COUNT)
        .filter_map(|combo| {
            let digits: [u8; SLOT_COUNT] = combo.try_into().ok()?;
            Problem::new(digits)
        })
        .collect();

    debug!("Generated {} problems", problems.len());
    problems
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::binomial;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(9, 4), 126);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 5), 1);
        assert_eq!(binomial(3, 4), 0);
    }
}
