use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use crate::expression::{Operator, Token, evaluate_tokens};
use crate::problem::{Problem, SLOT_COUNT};
use crate::session::constants::{EPSILON, TARGET};

/// Binary tree shapes over four operands
#[derive(Debug, Clone, Copy)]
enum Shape {
    /// ((a x b) y c) z d
    LeftChain,
    /// (a x (b y c)) z d
    LeftInner,
    /// (a x b) y (c z d)
    Balanced,
    /// a x ((b y c) z d)
    RightInner,
    /// a x (b y (c z d))
    RightChain,
}

const SHAPES: [Shape; 5] = [
    Shape::LeftChain,
    Shape::LeftInner,
    Shape::Balanced,
    Shape::RightInner,
    Shape::RightChain,
];

fn build_tokens(shape: Shape, operands: [Token; SLOT_COUNT], ops: [Operator; 3]) -> Vec<Token> {
    let [a, b, c, d] = operands;
    let [x, y, z] = ops.map(Token::Operator);
    let open = Token::Operator(Operator::LeftParen);
    let close = Token::Operator(Operator::RightParen);

    match shape {
        Shape::LeftChain => vec![open, open, a, x, b, close, y, c, close, z, d],
        Shape::LeftInner => vec![open, a, x, open, b, y, c, close, close, z, d],
        Shape::Balanced => vec![open, a, x, b, close, y, open, c, z, d, close],
        Shape::RightInner => vec![a, x, open, open, b, y, c, close, z, d, close],
        Shape::RightChain => vec![a, x, open, b, y, open, c, z, d, close, close],
    }
}

/// First arrangement of the problem's digits that evaluates to ten, if any
pub fn find_solution(problem: &Problem) -> Option<Vec<Token>> {
    debug!("Searching for a solution of {}", problem);

    let digits = problem.digits();
    let orders = (0..SLOT_COUNT).permutations(SLOT_COUNT);
    let op_triples: Vec<Vec<Operator>> = (0..3)
        .map(|_| Operator::ARITHMETIC)
        .multi_cartesian_product()
        .collect();

    for order in orders {
        let operands: [Token; SLOT_COUNT] = std::array::from_fn(|i| {
            let slot = order[i];
            Token::Digit {
                value: digits[slot],
                slot,
            }
        });

        for triple in &op_triples {
            let ops = [triple[0], triple[1], triple[2]];
            for shape in SHAPES {
                let tokens = build_tokens(shape, operands, ops);
                if let Ok(value) = evaluate_tokens(&tokens)
                    && (value - TARGET).abs() < EPSILON
                {
                    return Some(tokens);
                }
            }
        }
    }

    debug!("No solution for {}", problem);
    None
}

/// Solves every problem in parallel, keeping the input order
pub fn solve_all(problems: &[Problem]) -> Vec<Option<Vec<Token>>> {
    info!("Solving {} problems", problems.len());
    let results: Vec<Option<Vec<Token>>> = problems.par_iter().map(find_solution).collect();
    let solved = results.iter().filter(|r| r.is_some()).count();
    info!("{}/{} problems have a solution", solved, problems.len());
    results
}
