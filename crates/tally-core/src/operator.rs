//! # Operators
//!
//! The four binary operators on the keypad and their application.
//!
//! Evaluation is strictly left to right: the engine applies the pending
//! operator as soon as the next one is pressed, so there is no precedence
//! table here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{DivisionByZero, ParseError};

/// A binary keypad operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Returns the key symbol.
    pub const fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Maps a key symbol to an operator.
    pub const fn from_symbol(symbol: char) -> Option<Operator> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Applies this operator to `a` and `b`.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, DivisionByZero> {
        apply(self, a, b)
    }
}

/// Applies `op` to the operands.
///
/// Division by zero (either sign of zero) is the one failure; every other
/// combination is plain IEEE arithmetic, so overflow yields an infinity.
///
/// ## Example
/// ```rust
/// use tally_core::operator::{apply, Operator};
/// use tally_core::error::DivisionByZero;
///
/// assert_eq!(apply(Operator::Multiply, 6.0, 7.0), Ok(42.0));
/// assert_eq!(apply(Operator::Divide, 5.0, 0.0), Err(DivisionByZero));
/// ```
pub fn apply(op: Operator, a: f64, b: f64) -> Result<f64, DivisionByZero> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide if b == 0.0 => Err(DivisionByZero),
        Operator::Divide => Ok(a / b),
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Operator::from_symbol(c).ok_or_else(|| ParseError::UnknownOperator(s.to_string()))
            }
            _ => match s.trim().to_lowercase().as_str() {
                "add" | "plus" => Ok(Operator::Add),
                "subtract" | "minus" => Ok(Operator::Subtract),
                "multiply" | "times" => Ok(Operator::Multiply),
                "divide" => Ok(Operator::Divide),
                _ => Err(ParseError::UnknownOperator(s.to_string())),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
