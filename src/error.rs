// src/error.rs
// Typed error surface for the codec core. The CLI boundary wraps these in
// anyhow::Error for human-facing messages; library code never panics on
// malformed input.

use thiserror::Error;

use crate::symbol::Quaternary;

/// Why a VT-footer mismatch was flagged during decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Substitution,
    InsertionOrDeletion,
    Unknown,
}

#[derive(Debug, Error)]
pub enum HelixError {
    #[error("input bit string is empty")]
    EmptyInput,

    #[error("invalid character {found:?} at position {position}")]
    InvalidCharacter { found: char, position: usize },

    #[error("malformed footer: {reason}")]
    MalformedFooter { reason: String },

    #[error("decoded length {decoded} does not match framed length {expected}")]
    LengthMismatch { expected: usize, decoded: usize },

    #[error("no search-set point achieves |GC - 0.5| <= {epsilon}; closest attainable delta is {achieved_delta}")]
    InfeasibleConstraints {
        sequence: Vec<Quaternary>,
        achieved_delta: f64,
        epsilon: f64,
    },

    #[error("single-edit error detected during VT verification: {kind:?}")]
    ErrorDetected { kind: EditKind },

    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
}

pub type Result<T> = std::result::Result<T, HelixError>;
