//! Error types and invariant checks for the generator
//!
//! Every check is fatal for the compilation that triggered it: the error
//! travels back to the caller with `?` and no image or listing is produced.

use thiserror::Error;

use crate::opcodes::AddressingMode;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("{what} out of range: {value} not in {min}..={max}")]
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("branch out of range: ${from:04X} -> ${to:04X}")]
    BranchOutOfRange { from: u32, to: u32 },

    #[error("{what}: expected {expected}, got {actual}")]
    NotEqual {
        what: &'static str,
        expected: i64,
        actual: i64,
    },

    #[error("duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("no opcode for {mnemonic} in {mode} mode")]
    UnknownOpcode {
        mnemonic: String,
        mode: AddressingMode,
    },

    #[error("{mnemonic} in {mode} mode needs a different operand")]
    InvalidOperand {
        mnemonic: String,
        mode: AddressingMode,
    },

    #[error("program is {length} bytes, image holds {capacity}")]
    ProgramTooLarge { length: u32, capacity: u32 },

    #[error("invalid binary literal: `{0}`")]
    InvalidBinary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fails with [`GenError::OutOfRange`] unless `min <= value <= max`.
pub fn ensure_in_range(
    what: &'static str,
    value: impl Into<i64>,
    min: impl Into<i64>,
    max: impl Into<i64>,
) -> Result<(), GenError> {
    let (value, min, max) = (value.into(), min.into(), max.into());
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(GenError::OutOfRange {
            what,
            value,
            min,
            max,
        })
    }
}

/// Fails with [`GenError::NotEqual`] unless `actual == expected`.
pub fn ensure_equal(
    what: &'static str,
    expected: impl Into<i64>,
    actual: impl Into<i64>,
) -> Result<(), GenError> {
    let (expected, actual) = (expected.into(), actual.into());
    if expected == actual {
        Ok(())
    } else {
        Err(GenError::NotEqual {
            what,
            expected,
            actual,
        })
    }
}
