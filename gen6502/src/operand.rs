//! Operands of address-taking instructions

use std::fmt;

use crate::error::GenError;
use crate::node::{Address, LabelMap};

/// A literal integer or a label that is resolved after layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Literal(i32),
    Label(String),
}

impl Operand {
    /// Label binding if the map has one, otherwise the literal value.
    pub fn resolve(&self, labels: &LabelMap) -> Result<i64, GenError> {
        match self {
            Operand::Literal(value) => Ok(i64::from(*value)),
            Operand::Label(name) => labels
                .get(name)
                .map(|&addr: &Address| i64::from(addr))
                .ok_or_else(|| GenError::UndefinedLabel(name.clone())),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Label(name) => f.write_str(name),
        }
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Literal(value)
    }
}

impl From<u8> for Operand {
    fn from(value: u8) -> Self {
        Operand::Literal(i32::from(value))
    }
}

impl From<u16> for Operand {
    fn from(value: u16) -> Self {
        Operand::Literal(i32::from(value))
    }
}

impl From<&str> for Operand {
    fn from(name: &str) -> Self {
        Operand::Label(name.to_string())
    }
}

impl From<String> for Operand {
    fn from(name: String) -> Self {
        Operand::Label(name)
    }
}

impl From<&String> for Operand {
    fn from(name: &String) -> Self {
        Operand::Label(name.clone())
    }
}
