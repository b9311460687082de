use super::Compilable;
use crate::error::{ChainError, ChainResult};
use crate::kind::UnitKind;
use crate::text::{is_numeric_literal, padded, quote_literal};

/// A literal value.
///
/// Numeric literals (ASCII digits only) are emitted as-is, anything else is
/// single-quoted with embedded `'` doubled, so `O'Hara` compiles to
/// `'O''Hara'`. The empty string is a valid literal and compiles to `''`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantUnit {
    value: Option<String>,
}

impl ConstantUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Compilable for ConstantUnit {
    fn kind(&self) -> UnitKind {
        UnitKind::Constant
    }

    fn compile(&self) -> ChainResult<String> {
        let value = self
            .value
            .as_deref()
            .ok_or_else(|| ChainError::invalid_syntax("constant has no value"))?;

        if is_numeric_literal(value) {
            Ok(padded(value))
        } else {
            Ok(padded(&quote_literal(value)))
        }
    }

    fn reset_state(&mut self) {
        self.value = None;
    }
}
