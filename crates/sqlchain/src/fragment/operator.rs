use super::Compilable;
use crate::error::{ChainError, ChainResult};
use crate::kind::UnitKind;
use crate::text::padded;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const COMPARISON_OPERATORS: &[&str] = &["<>", "!=", "<", "<=", ">", ">=", "="];
pub const BITWISE_OPERATORS: &[&str] = &["&", "|", "^"];
pub const ARITHMETIC_OPERATORS: &[&str] = &["+", "-", "*", "/", "%"];
pub const COMPOUND_OPERATORS: &[&str] = &["+=", "-=", "*=", "/=", "%=", "&=", "^-=", "|*="];
pub const LOGICAL_OPERATORS: &[&str] = &[
    "ALL", "AND", "ANY", "BETWEEN", "EXISTS", "IN", "LIKE", "NOT", "OR", "SOME", "NOT IN",
];

/// Operator family, the first level of an operator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorCategory {
    Comparison,
    Bitwise,
    Arithmetic,
    Compound,
    Logical,
}

impl OperatorCategory {
    pub const ALL: [OperatorCategory; 5] = [
        OperatorCategory::Comparison,
        OperatorCategory::Bitwise,
        OperatorCategory::Arithmetic,
        OperatorCategory::Compound,
        OperatorCategory::Logical,
    ];

    /// Symbols selectable within this category.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            OperatorCategory::Comparison => COMPARISON_OPERATORS,
            OperatorCategory::Bitwise => BITWISE_OPERATORS,
            OperatorCategory::Arithmetic => ARITHMETIC_OPERATORS,
            OperatorCategory::Compound => COMPOUND_OPERATORS,
            OperatorCategory::Logical => LOGICAL_OPERATORS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperatorCategory::Comparison => "COMPARISON",
            OperatorCategory::Bitwise => "BITWISE",
            OperatorCategory::Arithmetic => "ARITHMETIC",
            OperatorCategory::Compound => "COMPOUND",
            OperatorCategory::Logical => "LOGICAL",
        }
    }
}

impl fmt::Display for OperatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A binary operator: a category plus a symbol from that category.
///
/// Changing the category always clears the symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorUnit {
    allowed: Arc<[OperatorCategory]>,
    category: OperatorCategory,
    symbol: Option<&'static str>,
}

impl OperatorUnit {
    pub fn new(allowed: Arc<[OperatorCategory]>) -> Self {
        let category = default_category(&allowed);
        Self {
            allowed,
            category,
            symbol: None,
        }
    }

    /// Categories offered by this unit.
    pub fn categories(&self) -> &[OperatorCategory] {
        &self.allowed
    }

    pub fn category(&self) -> OperatorCategory {
        self.category
    }

    /// Symbols of the current category.
    pub fn symbols(&self) -> &'static [&'static str] {
        self.category.symbols()
    }

    pub fn symbol(&self) -> Option<&'static str> {
        self.symbol
    }

    /// Switch category. The symbol selection is cleared.
    pub fn set_category(&mut self, category: OperatorCategory) -> ChainResult<()> {
        if !self.allowed.contains(&category) {
            return Err(ChainError::CategoryNotAllowed(category.to_string()));
        }
        self.category = category;
        self.symbol = None;
        Ok(())
    }

    /// Select a symbol of the current category.
    pub fn select_symbol(&mut self, symbol: &str) -> ChainResult<()> {
        let found = self
            .category
            .symbols()
            .iter()
            .find(|candidate| **candidate == symbol)
            .ok_or_else(|| ChainError::UnknownSymbol {
                category: self.category.to_string(),
                symbol: symbol.to_string(),
            })?;
        self.symbol = Some(*found);
        Ok(())
    }
}

/// Comparison when offered, otherwise the first offered category.
fn default_category(allowed: &[OperatorCategory]) -> OperatorCategory {
    if allowed.is_empty() || allowed.contains(&OperatorCategory::Comparison) {
        OperatorCategory::Comparison
    } else {
        allowed[0]
    }
}

impl Compilable for OperatorUnit {
    fn kind(&self) -> UnitKind {
        UnitKind::Operator
    }

    fn compile(&self) -> ChainResult<String> {
        self.symbol
            .map(padded)
            .ok_or_else(|| ChainError::invalid_syntax("no operator selected"))
    }

    fn reset_state(&mut self) {
        self.category = default_category(&self.allowed);
        self.symbol = None;
    }
}
