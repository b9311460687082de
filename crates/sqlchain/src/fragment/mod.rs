//! Fragment units: the building blocks of a chain.
//!
//! Every unit holds a small piece of editable state and turns it into a SQL
//! fragment on demand. Fragments are padded with spaces; the chain collapses
//! the padding when it joins them.
//!
//! ```ignore
//! use sqlchain::fragment::{Compilable, ConstantUnit};
//!
//! let mut constant = ConstantUnit::new();
//! constant.set_value("5");
//! assert_eq!(constant.compile()?, " 5 ");
//! ```

mod constant;
mod field;
mod function;
mod operator;

pub use constant::ConstantUnit;
pub use field::{FieldOption, FieldUnit};
pub use function::{Argument, ArgumentKind, FunctionUnit, SqlFunction};
pub use operator::{
    ARITHMETIC_OPERATORS, BITWISE_OPERATORS, COMPARISON_OPERATORS, COMPOUND_OPERATORS,
    LOGICAL_OPERATORS, OperatorCategory, OperatorUnit,
};

use crate::config::{BuilderConfig, FieldRule};
use crate::error::ChainResult;
use crate::kind::UnitKind;
use std::sync::Arc;

/// Capability shared by every unit.
pub trait Compilable {
    /// The kind of this unit. Never changes after construction.
    fn kind(&self) -> UnitKind;

    /// Produce this unit's SQL fragment.
    ///
    /// Fails with [`ChainError::InvalidSyntax`](crate::ChainError::InvalidSyntax)
    /// when required state is missing.
    fn compile(&self) -> ChainResult<String>;

    /// Return the editable state to its initial, unset value.
    fn reset_state(&mut self);
}

/// A unit of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Constant(ConstantUnit),
    Field(FieldUnit),
    Operator(OperatorUnit),
    Function(FunctionUnit),
}

impl Fragment {
    pub fn as_constant(&self) -> Option<&ConstantUnit> {
        match self {
            Fragment::Constant(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_constant_mut(&mut self) -> Option<&mut ConstantUnit> {
        match self {
            Fragment::Constant(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldUnit> {
        match self {
            Fragment::Field(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut FieldUnit> {
        match self {
            Fragment::Field(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<&OperatorUnit> {
        match self {
            Fragment::Operator(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_operator_mut(&mut self) -> Option<&mut OperatorUnit> {
        match self {
            Fragment::Operator(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionUnit> {
        match self {
            Fragment::Function(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionUnit> {
        match self {
            Fragment::Function(unit) => Some(unit),
            _ => None,
        }
    }
}

impl Compilable for Fragment {
    fn kind(&self) -> UnitKind {
        match self {
            Fragment::Constant(unit) => unit.kind(),
            Fragment::Field(unit) => unit.kind(),
            Fragment::Operator(unit) => unit.kind(),
            Fragment::Function(unit) => unit.kind(),
        }
    }

    fn compile(&self) -> ChainResult<String> {
        match self {
            Fragment::Constant(unit) => unit.compile(),
            Fragment::Field(unit) => unit.compile(),
            Fragment::Operator(unit) => unit.compile(),
            Fragment::Function(unit) => unit.compile(),
        }
    }

    fn reset_state(&mut self) {
        match self {
            Fragment::Constant(unit) => unit.reset_state(),
            Fragment::Field(unit) => unit.reset_state(),
            Fragment::Operator(unit) => unit.reset_state(),
            Fragment::Function(unit) => unit.reset_state(),
        }
    }
}

/// Creates fresh units wired to the shared field table and operator categories.
#[derive(Debug, Clone)]
pub struct FragmentFactory {
    fields: Arc<[FieldRule]>,
    categories: Arc<[OperatorCategory]>,
    default_selected_field: bool,
    default_selected_function: bool,
}

impl FragmentFactory {
    pub fn new(config: &BuilderConfig) -> Self {
        Self {
            fields: config.fields.iter().cloned().collect(),
            categories: config.operator_categories.iter().copied().collect(),
            default_selected_field: config.default_selected_field,
            default_selected_function: config.default_selected_function,
        }
    }

    pub fn fields(&self) -> &Arc<[FieldRule]> {
        &self.fields
    }

    pub fn create(&self, kind: UnitKind) -> Fragment {
        match kind {
            UnitKind::Constant => Fragment::Constant(ConstantUnit::new()),
            UnitKind::Field if self.default_selected_field => {
                Fragment::Field(FieldUnit::with_default_selection(self.fields.clone()))
            }
            UnitKind::Field => Fragment::Field(FieldUnit::new(self.fields.clone())),
            UnitKind::Operator => Fragment::Operator(OperatorUnit::new(self.categories.clone())),
            UnitKind::Function if self.default_selected_function => {
                Fragment::Function(FunctionUnit::with_default_selection(self.fields.clone()))
            }
            UnitKind::Function => Fragment::Function(FunctionUnit::new(self.fields.clone())),
        }
    }
}
