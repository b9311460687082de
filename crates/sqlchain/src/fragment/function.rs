use super::Compilable;
use super::constant::ConstantUnit;
use super::field::FieldUnit;
use crate::config::FieldRule;
use crate::error::{ChainError, ChainResult};
use crate::kind::UnitKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Supported SQL functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlFunction {
    Length,
}

impl SqlFunction {
    pub const ALL: [SqlFunction; 1] = [SqlFunction::Length];

    pub fn as_str(self) -> &'static str {
        match self {
            SqlFunction::Length => "LENGTH",
        }
    }
}

impl fmt::Display for SqlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlFunction {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SqlFunction::ALL
            .into_iter()
            .find(|function| function.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChainError::UnknownFunction(s.to_string()))
    }
}

/// Which kind of unit feeds a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    Field,
    Constant,
}

impl ArgumentKind {
    pub const ALL: [ArgumentKind; 2] = [ArgumentKind::Field, ArgumentKind::Constant];

    pub fn label(self) -> &'static str {
        match self {
            ArgumentKind::Field => "SQL Field",
            ArgumentKind::Constant => "Constant",
        }
    }
}

/// The nested unit a function is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Field(FieldUnit),
    Constant(ConstantUnit),
}

impl Argument {
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Argument::Field(_) => ArgumentKind::Field,
            Argument::Constant(_) => ArgumentKind::Constant,
        }
    }

    pub fn compile(&self) -> ChainResult<String> {
        match self {
            Argument::Field(unit) => unit.compile(),
            Argument::Constant(unit) => unit.compile(),
        }
    }
}

/// A function call: `NAME(argument)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionUnit {
    fields: Arc<[FieldRule]>,
    function: Option<SqlFunction>,
    argument: Option<Argument>,
}

impl FunctionUnit {
    pub fn new(fields: Arc<[FieldRule]>) -> Self {
        Self {
            fields,
            function: None,
            argument: None,
        }
    }

    /// Create a unit with the first supported function already selected.
    pub fn with_default_selection(fields: Arc<[FieldRule]>) -> Self {
        Self {
            function: SqlFunction::ALL.first().copied(),
            ..Self::new(fields)
        }
    }

    pub fn function(&self) -> Option<SqlFunction> {
        self.function
    }

    pub fn set_function(&mut self, function: SqlFunction) {
        self.function = Some(function);
    }

    /// Select a function by name, case-insensitively.
    pub fn select_function(&mut self, name: &str) -> ChainResult<()> {
        self.function = Some(name.parse()?);
        Ok(())
    }

    pub fn argument(&self) -> Option<&Argument> {
        self.argument.as_ref()
    }

    pub fn argument_kind(&self) -> Option<ArgumentKind> {
        self.argument.as_ref().map(Argument::kind)
    }

    /// Choose what feeds the function.
    ///
    /// Switching to a different kind replaces the nested unit with a fresh one;
    /// choosing the current kind again keeps it.
    pub fn set_argument_kind(&mut self, kind: ArgumentKind) {
        if self.argument_kind() == Some(kind) {
            return;
        }
        self.argument = Some(match kind {
            ArgumentKind::Field => Argument::Field(FieldUnit::new(self.fields.clone())),
            ArgumentKind::Constant => Argument::Constant(ConstantUnit::new()),
        });
    }

    pub fn argument_field_mut(&mut self) -> Option<&mut FieldUnit> {
        match self.argument.as_mut() {
            Some(Argument::Field(unit)) => Some(unit),
            _ => None,
        }
    }

    pub fn argument_constant_mut(&mut self) -> Option<&mut ConstantUnit> {
        match self.argument.as_mut() {
            Some(Argument::Constant(unit)) => Some(unit),
            _ => None,
        }
    }
}

impl Compilable for FunctionUnit {
    fn kind(&self) -> UnitKind {
        UnitKind::Function
    }

    fn compile(&self) -> ChainResult<String> {
        let function = self
            .function
            .ok_or_else(|| ChainError::invalid_syntax("no function selected"))?;
        let argument = self
            .argument
            .as_ref()
            .ok_or_else(|| ChainError::invalid_syntax("function has no argument"))?;
        let argument = argument.compile()?;
        Ok(format!(" {}({}) ", function, argument.trim()))
    }

    fn reset_state(&mut self) {
        self.function = None;
        self.argument = None;
    }
}
