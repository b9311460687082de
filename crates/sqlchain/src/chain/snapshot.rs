use super::Chain;
use super::unit::Unit;
use crate::error::ChainResult;
use crate::fragment::{Argument, ArgumentKind, Compilable, Fragment, OperatorCategory, SqlFunction};
use crate::kind::{KindOption, UnitKind};
use serde::Serialize;

/// Editable state of a unit, as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitState {
    Constant {
        value: Option<String>,
    },
    Field {
        field: Option<String>,
    },
    Operator {
        category: OperatorCategory,
        symbol: Option<String>,
    },
    Function {
        function: Option<SqlFunction>,
        argument_kind: Option<ArgumentKind>,
        argument: Option<Box<UnitState>>,
    },
}

impl From<&Fragment> for UnitState {
    fn from(fragment: &Fragment) -> Self {
        match fragment {
            Fragment::Constant(unit) => UnitState::Constant {
                value: unit.value().map(str::to_string),
            },
            Fragment::Field(unit) => UnitState::Field {
                field: unit.selected().map(str::to_string),
            },
            Fragment::Operator(unit) => UnitState::Operator {
                category: unit.category(),
                symbol: unit.symbol().map(str::to_string),
            },
            Fragment::Function(unit) => UnitState::Function {
                function: unit.function(),
                argument_kind: unit.argument_kind(),
                argument: unit.argument().map(|argument| {
                    Box::new(match argument {
                        Argument::Field(field) => UnitState::Field {
                            field: field.selected().map(str::to_string),
                        },
                        Argument::Constant(constant) => UnitState::Constant {
                            value: constant.value().map(str::to_string),
                        },
                    })
                }),
            },
        }
    }
}

/// One unit of a [`ChainSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSnapshot {
    pub id: u64,
    pub position: usize,
    pub kind: UnitKind,
    pub deletable: bool,
    pub state: UnitState,
    /// The unit's own fragment, when it compiles.
    pub fragment: Option<String>,
    /// Why the unit does not compile.
    pub error: Option<String>,
}

impl From<&Unit> for UnitSnapshot {
    fn from(unit: &Unit) -> Self {
        let (fragment, error) = match unit.compile() {
            Ok(fragment) => (Some(fragment), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            id: unit.id().get(),
            position: unit.position(),
            kind: unit.kind(),
            deletable: unit.is_deletable(),
            state: UnitState::from(unit.fragment()),
            fragment,
            error,
        }
    }
}

/// Serializable view of a chain, for UIs and tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSnapshot {
    pub units: Vec<UnitSnapshot>,
    pub options: Vec<KindOption>,
    pub default_selection: Option<UnitKind>,
    pub compiled_sql: Option<String>,
}

impl ChainSnapshot {
    pub(crate) fn capture(chain: &Chain) -> Self {
        Self {
            units: chain.units().iter().map(UnitSnapshot::from).collect(),
            options: chain.options().to_vec(),
            default_selection: chain.default_selection(),
            compiled_sql: chain.compiled_sql().map(str::to_string),
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> ChainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
