//! Unit kinds and their user-facing labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a fragment unit.
///
/// The kind is fixed when a unit is created and decides both how the unit
/// compiles and where in a chain it may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// A binary operator (`=`, `AND`, `+`, ...).
    Operator,
    /// A column picked from the configured field table.
    Field,
    /// A literal value.
    Constant,
    /// A SQL function applied to a field or constant.
    Function,
}

impl UnitKind {
    /// Every kind, in canonical option order.
    pub const ALL: [UnitKind; 4] = [
        UnitKind::Operator,
        UnitKind::Field,
        UnitKind::Constant,
        UnitKind::Function,
    ];

    /// Label shown next to the kind in a picker.
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Operator => "SQL Operator",
            UnitKind::Field => "SQL Field",
            UnitKind::Constant => "Constant",
            UnitKind::Function => "Function",
        }
    }

    /// Stable lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Operator => "operator",
            UnitKind::Field => "field",
            UnitKind::Constant => "constant",
            UnitKind::Function => "function",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable kind together with its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindOption {
    pub kind: UnitKind,
    pub label: &'static str,
}

impl From<UnitKind> for KindOption {
    fn from(kind: UnitKind) -> Self {
        Self {
            kind,
            label: kind.label(),
        }
    }
}
