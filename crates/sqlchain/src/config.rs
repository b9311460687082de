//! Builder configuration supplied by the embedding caller.

use crate::error::{ChainError, ChainResult};
use crate::fragment::OperatorCategory;
use crate::kind::UnitKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A selectable column: display name plus numeric identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub column: String,
    pub id: u32,
}

impl FieldRule {
    pub fn new(column: impl Into<String>, id: u32) -> Self {
        Self {
            column: column.into(),
            id,
        }
    }

    /// Label shown in a field picker, e.g. `1 ABC`.
    pub fn label(&self) -> String {
        format!("{} {}", self.id, self.column)
    }
}

/// Configuration for a [`Chain`](crate::Chain).
///
/// By default every unit kind and every operator category is allowed and the
/// field table is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Kinds the caller lets the user add at all.
    pub allowed_kinds: Vec<UnitKind>,
    /// Columns offered by field units (and by function arguments).
    pub fields: Vec<FieldRule>,
    /// Operator categories offered by operator units.
    pub operator_categories: Vec<OperatorCategory>,
    /// Preselect the first field when a field unit is created.
    pub default_selected_field: bool,
    /// Preselect the first function when a function unit is created.
    pub default_selected_function: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            allowed_kinds: UnitKind::ALL.to_vec(),
            fields: Vec::new(),
            operator_categories: OperatorCategory::ALL.to_vec(),
            default_selected_field: false,
            default_selected_function: false,
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the kinds that may be added.
    pub fn with_allowed_kinds(mut self, kinds: impl IntoIterator<Item = UnitKind>) -> Self {
        self.allowed_kinds = kinds.into_iter().collect();
        self
    }

    /// Replace the field table.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldRule>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    /// Append a single field to the table.
    pub fn with_field(mut self, column: impl Into<String>, id: u32) -> Self {
        self.fields.push(FieldRule::new(column, id));
        self
    }

    /// Restrict the operator categories offered by operator units.
    pub fn with_operator_categories(
        mut self,
        categories: impl IntoIterator<Item = OperatorCategory>,
    ) -> Self {
        self.operator_categories = categories.into_iter().collect();
        self
    }

    pub fn default_selected_field(mut self, enabled: bool) -> Self {
        self.default_selected_field = enabled;
        self
    }

    pub fn default_selected_function(mut self, enabled: bool) -> Self {
        self.default_selected_function = enabled;
        self
    }

    /// Whether `kind` was enabled by the caller.
    pub fn allows(&self, kind: UnitKind) -> bool {
        self.allowed_kinds.contains(&kind)
    }

    /// Check the configuration for duplicates and unusable combinations.
    pub fn validate(&self) -> ChainResult<()> {
        let mut kinds = HashSet::new();
        for kind in &self.allowed_kinds {
            if !kinds.insert(*kind) {
                return Err(ChainError::config(format!("duplicate allowed kind: {kind}")));
            }
        }

        let mut columns = HashSet::new();
        let mut ids = HashSet::new();
        for field in &self.fields {
            if field.column.trim().is_empty() {
                return Err(ChainError::config(format!(
                    "field {} has an empty column name",
                    field.id
                )));
            }
            if !columns.insert(field.column.as_str()) {
                return Err(ChainError::config(format!(
                    "duplicate field column: {}",
                    field.column
                )));
            }
            if !ids.insert(field.id) {
                return Err(ChainError::config(format!("duplicate field id: {}", field.id)));
            }
        }

        if self.allows(UnitKind::Operator) && self.operator_categories.is_empty() {
            return Err(ChainError::config(
                "operator units are allowed but no operator category is enabled",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_everything() {
        let config = BuilderConfig::new();
        for kind in UnitKind::ALL {
            assert!(config.allows(kind));
        }
        assert_eq!(config.operator_categories.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_columns() {
        let config = BuilderConfig::new().with_field("ABC", 1).with_field("ABC", 2);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate field column: ABC"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let config = BuilderConfig::new().with_field("ABC", 1).with_field("DEF", 1);
        assert!(matches!(config.validate(), Err(ChainError::Config(_))));
    }

    #[test]
    fn rejects_operator_without_categories() {
        let config = BuilderConfig::new().with_operator_categories([]);
        assert!(config.validate().is_err());

        let config = BuilderConfig::new()
            .with_allowed_kinds([UnitKind::Field, UnitKind::Constant])
            .with_operator_categories([]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn field_label() {
        assert_eq!(FieldRule::new("ABC", 1).label(), "1 ABC");
    }
}
