use super::Compilable;
use crate::config::FieldRule;
use crate::error::{ChainError, ChainResult};
use crate::kind::UnitKind;
use crate::text::padded;
use serde::Serialize;
use std::sync::Arc;

/// One entry of a field picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// A column chosen from the configured field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUnit {
    fields: Arc<[FieldRule]>,
    selected: Option<String>,
}

impl FieldUnit {
    pub fn new(fields: Arc<[FieldRule]>) -> Self {
        Self {
            fields,
            selected: None,
        }
    }

    /// Create a unit with the first field of the table already selected.
    pub fn with_default_selection(fields: Arc<[FieldRule]>) -> Self {
        let selected = fields.first().map(|rule| rule.column.clone());
        Self { fields, selected }
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Picker entries, labelled `"{id} {column}"`.
    pub fn options(&self) -> Vec<FieldOption> {
        self.fields
            .iter()
            .map(|rule| FieldOption {
                value: rule.column.clone(),
                label: rule.label(),
            })
            .collect()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a field by column name.
    pub fn select(&mut self, column: &str) -> ChainResult<()> {
        if !self.fields.iter().any(|rule| rule.column == column) {
            return Err(ChainError::UnknownField(column.to_string()));
        }
        self.selected = Some(column.to_string());
        Ok(())
    }

    /// Select a field by its numeric id.
    pub fn select_by_id(&mut self, id: u32) -> ChainResult<()> {
        let rule = self
            .fields
            .iter()
            .find(|rule| rule.id == id)
            .ok_or_else(|| ChainError::UnknownField(format!("#{id}")))?;
        self.selected = Some(rule.column.clone());
        Ok(())
    }
}

impl Compilable for FieldUnit {
    fn kind(&self) -> UnitKind {
        UnitKind::Field
    }

    fn compile(&self) -> ChainResult<String> {
        match self.selected.as_deref() {
            Some(field) if !field.is_empty() => Ok(padded(field)),
            _ => Err(ChainError::invalid_syntax("no field selected")),
        }
    }

    fn reset_state(&mut self) {
        self.selected = None;
    }
}
