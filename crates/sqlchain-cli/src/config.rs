use serde::Deserialize;
use sqlchain::{BuilderConfig, OperatorCategory, SqlFunction, UnitKind};
use std::path::{Path, PathBuf};

/// A chain file: builder settings plus the units to replay, in order.
#[derive(Debug, Clone)]
pub struct ChainFile {
    pub path: PathBuf,
    pub contents: ChainFileContents,
}

impl ChainFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read chain file {}: {e}", path.display()))?;
        let contents = ChainFileContents::parse(&raw)
            .map_err(|e| anyhow::anyhow!("invalid chain file {}: {e:#}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainFileContents {
    #[serde(default)]
    pub builder: BuilderConfig,

    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

impl ChainFileContents {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: Self = toml::from_str(raw)?;
        file.builder
            .validate()
            .map_err(|e| anyhow::anyhow!("[builder]: {e}"))?;
        Ok(file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitSpec {
    Field {
        field: Option<String>,
    },
    Constant {
        value: Option<String>,
    },
    Operator {
        category: Option<OperatorCategory>,
        symbol: Option<String>,
    },
    Function {
        function: Option<SqlFunction>,
        argument: Option<ArgumentSpec>,
    },
}

impl UnitSpec {
    pub fn kind(&self) -> UnitKind {
        match self {
            UnitSpec::Field { .. } => UnitKind::Field,
            UnitSpec::Constant { .. } => UnitKind::Constant,
            UnitSpec::Operator { .. } => UnitKind::Operator,
            UnitSpec::Function { .. } => UnitKind::Function,
        }
    }
}

/// Argument of a function unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArgumentSpec {
    Field { field: Option<String> },
    Constant { value: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_builder_and_units() {
        let file = ChainFileContents::parse(
            r#"
[builder]
allowed_kinds = ["field", "operator", "function"]
fields = [{ column = "ABC", id = 1 }, { column = "DEF", id = 2 }]
default_selected_function = true

[[units]]
kind = "field"
field = "ABC"

[[units]]
kind = "operator"
category = "logical"
symbol = "LIKE"

[[units]]
kind = "function"
function = "LENGTH"
argument = { kind = "constant", value = "abc" }
"#,
        )
        .unwrap();

        assert_eq!(
            file.builder.allowed_kinds,
            [UnitKind::Field, UnitKind::Operator, UnitKind::Function]
        );
        assert_eq!(file.builder.fields.len(), 2);
        assert!(file.builder.default_selected_function);
        assert_eq!(
            file.units.iter().map(UnitSpec::kind).collect::<Vec<_>>(),
            [UnitKind::Field, UnitKind::Operator, UnitKind::Function]
        );
        assert_eq!(
            file.units[1],
            UnitSpec::Operator {
                category: Some(OperatorCategory::Logical),
                symbol: Some("LIKE".to_string()),
            }
        );
        assert_eq!(
            file.units[2],
            UnitSpec::Function {
                function: Some(SqlFunction::Length),
                argument: Some(ArgumentSpec::Constant {
                    value: Some("abc".to_string()),
                }),
            }
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let file = ChainFileContents::parse("").unwrap();
        assert_eq!(file.builder, BuilderConfig::default());
        assert!(file.units.is_empty());
    }

    #[test]
    fn rejects_invalid_builder() {
        let err = ChainFileContents::parse(
            r#"
[builder]
fields = [{ column = "ABC", id = 1 }, { column = "ABC", id = 2 }]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("[builder]:"));
    }

    #[test]
    fn rejects_unknown_unit_kind() {
        let err = ChainFileContents::parse(
            r#"
[[units]]
kind = "subquery"
"#,
        );
        assert!(err.is_err());
    }
}
