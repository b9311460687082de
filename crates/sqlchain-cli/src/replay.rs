use crate::config::{ArgumentSpec, ChainFileContents, UnitSpec};
use sqlchain::{ArgumentKind, Chain, Compilable, Fragment, LoggingHook, UnitKind};

/// Append every unit of the file in order, then apply its state.
pub fn build_chain(contents: &ChainFileContents, verbose: bool) -> anyhow::Result<Chain> {
    let mut chain = Chain::new(contents.builder.clone())?;
    if verbose {
        chain = chain.with_hook(LoggingHook::new().verbose(true));
    }

    for (index, spec) in contents.units.iter().enumerate() {
        let kind = spec.kind();
        let allowed = chain.allowed_next_kinds();
        let Some(position) = chain.append(kind) else {
            if chain.last_added().is_some_and(|last| last.kind == kind) {
                anyhow::bail!("unit {index}: {kind} cannot follow another {kind}");
            }
            anyhow::bail!(
                "unit {index}: {kind} is not allowed here (expected one of: {})",
                join_kinds(&allowed)
            );
        };

        let Some(unit) = chain.unit_mut(position) else {
            anyhow::bail!("unit {index}: missing after append");
        };
        apply(unit.fragment_mut(), spec)
            .map_err(|e| anyhow::anyhow!("unit {index} ({kind}): {e}"))?;
    }

    Ok(chain)
}

fn apply(fragment: &mut Fragment, spec: &UnitSpec) -> anyhow::Result<()> {
    match (fragment, spec) {
        (Fragment::Field(unit), UnitSpec::Field { field }) => {
            if let Some(column) = field {
                unit.select(column)?;
            }
        }
        (Fragment::Constant(unit), UnitSpec::Constant { value }) => {
            if let Some(value) = value {
                unit.set_value(value.as_str());
            }
        }
        (Fragment::Operator(unit), UnitSpec::Operator { category, symbol }) => {
            if let Some(category) = category {
                unit.set_category(*category)?;
            }
            if let Some(symbol) = symbol {
                unit.select_symbol(symbol)?;
            }
        }
        (Fragment::Function(unit), UnitSpec::Function { function, argument }) => {
            if let Some(function) = function {
                unit.set_function(*function);
            }
            match argument {
                Some(ArgumentSpec::Field { field }) => {
                    unit.set_argument_kind(ArgumentKind::Field);
                    if let (Some(column), Some(nested)) = (field, unit.argument_field_mut()) {
                        nested.select(column)?;
                    }
                }
                Some(ArgumentSpec::Constant { value }) => {
                    unit.set_argument_kind(ArgumentKind::Constant);
                    if let (Some(value), Some(nested)) = (value, unit.argument_constant_mut()) {
                        nested.set_value(value.as_str());
                    }
                }
                None => {}
            }
        }
        (fragment, spec) => anyhow::bail!(
            "cannot apply {} state to a {} unit",
            spec.kind(),
            fragment.kind()
        ),
    }
    Ok(())
}

fn join_kinds(kinds: &[UnitKind]) -> String {
    if kinds.is_empty() {
        return "nothing".to_string();
    }
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlchain::{BuilderConfig, COMPILE_ERROR_SENTINEL, FragmentFactory};

    fn chain(raw: &str) -> anyhow::Result<Chain> {
        build_chain(&ChainFileContents::parse(raw)?, false)
    }

    const FIELDS: &str = r#"
[builder]
fields = [{ column = "ABC", id = 1 }, { column = "DEF", id = 2 }, { column = "EFG", id = 3 }]
"#;

    #[test]
    fn replays_full_expression() {
        let raw = format!(
            r#"{FIELDS}
[[units]]
kind = "field"
field = "DEF"

[[units]]
kind = "operator"
category = "logical"
symbol = "LIKE"

[[units]]
kind = "constant"
value = "%abc%"

[[units]]
kind = "operator"
category = "logical"
symbol = "AND"

[[units]]
kind = "function"
function = "LENGTH"
argument = {{ kind = "field", field = "EFG" }}
"#
        );
        let mut chain = chain(&raw).unwrap();
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.compile(), "DEF LIKE '%abc%' AND LENGTH(EFG)");
    }

    #[test]
    fn unset_state_compiles_to_sentinel() {
        let raw = format!(
            r#"{FIELDS}
[[units]]
kind = "field"
"#
        );
        let mut chain = chain(&raw).unwrap();
        assert_eq!(chain.compile(), COMPILE_ERROR_SENTINEL);
    }

    #[test]
    fn refused_append_names_the_unit() {
        let raw = format!(
            r#"{FIELDS}
[[units]]
kind = "field"
field = "ABC"

[[units]]
kind = "constant"
value = "1"
"#
        );
        let err = chain(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unit 1: constant is not allowed here (expected one of: operator)"
        );
    }

    #[test]
    fn duplicate_kind_is_reported() {
        let raw = r#"
[[units]]
kind = "constant"
value = "1"

[[units]]
kind = "constant"
value = "2"
"#;
        let err = chain(raw).unwrap_err();
        assert_eq!(err.to_string(), "unit 1: constant cannot follow another constant");
    }

    #[test]
    fn unknown_field_is_reported() {
        let raw = format!(
            r#"{FIELDS}
[[units]]
kind = "field"
field = "XYZ"
"#
        );
        let err = chain(&raw).unwrap_err();
        assert!(err.to_string().starts_with("unit 0 (field): "));
    }

    #[test]
    fn mismatched_state_is_an_error() {
        let factory = FragmentFactory::new(&BuilderConfig::default());
        let mut fragment = factory.create(UnitKind::Constant);
        let spec = UnitSpec::Field {
            field: Some("ABC".to_string()),
        };
        let err = apply(&mut fragment, &spec).unwrap_err();
        assert_eq!(err.to_string(), "cannot apply field state to a constant unit");
        assert_eq!(fragment.as_constant().and_then(|unit| unit.value()), None);
    }
}
