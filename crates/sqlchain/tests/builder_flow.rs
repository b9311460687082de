use sqlchain::prelude::*;
use sqlchain::{COMPILE_ERROR_SENTINEL, StatsHook};
use std::sync::Arc;

fn rules() -> BuilderConfig {
    BuilderConfig::new()
        .with_field("ABC", 1)
        .with_field("DEF", 2)
        .with_field("EFG", 3)
}

fn assert_invariants(chain: &Chain) {
    let positions: Vec<usize> = chain.units().iter().map(Unit::position).collect();
    let expected: Vec<usize> = (0..chain.len()).collect();
    assert_eq!(positions, expected, "positions must be contiguous");

    let deletable: Vec<usize> = chain
        .units()
        .iter()
        .filter(|unit| unit.is_deletable())
        .map(Unit::position)
        .collect();
    if chain.is_empty() {
        assert!(deletable.is_empty());
    } else {
        assert_eq!(deletable, [chain.len() - 1], "only the last unit is deletable");
    }
}

/// Walks every sequence of kinds up to `depth`, checking invariants after each step.
fn explore(chain: &mut Chain, depth: usize, visited: &mut usize) {
    assert_invariants(chain);
    *visited += 1;
    if depth == 0 {
        return;
    }

    for kind in UnitKind::ALL {
        let allowed = chain.allowed_next_kinds().contains(&kind);
        let duplicate = chain.last_added().is_some_and(|last| last.kind == kind);
        let before = chain.len();

        match chain.append(kind) {
            Some(position) => {
                assert!(allowed && !duplicate);
                assert_eq!(position, before);
                explore(chain, depth - 1, visited);
                assert!(chain.remove(position));
            }
            None => {
                assert!(!allowed || duplicate);
                assert_eq!(chain.len(), before);
            }
        }
    }
}

#[test]
fn every_append_sequence_keeps_invariants() {
    let mut chain = Chain::new(rules()).unwrap();
    let mut visited = 0;
    explore(&mut chain, 5, &mut visited);
    assert!(visited > 20);
    assert!(chain.is_empty());
}

#[test]
fn removing_any_position_keeps_relative_order() {
    for victim in 0..5 {
        let mut chain = Chain::new(rules()).unwrap();
        for kind in [
            UnitKind::Constant,
            UnitKind::Operator,
            UnitKind::Field,
            UnitKind::Operator,
            UnitKind::Function,
        ] {
            chain.append(kind).unwrap();
        }
        let ids: Vec<_> = chain.units().iter().map(Unit::id).collect();

        assert!(chain.remove(victim));
        assert_invariants(&chain);

        let mut expected = ids.clone();
        expected.remove(victim);
        let remaining: Vec<_> = chain.units().iter().map(Unit::id).collect();
        assert_eq!(remaining, expected);
    }
}

#[test]
fn builds_where_clause_like_expression() -> ChainResult<()> {
    let stats = Arc::new(StatsHook::new());
    let mut chain = Chain::new(rules())?.with_hook_arc(stats.clone());

    chain.append(UnitKind::Field);
    chain.last_mut().and_then(Unit::field_mut).unwrap().select_by_id(2)?;

    chain.append(UnitKind::Operator);
    {
        let operator = chain.last_mut().and_then(Unit::operator_mut).unwrap();
        operator.set_category(OperatorCategory::Logical)?;
        operator.select_symbol("LIKE")?;
    }

    chain.append(UnitKind::Constant);
    chain
        .last_mut()
        .and_then(Unit::constant_mut)
        .unwrap()
        .set_value("%abc%");

    chain.append(UnitKind::Operator);
    {
        let operator = chain.last_mut().and_then(Unit::operator_mut).unwrap();
        operator.set_category(OperatorCategory::Logical)?;
        operator.select_symbol("AND")?;
    }

    chain.append(UnitKind::Function);
    {
        let function = chain.last_mut().and_then(Unit::function_mut).unwrap();
        function.set_function(SqlFunction::Length);
        function.set_argument_kind(ArgumentKind::Field);
        function.argument_field_mut().unwrap().select("EFG")?;
    }

    assert_eq!(chain.compile(), "DEF LIKE '%abc%' AND LENGTH(EFG)");
    assert_eq!(stats.stats().appends, 5);
    assert_eq!(stats.stats().failed_compilations, 0);
    Ok(())
}

#[test]
fn reset_then_compile_reports_sentinel() {
    let mut chain = Chain::new(rules()).unwrap();
    chain.append(UnitKind::Constant).unwrap();
    chain
        .last_mut()
        .and_then(Unit::constant_mut)
        .unwrap()
        .set_value("42");
    assert_eq!(chain.compile(), "42");

    chain.reset_all();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.compile(), COMPILE_ERROR_SENTINEL);
}

#[test]
fn removal_event_round_trip() {
    let mut chain = Chain::new(rules()).unwrap();
    chain.append(UnitKind::Field).unwrap();
    chain.append(UnitKind::Operator).unwrap();

    assert!(!chain.unit_mut(0).unwrap().request_removal());
    assert!(chain.unit_mut(1).unwrap().request_removal());
    assert_eq!(chain.process_events(), 1);

    assert_eq!(chain.len(), 1);
    assert!(chain.unit(0).unwrap().is_deletable());
    assert_eq!(chain.allowed_next_kinds(), [UnitKind::Operator]);
}
