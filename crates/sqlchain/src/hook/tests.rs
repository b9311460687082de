use super::*;
use crate::error::ChainError;
use crate::kind::UnitKind;
use std::sync::Arc;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingHook {
    events: Mutex<Vec<String>>,
}

impl RecordingHook {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ChainHook for RecordingHook {
    fn on_append(&self, kind: UnitKind, position: usize) {
        self.events.lock().unwrap().push(format!("append {kind} {position}"));
    }

    fn on_remove(&self, kind: UnitKind, position: usize) {
        self.events.lock().unwrap().push(format!("remove {kind} {position}"));
    }

    fn on_compile(&self, report: &CompileReport) {
        self.events
            .lock()
            .unwrap()
            .push(format!("compile ok={}", report.is_ok()));
    }
}

fn report(outcome: Result<String, ChainError>) -> CompileReport {
    CompileReport {
        unit_count: 3,
        compiled_units: 2,
        dropped_trailing: Some(UnitKind::Operator),
        outcome,
    }
}

#[test]
fn test_truncate_sql_bytes_respects_char_boundaries() {
    assert_eq!(truncate_sql_bytes("abcdef", 10), "abcdef");
    assert_eq!(truncate_sql_bytes("abcdef", 3), "abc");
    // 'é' is two bytes; cutting inside it backs off to the boundary.
    assert_eq!(truncate_sql_bytes("aé", 2), "a");
}

#[test]
fn test_logging_hook_truncates() {
    let hook = LoggingHook::new().max_sql_length(5).prefix("[test]");
    assert_eq!(hook.truncate_sql("ABC = 5 AND DEF"), "ABC =...");
    assert_eq!(hook.truncate_sql("ABC"), "ABC");
    assert_eq!(hook.prefix, "[test]");
}

#[test]
fn test_stats_hook_counts_and_resets() {
    let hook = StatsHook::new();
    hook.on_append(UnitKind::Field, 0);
    hook.on_append_rejected(UnitKind::Field, AppendRejection::DuplicateOfLast);
    hook.on_compile(&report(Ok("ABC".to_string())));
    hook.on_compile(&report(Err(ChainError::invalid_syntax("no field selected"))));

    let stats = hook.stats();
    assert_eq!(stats.appends, 1);
    assert_eq!(stats.rejected_appends, 1);
    assert_eq!(stats.compilations, 2);
    assert_eq!(stats.failed_compilations, 1);
    assert_eq!(stats.dropped_trailing, 2);

    hook.reset();
    assert_eq!(hook.stats(), ChainStats::default());
}

#[test]
fn test_composite_hook_fans_out_in_order() {
    let first = Arc::new(RecordingHook::default());
    let second = Arc::new(RecordingHook::default());
    let composite = CompositeHook::new()
        .add_arc(first.clone())
        .add_arc(second.clone())
        .add(NoopHook);
    assert_eq!(composite.len(), 3);

    composite.on_append(UnitKind::Constant, 0);
    composite.on_remove(UnitKind::Constant, 0);
    composite.on_compile(&report(Ok(String::new())));

    let expected = ["append constant 0", "remove constant 0", "compile ok=true"];
    assert_eq!(first.events(), expected);
    assert_eq!(second.events(), expected);
}
