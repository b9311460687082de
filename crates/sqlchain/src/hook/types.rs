use crate::error::ChainError;
use crate::kind::UnitKind;

/// Why an `append` left the chain untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendRejection {
    /// The kind equals the kind of the most recently appended unit.
    DuplicateOfLast,
    /// The kind is not in the allowed-next set.
    NotAllowed,
}

/// Outcome of a single `Chain::compile` call.
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// Units in the chain when compilation started.
    pub unit_count: usize,
    /// Units whose fragments were joined (the trailing unit may be dropped).
    pub compiled_units: usize,
    /// Kind of the trailing unit dropped because it cannot end a chain.
    pub dropped_trailing: Option<UnitKind>,
    /// The SQL produced, or the error that replaced it with the sentinel.
    pub outcome: Result<String, ChainError>,
}

impl CompileReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Trait for observing chain mutations and compilation.
///
/// Every callback defaults to doing nothing; implement the ones you need to
/// log, count, or forward chain activity.
pub trait ChainHook: Send + Sync {
    /// Called after a unit was appended at `position`.
    fn on_append(&self, _kind: UnitKind, _position: usize) {}

    /// Called when `append` was a no-op.
    fn on_append_rejected(&self, _kind: UnitKind, _reason: AppendRejection) {}

    /// Called after the unit at `position` was removed.
    fn on_remove(&self, _kind: UnitKind, _position: usize) {}

    /// Called when a queued removal event no longer matches the chain.
    fn on_stale_event(&self, _position: usize) {}

    /// Called after every unit was reset.
    fn on_reset(&self, _unit_count: usize) {}

    /// Called after every compilation.
    fn on_compile(&self, report: &CompileReport);
}
