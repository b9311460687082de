use super::truncate_sql_bytes;
use super::types::{AppendRejection, ChainHook, CompileReport};
use crate::kind::UnitKind;
use tracing::Level;

/// A `tracing`-based hook that emits chain activity under the
/// `sqlchain.chain` target.
///
/// Successful compilations and mutations are emitted at `level`; failed
/// compilations are always emitted at `WARN`.
///
/// Enable via the crate feature: `sqlchain = { features = ["tracing"] }`.
#[derive(Debug, Clone)]
pub struct TracingHook {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl TracingHook {
    /// Create a new hook with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl ChainHook for TracingHook {
    fn on_append(&self, kind: UnitKind, position: usize) {
        emit_at_level!(self.level, target: "sqlchain.chain", %kind, position, "unit appended");
    }

    fn on_append_rejected(&self, kind: UnitKind, reason: AppendRejection) {
        emit_at_level!(self.level, target: "sqlchain.chain", %kind, ?reason, "append ignored");
    }

    fn on_remove(&self, kind: UnitKind, position: usize) {
        emit_at_level!(self.level, target: "sqlchain.chain", %kind, position, "unit removed");
    }

    fn on_stale_event(&self, position: usize) {
        emit_at_level!(self.level, target: "sqlchain.chain", position, "stale removal event");
    }

    fn on_reset(&self, unit_count: usize) {
        emit_at_level!(self.level, target: "sqlchain.chain", unit_count, "units reset");
    }

    fn on_compile(&self, report: &CompileReport) {
        let dropped = report.dropped_trailing.map(UnitKind::as_str).unwrap_or("-");
        match &report.outcome {
            Ok(sql) => emit_at_level!(
                self.level,
                target: "sqlchain.chain",
                unit_count = report.unit_count,
                compiled_units = report.compiled_units,
                dropped,
                sql = %self.truncate_sql(sql),
                "chain compiled"
            ),
            Err(err) => tracing::warn!(
                target: "sqlchain.chain",
                unit_count = report.unit_count,
                error = %err,
                "chain compilation failed"
            ),
        }
    }
}
