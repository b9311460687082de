use super::truncate_sql_bytes;
use super::types::{AppendRejection, ChainHook, CompileReport};
use crate::kind::UnitKind;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl ChainHook for NoopHook {
    fn on_compile(&self, _report: &CompileReport) {}
}

/// A hook that prints chain activity to stderr.
#[derive(Debug, Clone)]
pub struct LoggingHook {
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
    /// Prefix for log messages.
    pub prefix: String,
    /// Also log appends, removals and resets, not just compilations.
    pub verbose: bool,
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self {
            max_sql_length: Some(200),
            prefix: "[sqlchain]".to_string(),
            verbose: false,
        }
    }
}

impl LoggingHook {
    /// Create a new logging hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Set prefix for log messages.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Log every mutation as well.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl ChainHook for LoggingHook {
    fn on_append(&self, kind: UnitKind, position: usize) {
        if self.verbose {
            eprintln!("{} append {} at {}", self.prefix, kind, position);
        }
    }

    fn on_append_rejected(&self, kind: UnitKind, reason: AppendRejection) {
        if self.verbose {
            eprintln!("{} append {} ignored: {:?}", self.prefix, kind, reason);
        }
    }

    fn on_remove(&self, kind: UnitKind, position: usize) {
        if self.verbose {
            eprintln!("{} remove {} at {}", self.prefix, kind, position);
        }
    }

    fn on_reset(&self, unit_count: usize) {
        if self.verbose {
            eprintln!("{} reset {} units", self.prefix, unit_count);
        }
    }

    fn on_compile(&self, report: &CompileReport) {
        match &report.outcome {
            Ok(sql) => eprintln!(
                "{} compiled {}/{} units | {}",
                self.prefix,
                report.compiled_units,
                report.unit_count,
                self.truncate_sql(sql)
            ),
            Err(err) => eprintln!(
                "{} compile FAILED ({} units): {}",
                self.prefix, report.unit_count, err
            ),
        }
    }
}

/// Snapshot of [`StatsHook`] counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainStats {
    pub appends: u64,
    pub rejected_appends: u64,
    pub removals: u64,
    pub resets: u64,
    pub compilations: u64,
    pub failed_compilations: u64,
    /// Compilations that dropped a trailing unit that cannot end a chain.
    pub dropped_trailing: u64,
}

/// A hook that counts chain activity.
#[derive(Debug, Default)]
pub struct StatsHook {
    appends: AtomicU64,
    rejected_appends: AtomicU64,
    removals: AtomicU64,
    resets: AtomicU64,
    compilations: AtomicU64,
    failed_compilations: AtomicU64,
    dropped_trailing: AtomicU64,
}

impl StatsHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current statistics.
    pub fn stats(&self) -> ChainStats {
        ChainStats {
            appends: self.appends.load(Ordering::Relaxed),
            rejected_appends: self.rejected_appends.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            compilations: self.compilations.load(Ordering::Relaxed),
            failed_compilations: self.failed_compilations.load(Ordering::Relaxed),
            dropped_trailing: self.dropped_trailing.load(Ordering::Relaxed),
        }
    }

    /// Reset all statistics.
    pub fn reset(&self) {
        for counter in [
            &self.appends,
            &self.rejected_appends,
            &self.removals,
            &self.resets,
            &self.compilations,
            &self.failed_compilations,
            &self.dropped_trailing,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl ChainHook for StatsHook {
    fn on_append(&self, _kind: UnitKind, _position: usize) {
        self.appends.fetch_add(1, Ordering::Relaxed);
    }

    fn on_append_rejected(&self, _kind: UnitKind, _reason: AppendRejection) {
        self.rejected_appends.fetch_add(1, Ordering::Relaxed);
    }

    fn on_remove(&self, _kind: UnitKind, _position: usize) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    fn on_reset(&self, _unit_count: usize) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    fn on_compile(&self, report: &CompileReport) {
        self.compilations.fetch_add(1, Ordering::Relaxed);
        if !report.is_ok() {
            self.failed_compilations.fetch_add(1, Ordering::Relaxed);
        }
        if report.dropped_trailing.is_some() {
            self.dropped_trailing.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// A hook that forwards every callback to several hooks, in order.
#[derive(Clone, Default)]
pub struct CompositeHook {
    hooks: Vec<Arc<dyn ChainHook>>,
}

impl CompositeHook {
    /// Create an empty composite hook.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Add a hook.
    #[allow(clippy::should_implement_trait)]
    pub fn add<H: ChainHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Add an Arc-wrapped hook.
    pub fn add_arc(mut self, hook: Arc<dyn ChainHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for CompositeHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeHook")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl ChainHook for CompositeHook {
    fn on_append(&self, kind: UnitKind, position: usize) {
        for hook in &self.hooks {
            hook.on_append(kind, position);
        }
    }

    fn on_append_rejected(&self, kind: UnitKind, reason: AppendRejection) {
        for hook in &self.hooks {
            hook.on_append_rejected(kind, reason);
        }
    }

    fn on_remove(&self, kind: UnitKind, position: usize) {
        for hook in &self.hooks {
            hook.on_remove(kind, position);
        }
    }

    fn on_stale_event(&self, position: usize) {
        for hook in &self.hooks {
            hook.on_stale_event(position);
        }
    }

    fn on_reset(&self, unit_count: usize) {
        for hook in &self.hooks {
            hook.on_reset(unit_count);
        }
    }

    fn on_compile(&self, report: &CompileReport) {
        for hook in &self.hooks {
            hook.on_compile(report);
        }
    }
}
