//! The chain orchestrator.
//!
//! A [`Chain`] owns an ordered list of [`Unit`]s, decides which kinds may be
//! appended next, and compiles the units into a single SQL string.
//!
//! # Usage
//!
//! ```ignore
//! use sqlchain::{BuilderConfig, Chain, OperatorCategory, UnitKind};
//!
//! let mut chain = Chain::new(BuilderConfig::new().with_field("ABC", 1))?;
//!
//! chain.append(UnitKind::Field);
//! chain.unit_mut(0).and_then(|u| u.field_mut()).unwrap().select("ABC")?;
//!
//! chain.append(UnitKind::Operator);
//! chain.unit_mut(1).and_then(|u| u.operator_mut()).unwrap().select_symbol("=")?;
//!
//! chain.append(UnitKind::Constant);
//! chain.unit_mut(2).and_then(|u| u.constant_mut()).unwrap().set_value("5");
//!
//! assert_eq!(chain.compile(), "ABC = 5");
//! ```
//!
//! # Ordering rules
//!
//! - An empty chain accepts the kinds that can start a chain.
//! - After an operator: field, constant or function.
//! - After a field: operator.
//! - After a constant or function: anything.
//! - A kind equal to the most recently appended kind is never accepted.
//!
//! All of the above is further restricted to the kinds enabled in the
//! [`BuilderConfig`].

mod event;
mod snapshot;
mod unit;

pub use event::ChainEvent;
pub use snapshot::{ChainSnapshot, UnitSnapshot, UnitState};
pub use unit::{Unit, UnitId};

use crate::config::BuilderConfig;
use crate::error::{ChainError, ChainResult};
use crate::fragment::{Compilable, FragmentFactory};
use crate::hook::{AppendRejection, ChainHook, CompileReport};
use crate::kind::{KindOption, UnitKind};
use crate::registry::Registry;
use crate::text::collapse_whitespace;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// Output of [`Chain::compile`] when any unit fails to compile.
pub const COMPILE_ERROR_SENTINEL: &str = "SQL compilation error";

/// The kind most recently appended, as tracked for the duplicate guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastAdded {
    pub kind: UnitKind,
    /// `"added"` after an append, `"new last unit"` after a removal.
    pub note: &'static str,
}

/// A unit that failed to compile, as reported by [`Chain::diagnose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    pub position: usize,
    pub kind: UnitKind,
    pub error: ChainError,
}

/// Ordered list of fragment units plus the rules for growing it.
pub struct Chain {
    registry: Arc<Registry>,
    config: BuilderConfig,
    factory: FragmentFactory,
    units: Vec<Unit>,
    next_id: u64,
    last_added: Option<LastAdded>,
    options: Vec<KindOption>,
    default_selection: Option<UnitKind>,
    compiled_sql: Option<String>,
    events_tx: Sender<ChainEvent>,
    events_rx: Receiver<ChainEvent>,
    hook: Option<Arc<dyn ChainHook>>,
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("units", &self.units)
            .field("last_added", &self.last_added)
            .field("options", &self.options)
            .field("compiled_sql", &self.compiled_sql)
            .field("has_hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

impl Chain {
    /// Create an empty chain using the standard registry.
    pub fn new(config: BuilderConfig) -> ChainResult<Self> {
        Self::with_registry(config, Registry::standard())
    }

    /// Create an empty chain with a custom registry.
    pub fn with_registry(config: BuilderConfig, registry: Arc<Registry>) -> ChainResult<Self> {
        config.validate()?;
        let (events_tx, events_rx) = mpsc::channel();
        let mut chain = Self {
            registry,
            factory: FragmentFactory::new(&config),
            config,
            units: Vec::new(),
            next_id: 0,
            last_added: None,
            options: Vec::new(),
            default_selection: None,
            compiled_sql: None,
            events_tx,
            events_rx,
            hook: None,
        };
        chain.refresh_options();
        Ok(chain)
    }

    /// Attach a hook.
    pub fn with_hook<H: ChainHook + 'static>(mut self, hook: H) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Attach an Arc-wrapped hook.
    pub fn with_hook_arc(mut self, hook: Arc<dyn ChainHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, position: usize) -> Option<&Unit> {
        self.units.get(position)
    }

    pub fn unit_mut(&mut self, position: usize) -> Option<&mut Unit> {
        self.units.get_mut(position)
    }

    pub fn last(&self) -> Option<&Unit> {
        self.units.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Unit> {
        self.units.last_mut()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn last_added(&self) -> Option<LastAdded> {
        self.last_added
    }

    /// The SQL produced by the most recent [`compile`](Self::compile), if any.
    pub fn compiled_sql(&self) -> Option<&str> {
        self.compiled_sql.as_deref()
    }

    /// Kinds that may be appended next, in canonical order.
    pub fn allowed_next_kinds(&self) -> Vec<UnitKind> {
        let candidates: &[UnitKind] = match self.units.last().map(Compilable::kind) {
            None => {
                return UnitKind::ALL
                    .into_iter()
                    .filter(|kind| self.config.allows(*kind))
                    .filter(|kind| self.registry.can_start_chain(*kind))
                    .collect();
            }
            Some(UnitKind::Operator) => &[UnitKind::Field, UnitKind::Constant, UnitKind::Function],
            Some(UnitKind::Field) => &[UnitKind::Operator],
            Some(UnitKind::Constant | UnitKind::Function) => &UnitKind::ALL,
        };
        candidates
            .iter()
            .copied()
            .filter(|kind| self.config.allows(*kind))
            .collect()
    }

    /// Picker entries for [`allowed_next_kinds`](Self::allowed_next_kinds).
    pub fn options(&self) -> &[KindOption] {
        &self.options
    }

    /// The kind a picker should preselect.
    pub fn default_selection(&self) -> Option<UnitKind> {
        self.default_selection
    }

    /// Append a new unit of `kind`.
    ///
    /// Returns the new unit's position, or `None` (leaving the chain untouched)
    /// when `kind` is not allowed next or repeats the most recently appended kind.
    pub fn append(&mut self, kind: UnitKind) -> Option<usize> {
        if self.last_added.is_some_and(|last| last.kind == kind) {
            self.notify(|hook| hook.on_append_rejected(kind, AppendRejection::DuplicateOfLast));
            return None;
        }
        if !self.allowed_next_kinds().contains(&kind) {
            self.notify(|hook| hook.on_append_rejected(kind, AppendRejection::NotAllowed));
            return None;
        }

        for unit in &mut self.units {
            unit.set_deletable(false);
        }

        let position = self.units.len();
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.push(Unit::new(
            id,
            position,
            self.factory.create(kind),
            self.events_tx.clone(),
        ));
        self.last_added = Some(LastAdded {
            kind,
            note: "added",
        });
        self.refresh_options();

        self.notify(|hook| hook.on_append(kind, position));
        Some(position)
    }

    /// Remove the unit at `position`, shifting later units down by one.
    ///
    /// Out-of-range positions are ignored. Returns whether a unit was removed.
    pub fn remove(&mut self, position: usize) -> bool {
        if position >= self.units.len() {
            return false;
        }

        let removed = self.units.remove(position);
        for unit in &mut self.units[position..] {
            unit.set_position(unit.position() - 1);
        }
        if let Some(last) = self.units.last_mut() {
            last.set_deletable(true);
        }
        self.last_added = self.units.last().map(|unit| LastAdded {
            kind: unit.kind(),
            note: "new last unit",
        });
        self.refresh_options();

        let kind = removed.kind();
        self.notify(|hook| hook.on_remove(kind, position));
        true
    }

    /// Reset the editable state of every unit. Order and membership are kept.
    pub fn reset_all(&mut self) {
        for unit in &mut self.units {
            unit.reset_state();
        }
        let count = self.units.len();
        self.notify(|hook| hook.on_reset(count));
    }

    /// Apply every pending [`ChainEvent`]. Returns the number of units removed.
    ///
    /// An event whose unit no longer sits at the reported position is ignored.
    pub fn process_events(&mut self) -> usize {
        let mut removed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ChainEvent::RemoveRequested { id, position } => {
                    let current = self.units.get(position).map(Unit::id);
                    if current == Some(id) && self.remove(position) {
                        removed += 1;
                    } else {
                        self.notify(|hook| hook.on_stale_event(position));
                    }
                }
            }
        }
        removed
    }

    /// Compile the chain, store the result as [`compiled_sql`](Self::compiled_sql)
    /// and return it.
    ///
    /// A trailing unit whose kind cannot end a chain is left out. When any
    /// remaining unit fails to compile the result is [`COMPILE_ERROR_SENTINEL`].
    pub fn compile(&mut self) -> &str {
        let compiled = self.compiled_units();
        let report = CompileReport {
            unit_count: self.units.len(),
            compiled_units: compiled.len(),
            dropped_trailing: (compiled.len() < self.units.len())
                .then(|| self.units.last().map(Compilable::kind))
                .flatten(),
            outcome: join_fragments(compiled),
        };
        self.notify(|hook| hook.on_compile(&report));

        let sql = report
            .outcome
            .unwrap_or_else(|_| COMPILE_ERROR_SENTINEL.to_string());
        self.compiled_sql.insert(sql).as_str()
    }

    /// Compile without the sentinel fallback and without storing the result.
    pub fn try_compile(&self) -> ChainResult<String> {
        join_fragments(self.compiled_units())
    }

    /// The first unit that would make [`compile`](Self::compile) fail.
    pub fn diagnose(&self) -> Option<UnitFailure> {
        self.compiled_units().iter().find_map(|unit| {
            unit.compile().err().map(|error| UnitFailure {
                position: unit.position(),
                kind: unit.kind(),
                error,
            })
        })
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot::capture(self)
    }

    /// Units that take part in compilation.
    fn compiled_units(&self) -> &[Unit] {
        match self.units.split_last() {
            Some((last, rest)) if !self.registry.can_end_chain(last.kind()) => rest,
            _ => &self.units,
        }
    }

    fn refresh_options(&mut self) {
        let allowed = self.allowed_next_kinds();
        let preferred = match self.units.last().map(Compilable::kind) {
            None => None,
            Some(UnitKind::Operator) => Some(UnitKind::Field),
            Some(_) => Some(UnitKind::Operator),
        };
        self.default_selection = preferred
            .filter(|kind| allowed.contains(kind))
            .or_else(|| allowed.first().copied());
        self.options = allowed.into_iter().map(KindOption::from).collect();
    }

    fn notify(&self, f: impl FnOnce(&dyn ChainHook)) {
        if let Some(hook) = &self.hook {
            f(hook.as_ref());
        }
    }
}

fn join_fragments(units: &[Unit]) -> ChainResult<String> {
    let mut sql = String::new();
    for unit in units {
        sql.push_str(&unit.compile()?);
    }
    Ok(collapse_whitespace(&sql).trim().to_string())
}
