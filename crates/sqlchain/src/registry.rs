//! Per-kind chain boundary rules.
//!
//! The [`Registry`] answers two questions for every [`UnitKind`]: may a chain
//! start with it, and may a chain end with it. The standard table is built
//! once per process and shared.

use crate::kind::UnitKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Boundary rules for a single unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindMetadata {
    pub kind: UnitKind,
    pub can_start_chain: bool,
    pub can_end_chain: bool,
}

impl KindMetadata {
    pub const fn new(kind: UnitKind, can_start_chain: bool, can_end_chain: bool) -> Self {
        Self {
            kind,
            can_start_chain,
            can_end_chain,
        }
    }
}

/// The built-in boundary table.
pub const STANDARD_METADATA: [KindMetadata; 4] = [
    KindMetadata::new(UnitKind::Constant, true, true),
    KindMetadata::new(UnitKind::Field, true, true),
    KindMetadata::new(UnitKind::Operator, false, false),
    KindMetadata::new(UnitKind::Function, false, true),
];

/// Immutable lookup table of [`KindMetadata`].
///
/// Kinds missing from the table can neither start nor end a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<UnitKind, KindMetadata>,
}

impl Registry {
    /// Build a registry from explicit entries. Later entries for the same kind win.
    pub fn new(entries: impl IntoIterator<Item = KindMetadata>) -> Self {
        Self {
            entries: entries.into_iter().map(|meta| (meta.kind, meta)).collect(),
        }
    }

    /// The process-wide standard registry.
    pub fn standard() -> Arc<Registry> {
        static STANDARD: OnceLock<Arc<Registry>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Arc::new(Registry::new(STANDARD_METADATA)))
            .clone()
    }

    pub fn get(&self, kind: UnitKind) -> Option<&KindMetadata> {
        self.entries.get(&kind)
    }

    pub fn can_start_chain(&self, kind: UnitKind) -> bool {
        self.get(kind).is_some_and(|meta| meta.can_start_chain)
    }

    pub fn can_end_chain(&self, kind: UnitKind) -> bool {
        self.get(kind).is_some_and(|meta| meta.can_end_chain)
    }

    pub fn entries(&self) -> impl Iterator<Item = &KindMetadata> {
        self.entries.values()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new(STANDARD_METADATA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_boundaries() {
        let registry = Registry::standard();
        assert!(registry.can_start_chain(UnitKind::Constant));
        assert!(registry.can_end_chain(UnitKind::Constant));
        assert!(registry.can_start_chain(UnitKind::Field));
        assert!(registry.can_end_chain(UnitKind::Field));
        assert!(!registry.can_start_chain(UnitKind::Operator));
        assert!(!registry.can_end_chain(UnitKind::Operator));
        assert!(!registry.can_start_chain(UnitKind::Function));
        assert!(registry.can_end_chain(UnitKind::Function));
    }

    #[test]
    fn standard_is_shared() {
        assert!(Arc::ptr_eq(&Registry::standard(), &Registry::standard()));
    }

    #[test]
    fn missing_kind_is_never_a_boundary() {
        let registry = Registry::new([KindMetadata::new(UnitKind::Field, true, true)]);
        assert!(!registry.can_start_chain(UnitKind::Constant));
        assert!(!registry.can_end_chain(UnitKind::Constant));
        assert_eq!(registry.entries().count(), 1);
    }
}
