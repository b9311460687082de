use super::event::ChainEvent;
use crate::error::ChainResult;
use crate::fragment::{Compilable, ConstantUnit, FieldUnit, Fragment, FunctionUnit, OperatorUnit};
use crate::kind::UnitKind;
use serde::Serialize;
use std::fmt;
use std::sync::mpsc::Sender;

/// Chain-unique identifier of a unit. Never reused within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitId(pub(crate) u64);

impl UnitId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fragment placed in a chain.
///
/// Position and deletability are maintained by the owning chain. The unit can
/// ask the chain to remove it, once, through [`Unit::request_removal`].
#[derive(Debug)]
pub struct Unit {
    id: UnitId,
    position: usize,
    deletable: bool,
    fragment: Fragment,
    removal: Option<Sender<ChainEvent>>,
}

impl Unit {
    pub(crate) fn new(
        id: UnitId,
        position: usize,
        fragment: Fragment,
        removal: Sender<ChainEvent>,
    ) -> Self {
        Self {
            id,
            position,
            deletable: true,
            fragment,
            removal: Some(removal),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Only the last unit of a chain is deletable.
    pub fn is_deletable(&self) -> bool {
        self.deletable
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn fragment_mut(&mut self) -> &mut Fragment {
        &mut self.fragment
    }

    pub fn constant_mut(&mut self) -> Option<&mut ConstantUnit> {
        self.fragment.as_constant_mut()
    }

    pub fn field_mut(&mut self) -> Option<&mut FieldUnit> {
        self.fragment.as_field_mut()
    }

    pub fn operator_mut(&mut self) -> Option<&mut OperatorUnit> {
        self.fragment.as_operator_mut()
    }

    pub fn function_mut(&mut self) -> Option<&mut FunctionUnit> {
        self.fragment.as_function_mut()
    }

    /// Whether [`request_removal`](Self::request_removal) would emit an event.
    pub fn can_request_removal(&self) -> bool {
        self.deletable && self.removal.is_some()
    }

    /// Ask the owning chain to remove this unit.
    ///
    /// Emits a [`ChainEvent::RemoveRequested`] carrying this unit's id and
    /// current position; the chain applies it in
    /// [`Chain::process_events`](crate::Chain::process_events). The handle is
    /// consumed, so a unit emits at most one request. Returns `false` without
    /// emitting anything when the unit is not deletable or already asked.
    pub fn request_removal(&mut self) -> bool {
        if !self.deletable {
            return false;
        }
        match self.removal.take() {
            Some(tx) => tx
                .send(ChainEvent::RemoveRequested {
                    id: self.id,
                    position: self.position,
                })
                .is_ok(),
            None => false,
        }
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn set_deletable(&mut self, deletable: bool) {
        self.deletable = deletable;
    }
}

impl Compilable for Unit {
    fn kind(&self) -> UnitKind {
        self.fragment.kind()
    }

    fn compile(&self) -> ChainResult<String> {
        self.fragment.compile()
    }

    fn reset_state(&mut self) {
        self.fragment.reset_state();
    }
}
