use super::unit::UnitId;

/// Messages sent from units to their chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEvent {
    /// A unit asked to be removed. `position` is where it sat when asking.
    RemoveRequested { id: UnitId, position: usize },
}
