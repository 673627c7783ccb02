use super::event::GateEvent;
use super::model::{GateKind, GateState};
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("invalid {kind:?} gate transition: from {from:?} using event {event:?}")]
    InvalidGateTransition {
        kind: GateKind,
        from: GateState,
        event: GateEvent,
    },
}
