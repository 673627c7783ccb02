use super::model::GateState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    EnterViewport,
    ExitViewport,
    LoadSucceeded,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: GateState,
    pub event: GateEvent,
    pub to: GateState,
}

impl StateTransition {
    pub fn new(from: GateState, event: GateEvent, to: GateState) -> Self {
        Self { from, event, to }
    }
}
