use super::error::{StateError, StateResult};
use super::{GateEvent, GateKind, GateState, StateTransition};

#[derive(Debug)]
pub struct GateMachine {
    kind: GateKind,
    state: GateState,
    transition_history: Vec<StateTransition>,
}

impl GateMachine {
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            state: GateState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn section() -> Self {
        Self::new(GateKind::Section)
    }

    pub fn image() -> Self {
        Self::new(GateKind::Image)
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }

    pub fn can_transition(&self, event: GateEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: GateEvent) -> Option<GateState> {
        use GateEvent::*;
        match (self.kind, self.state, event) {
            (_, GateState::Unobserved, EnterViewport) => Some(GateState::Intersecting),
            (_, GateState::Unobserved, ExitViewport) => Some(GateState::Unobserved),
            (_, GateState::Intersecting, EnterViewport | ExitViewport) => {
                Some(GateState::Intersecting)
            }
            (GateKind::Image, GateState::Intersecting, LoadSucceeded) => Some(GateState::Loaded),
            (GateKind::Image, GateState::Intersecting, LoadFailed) => Some(GateState::Errored),
            (
                GateKind::Image,
                terminal @ (GateState::Loaded | GateState::Errored),
                EnterViewport | ExitViewport,
            ) => Some(terminal),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: GateEvent) -> StateResult<GateState> {
        tracing::debug!(
            kind = ?self.kind,
            from = ?self.state,
            event = ?event,
            "request gate transition"
        );
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(
                kind = ?self.kind,
                from = ?from,
                event = ?event,
                "invalid gate transition requested"
            );
            StateError::InvalidGateTransition {
                kind: self.kind,
                from,
                event,
            }
        })?;

        let record = StateTransition::new(self.state, event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }
}

impl std::fmt::Display for GateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}::{:?}", self.kind, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_reveals_once_and_never_rehides() {
        let mut machine = GateMachine::section();
        assert_eq!(
            machine.transition(GateEvent::ExitViewport),
            Ok(GateState::Unobserved)
        );
        assert_eq!(
            machine.transition(GateEvent::EnterViewport),
            Ok(GateState::Intersecting)
        );
        assert_eq!(
            machine.transition(GateEvent::ExitViewport),
            Ok(GateState::Intersecting)
        );
        assert_eq!(
            machine.transition(GateEvent::EnterViewport),
            Ok(GateState::Intersecting)
        );
        assert!(machine.state().is_revealed());
        assert_eq!(machine.history().len(), 4);
    }

    #[test]
    fn section_rejects_load_events() {
        let mut machine = GateMachine::section();
        machine
            .transition(GateEvent::EnterViewport)
            .expect("enter should reveal");

        let err = machine
            .transition(GateEvent::LoadSucceeded)
            .expect_err("sections have no load phase");
        assert_eq!(
            err,
            StateError::InvalidGateTransition {
                kind: GateKind::Section,
                from: GateState::Intersecting,
                event: GateEvent::LoadSucceeded,
            }
        );
        assert_eq!(machine.state(), GateState::Intersecting);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn image_loads_after_intersection() {
        let mut machine = GateMachine::image();
        assert!(!machine.can_transition(GateEvent::LoadSucceeded));
        machine
            .transition(GateEvent::EnterViewport)
            .expect("enter should reveal");
        assert_eq!(
            machine.transition(GateEvent::LoadSucceeded),
            Ok(GateState::Loaded)
        );
        assert!(machine.state().is_terminal());

        assert_eq!(
            machine.history(),
            &[
                StateTransition::new(
                    GateState::Unobserved,
                    GateEvent::EnterViewport,
                    GateState::Intersecting
                ),
                StateTransition::new(
                    GateState::Intersecting,
                    GateEvent::LoadSucceeded,
                    GateState::Loaded
                ),
            ]
        );
    }

    #[test]
    fn image_failure_is_terminal_and_absorbs_viewport_events() {
        let mut machine = GateMachine::image();
        machine
            .transition(GateEvent::EnterViewport)
            .expect("enter should reveal");
        assert_eq!(
            machine.transition(GateEvent::LoadFailed),
            Ok(GateState::Errored)
        );
        assert_eq!(
            machine.transition(GateEvent::ExitViewport),
            Ok(GateState::Errored)
        );
        assert_eq!(
            machine.transition(GateEvent::EnterViewport),
            Ok(GateState::Errored)
        );
        assert!(!machine.can_transition(GateEvent::LoadSucceeded));
        assert!(!machine.can_transition(GateEvent::LoadFailed));
    }

    #[test]
    fn load_before_intersection_is_rejected_without_mutating_history() {
        let mut machine = GateMachine::image();
        let err = machine
            .transition(GateEvent::LoadFailed)
            .expect_err("unobserved image cannot fail a load");
        assert!(matches!(
            err,
            StateError::InvalidGateTransition {
                kind: GateKind::Image,
                from: GateState::Unobserved,
                event: GateEvent::LoadFailed
            }
        ));
        assert_eq!(machine.state(), GateState::Unobserved);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn display_names_kind_and_state() {
        let machine = GateMachine::image();
        assert_eq!(machine.to_string(), "Image::Unobserved");
    }
}
