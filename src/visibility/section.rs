use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::geometry::{ObserverOptions, Rect};
use super::observer::{ObservationHandle, ObserverRegistry, Visibility};
use crate::state::{GateEvent, GateMachine, GateState, StateResult};

pub const DEFAULT_SECTION_PLACEHOLDER: &str = "Loading content...";

#[derive(Debug, PartialEq)]
pub enum Rendered<'a, T> {
    Placeholder(&'a str),
    Content(&'a T),
}

/// Below-the-fold content that is built the first time it scrolls into view
/// and stays mounted afterwards.
pub struct LazySection<T> {
    machine: GateMachine,
    handle: Option<ObservationHandle>,
    pending: Rc<RefCell<VecDeque<Visibility>>>,
    placeholder: String,
    content: Option<T>,
    mounts: usize,
}

impl<T> LazySection<T> {
    pub fn new(registry: &ObserverRegistry, target: Rect) -> Self {
        Self::with_options(registry, target, ObserverOptions::section())
    }

    pub fn with_options(
        registry: &ObserverRegistry,
        target: Rect,
        options: ObserverOptions,
    ) -> Self {
        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&pending);
        let handle = registry.observe(target, options, move |entry| {
            sink.borrow_mut().push_back(*entry);
        });
        Self {
            machine: GateMachine::section(),
            handle: Some(handle),
            pending,
            placeholder: DEFAULT_SECTION_PLACEHOLDER.to_string(),
            content: None,
            mounts: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn state(&self) -> GateState {
        self.machine.state()
    }

    pub fn is_observing(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(ObservationHandle::is_attached)
    }

    pub fn retarget(&mut self, target: Rect) {
        if let Some(handle) = self.handle.as_mut() {
            handle.retarget(target);
        }
    }

    /// Number of times the gated content has been built.
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    pub fn update(&mut self, entry: &Visibility) -> StateResult<GateState> {
        let event = if entry.is_intersecting {
            GateEvent::EnterViewport
        } else {
            GateEvent::ExitViewport
        };
        let state = self.machine.transition(event)?;
        if state.is_revealed() && self.handle.take().is_some() {
            tracing::debug!("section revealed; observation released");
        }
        Ok(state)
    }

    /// Apply every measurement delivered by the registry since the last
    /// sync, in delivery order.
    pub fn sync(&mut self) -> StateResult<GateState> {
        let delivered: Vec<Visibility> = self.pending.borrow_mut().drain(..).collect();
        for entry in &delivered {
            self.update(entry)?;
        }
        Ok(self.machine.state())
    }

    pub fn render<F>(&mut self, build: F) -> StateResult<Rendered<'_, T>>
    where
        F: FnOnce() -> T,
    {
        self.sync()?;
        if !self.machine.state().is_revealed() {
            return Ok(Rendered::Placeholder(&self.placeholder));
        }
        if self.content.is_none() {
            self.mounts += 1;
        }
        let content = self.content.get_or_insert_with(build);
        Ok(Rendered::Content(content))
    }
}

impl<T> std::fmt::Debug for LazySection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazySection")
            .field("state", &self.machine.state())
            .field("observing", &self.is_observing())
            .field("mounts", &self.mounts)
            .finish()
    }
}
