use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::geometry::{intersection_ratio, ObserverOptions, Rect};

/// One intersection measurement delivered to an observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub target: Rect,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

type Callback = Rc<dyn Fn(&Visibility)>;

struct Observation {
    id: u64,
    target: Rect,
    options: ObserverOptions,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    observations: Vec<Observation>,
}

impl Registry {
    fn attach(&mut self, target: Rect, options: ObserverOptions, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.observations.push(Observation {
            id,
            target,
            options,
            callback,
        });
        id
    }

    fn detach(&mut self, id: u64) -> Option<Observation> {
        let index = self
            .observations
            .iter()
            .position(|observation| observation.id == id)?;
        Some(self.observations.remove(index))
    }

    fn is_live(&self, id: u64) -> bool {
        self.observations
            .iter()
            .any(|observation| observation.id == id)
    }
}

/// Single-threaded set of live observations, notified per viewport change.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe<F>(
        &self,
        target: Rect,
        options: ObserverOptions,
        callback: F,
    ) -> ObservationHandle
    where
        F: Fn(&Visibility) + 'static,
    {
        let id = self
            .inner
            .borrow_mut()
            .attach(target, options, Rc::new(callback));
        tracing::trace!(id, "observation attached");
        ObservationHandle {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn active(&self) -> usize {
        self.inner.borrow().observations.len()
    }

    /// Measure every live observation against `viewport`, in registration
    /// order. Callbacks may drop handles; detached observations are skipped.
    pub fn notify(&self, viewport: &Rect) {
        let pending: Vec<(u64, Visibility, Callback)> = self
            .inner
            .borrow()
            .observations
            .iter()
            .map(|observation| {
                let ratio = intersection_ratio(
                    &observation.target,
                    viewport,
                    observation.options.root_margin,
                );
                let entry = Visibility {
                    target: observation.target,
                    intersection_ratio: ratio,
                    is_intersecting: observation.options.is_intersecting(ratio),
                };
                (observation.id, entry, Rc::clone(&observation.callback))
            })
            .collect();

        for (id, entry, callback) in pending {
            if self.inner.borrow().is_live(id) {
                callback(&entry);
            }
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("active", &self.active())
            .finish()
    }
}

/// Keeps an observation alive; dropping it detaches the observation.
#[derive(Debug)]
pub struct ObservationHandle {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl ObservationHandle {
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().is_live(self.id))
    }

    /// Observe `target` instead. The old observation is detached first.
    pub fn retarget(&mut self, target: Rect) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        let Some(previous) = registry.detach(self.id) else {
            return;
        };
        self.id = registry.attach(target, previous.options, previous.callback);
        tracing::trace!(id = self.id, "observation retargeted");
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.borrow_mut().detach(self.id).is_some() {
                tracing::trace!(id = self.id, "observation detached");
            }
        }
    }
}
