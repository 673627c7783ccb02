use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use thiserror::Error;

use super::geometry::{ObserverOptions, Rect};
use super::observer::{ObservationHandle, ObserverRegistry, Visibility};
use crate::state::{GateEvent, GateMachine, GateState, StateResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("failed to load image {src}: {reason}")]
    Fetch { src: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub src: String,
    pub bytes: Vec<u8>,
}

/// Where image bytes come from once an image becomes visible.
pub trait ImageSource {
    fn fetch(&mut self, src: &str) -> Result<ImageData, ImageError>;
}

#[derive(Debug, PartialEq)]
pub enum ImageView<'a> {
    Placeholder,
    Loading,
    Loaded(&'a ImageData),
    Failed,
}

/// An image fetched exactly once, the first time it intersects the viewport.
pub struct LazyImage<S> {
    src: String,
    alt: String,
    machine: GateMachine,
    handle: Option<ObservationHandle>,
    pending: Rc<RefCell<VecDeque<Visibility>>>,
    source: S,
    image: Option<ImageData>,
    fetches: usize,
}

impl<S: ImageSource> LazyImage<S> {
    pub fn new(
        registry: &ObserverRegistry,
        target: Rect,
        src: impl Into<String>,
        alt: impl Into<String>,
        source: S,
    ) -> Self {
        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&pending);
        let handle = registry.observe(target, ObserverOptions::image(), move |entry| {
            sink.borrow_mut().push_back(*entry);
        });
        Self {
            src: src.into(),
            alt: alt.into(),
            machine: GateMachine::image(),
            handle: Some(handle),
            pending,
            source,
            image: None,
            fetches: 0,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn state(&self) -> GateState {
        self.machine.state()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches
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

    pub fn update(&mut self, entry: &Visibility) -> StateResult<GateState> {
        if !entry.is_intersecting {
            return self.machine.transition(GateEvent::ExitViewport);
        }
        if self.machine.state() != GateState::Unobserved {
            return self.machine.transition(GateEvent::EnterViewport);
        }

        self.machine.transition(GateEvent::EnterViewport)?;
        self.handle = None;
        self.fetches += 1;
        match self.source.fetch(&self.src) {
            Ok(image) => {
                tracing::debug!(
                    src = self.src.as_str(),
                    bytes = image.bytes.len(),
                    "image loaded"
                );
                self.image = Some(image);
                self.machine.transition(GateEvent::LoadSucceeded)
            }
            Err(err) => {
                tracing::warn!(src = self.src.as_str(), %err, "image failed to load");
                self.machine.transition(GateEvent::LoadFailed)
            }
        }
    }

    pub fn sync(&mut self) -> StateResult<GateState> {
        let delivered: Vec<Visibility> = self.pending.borrow_mut().drain(..).collect();
        for entry in &delivered {
            self.update(entry)?;
        }
        Ok(self.machine.state())
    }

    pub fn view(&self) -> ImageView<'_> {
        match (self.machine.state(), &self.image) {
            (GateState::Unobserved, _) => ImageView::Placeholder,
            (GateState::Intersecting, _) => ImageView::Loading,
            (GateState::Loaded, Some(image)) => ImageView::Loaded(image),
            (GateState::Loaded, None) | (GateState::Errored, _) => ImageView::Failed,
        }
    }
}

impl<S> std::fmt::Debug for LazyImage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyImage")
            .field("src", &self.src)
            .field("state", &self.machine.state())
            .field("fetches", &self.fetches)
            .finish()
    }
}
