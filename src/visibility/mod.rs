//! Visibility-gated loading for below-the-fold sections and images.
//!
//! Everything here is single-threaded: an [`ObserverRegistry`] is notified
//! with the current viewport and pushes [`Visibility`] entries to live
//! observations. Gates apply them on their next `sync`.

pub mod geometry;
pub mod image;
pub mod observer;
pub mod section;

pub use geometry::{intersection_ratio, ObserverOptions, Rect, RootMargin};
pub use image::{ImageData, ImageError, ImageSource, ImageView, LazyImage};
pub use observer::{ObservationHandle, ObserverRegistry, Visibility};
pub use section::{LazySection, Rendered};
