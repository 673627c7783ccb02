use std::str::FromStr;

use thiserror::Error;

pub const SECTION_THRESHOLD: f64 = 0.1;
pub const SECTION_ROOT_MARGIN_PX: f64 = 50.0;
pub const IMAGE_THRESHOLD: f64 = 0.1;
pub const IMAGE_ROOT_MARGIN_PX: f64 = 100.0;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > left && bottom > top).then(|| Rect::new(left, top, right - left, bottom - top))
    }

    pub fn expanded(&self, margin: RootMargin) -> Rect {
        let px = margin.px();
        Rect::new(
            self.x - px,
            self.y - px,
            self.width + 2.0 * px,
            self.height + 2.0 * px,
        )
    }
}

/// Uniform growth applied to the viewport before intersection tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin(f64);

impl RootMargin {
    pub const fn px(self) -> f64 {
        self.0
    }

    pub const fn from_px(px: f64) -> Self {
        Self(px)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid root margin {input:?}; expected a pixel length such as \"50px\"")]
pub struct RootMarginParseError {
    input: String,
}

impl FromStr for RootMargin {
    type Err = RootMarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
        number
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|px| px.is_finite())
            .map(RootMargin)
            .ok_or_else(|| RootMarginParseError {
                input: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    threshold: f64,
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// Thresholds outside [0, 1] are clamped; NaN becomes 0.
    pub fn new(threshold: f64, root_margin: RootMargin) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            root_margin,
        }
    }

    pub fn section() -> Self {
        Self::new(SECTION_THRESHOLD, RootMargin(SECTION_ROOT_MARGIN_PX))
    }

    pub fn image() -> Self {
        Self::new(IMAGE_THRESHOLD, RootMargin(IMAGE_ROOT_MARGIN_PX))
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_intersecting(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::section()
    }
}

/// Visible fraction of `target` inside the margin-expanded viewport.
pub fn intersection_ratio(target: &Rect, viewport: &Rect, margin: RootMargin) -> f64 {
    let root = viewport.expanded(margin);
    let area = target.area();
    if area <= 0.0 {
        return if root.contains_point(target.x, target.y) {
            1.0
        } else {
            0.0
        };
    }
    target
        .intersection(&root)
        .map_or(0.0, |overlap| (overlap.area() / area).clamp(0.0, 1.0))
}
