// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame layout: view size, margins, plot rectangle.
//!
//! The frame configuration fixes its margins explicitly, so layout is a
//! single arrange step: inset the view rectangle by the margins to get the
//! plot rectangle. Guides are placed in the margin strips.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side margins around the plot rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margin {
    /// Creates margins, in CSS order (top, right, bottom, left).
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform margins on all sides.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Output of the arrange step: the outer view and the inner plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    /// Outer chart bounds, anchored at the origin.
    pub view: Rect,
    /// The plot rectangle (view inset by the margins).
    pub plot: Rect,
}

impl FrameLayout {
    /// Computes a layout from an outer size and explicit margins.
    ///
    /// Margins are clamped so the plot rectangle never inverts.
    pub fn arrange(size: Size, margin: Margin) -> Self {
        let width = size.width.max(0.0);
        let height = size.height.max(0.0);
        let x0 = margin.left.max(0.0).min(width);
        let y0 = margin.top.max(0.0).min(height);
        let x1 = (width - margin.right.max(0.0)).max(x0);
        let y1 = (height - margin.bottom.max(0.0)).max(y0);
        Self {
            view: Rect::new(0.0, 0.0, width, height),
            plot: Rect::new(x0, y0, x1, y1),
        }
    }

    /// Returns the plot size (the view size with margins removed).
    pub fn adjusted_size(&self) -> Size {
        Size::new(self.plot.width(), self.plot.height())
    }
}
