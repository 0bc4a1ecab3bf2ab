// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable mark primitives.
//!
//! Every generator in this crate (the waterfall pass, axes, frame guides)
//! emits [`Mark`] values. A mark is plain data: the host renderer decides how
//! to mount it (SVG, canvas, a scene graph) and how to hit-test it. Marks
//! carry an explicit `z_index` for paint order; renderers should sort by
//! `(z_index, MarkId)` for a deterministic tie-break.

use kurbo::{Point, Rect, Vec2};
use peniko::Brush;
use peniko::color::palette::css;

/// Stable mark identity.
///
/// Generators derive ids deterministically from a configured `id_base`, so a
/// mark keeps its identity when the same configuration is rendered again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// A paint + width pair for stroked shapes (connectors, domain lines, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal text anchoring relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The text starts at the position.
    Start,
    /// The text is centered on the position.
    Middle,
    /// The text ends at the position.
    End,
}

/// Vertical text baseline relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The ordinary text baseline sits on the position.
    Alphabetic,
    /// The text is centered vertically on the position.
    Middle,
    /// The text hangs below the position.
    Hanging,
}

/// An axis-aligned filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle bounds in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LineMark {
    /// Segment start.
    pub p0: Point,
    /// Segment end.
    pub p1: Point,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
    /// Optional `(on, off)` dash pattern in scene coordinates.
    pub dash: Option<(f64, f64)>,
}

/// A single run of unshaped text.
///
/// Shaping and font selection stay downstream; the position is interpreted
/// through `anchor`/`baseline` the way SVG interprets `text-anchor` and
/// `dominant-baseline`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation angle in degrees, applied around `pos`.
    pub angle: f64,
    /// Horizontal anchoring.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The drawable payload of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkShape {
    /// A filled rectangle.
    Rect(RectMark),
    /// A stroked line segment.
    Line(LineMark),
    /// A text run.
    Text(TextMark),
}

/// A drawable mark: identity, paint order, and shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order hint; see [`crate::z_order`].
    pub z_index: i32,
    /// Drawable payload.
    pub shape: MarkShape,
}

impl Mark {
    /// Creates a mark.
    pub fn new(id: MarkId, z_index: i32, shape: MarkShape) -> Self {
        Self { id, z_index, shape }
    }

    /// Returns the geometric bounds of this mark, if they are knowable
    /// without text metrics.
    ///
    /// Text marks return `None`: their extent depends on shaping, which this
    /// crate does not perform.
    pub fn bounds(&self) -> Option<Rect> {
        match &self.shape {
            MarkShape::Rect(r) => Some(r.rect),
            MarkShape::Line(l) => Some(Rect::from_points(l.p0, l.p1)),
            MarkShape::Text(_) => None,
        }
    }

    /// Returns this mark moved by `offset`.
    ///
    /// Generators emit plot-local coordinates; hosts use this to move marks
    /// into view space.
    pub fn translated(mut self, offset: Vec2) -> Self {
        match &mut self.shape {
            MarkShape::Rect(r) => r.rect = r.rect + offset,
            MarkShape::Line(l) => {
                l.p0 += offset;
                l.p1 += offset;
            }
            MarkShape::Text(t) => t.pos += offset,
        }
        self
    }
}
