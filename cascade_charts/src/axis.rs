// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! A single [`AxisSpec`] with an `orient` that can be measured (for layout)
//! and arranged (to generate marks). Only the two orientations the waterfall
//! frame uses exist here: a left value axis and a bottom category axis.

use std::sync::Arc;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_tick_with_step;
use crate::mark::{
    LineMark, Mark, MarkId, MarkShape, StrokeStyle, TextAnchor, TextBaseline, TextMark,
};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::scale::{ScaleBand, ScaleLinear, ScaleSpec};
use crate::z_order;

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A horizontal axis placed below the plot area.
    Bottom,
}

/// An axis specification (single type + `orient`).
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length (in pixels). Direction depends on [`AxisSpec::orient`].
    pub tick_size: f64,
    /// Whether to draw tick marks.
    pub ticks: bool,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Extra padding applied between the axis/ticks and tick labels.
    pub label_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling.
    ///
    /// If `Some`, gridline marks are generated spanning the plot area.
    pub grid: Option<GridStyle>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter.
    ///
    /// If provided, this is used for both measuring and rendering tick
    /// labels. The second argument is the tick step (best-effort), which can
    /// be used for consistent decimal formatting.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
    /// Tick label rotation angle in degrees.
    pub label_angle: f64,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("ticks", &self.ticks)
            .field("labels", &self.labels)
            .field("show_domain", &self.show_domain)
            .field("tick_padding", &self.tick_padding)
            .field("label_padding", &self.label_padding)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("label_angle", &self.label_angle)
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification with sensible defaults.
    ///
    /// The returned axis has:
    /// - `tick_count = 10`
    /// - `tick_size = 5`
    /// - `tick_padding = 12` for bottom, `6` for left
    /// - `label_padding = 0`
    /// - `style = AxisStyle::default()`
    /// - no title and no grid.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        let tick_padding = match orient {
            AxisOrient::Bottom => 12.0,
            AxisOrient::Left => 6.0,
        };
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 5.0,
            ticks: true,
            labels: true,
            show_domain: true,
            tick_padding,
            label_padding: 0.0,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 10.0,
            tick_formatter: None,
            label_angle: 0.0,
        }
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in scene coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Enable or disable tick marks.
    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    /// Enable or disable tick labels.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set tick padding in scene coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set label padding in scene coordinates.
    pub fn with_label_padding(mut self, label_padding: f64) -> Self {
        self.label_padding = label_padding;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set tick label rotation angle in degrees.
    pub fn with_label_angle(mut self, angle_degrees: f64) -> Self {
        self.label_angle = angle_degrees;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Disable gridlines.
    pub fn without_grid(mut self) -> Self {
        self.grid = None;
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Clear the axis title.
    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    /// Set the title offset in scene coordinates.
    pub fn with_title_offset(mut self, title_offset: f64) -> Self {
        self.title_offset = title_offset;
        self
    }

    /// Enable or disable nice-domain behavior for this axis.
    pub fn with_nice_domain(mut self, nice_domain: bool) -> Self {
        if let ScaleSpec::Linear(s) = &mut self.scale {
            s.nice = nice_domain;
        }
        self
    }

    /// Returns a linear scale mapping axis values into plot coordinates,
    /// or `None` when this axis does not use a linear scale.
    pub fn scale_linear(&self, plot: Rect) -> Option<ScaleLinear> {
        match self.scale {
            ScaleSpec::Linear(s) => {
                Some(s.instantiate_resolved(self.scale_range(plot), self.tick_count))
            }
            ScaleSpec::Band(_) => None,
        }
    }

    /// Returns a band scale mapping indices into plot coordinates, or
    /// `None` when this axis does not use a band scale.
    pub fn scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        match self.scale {
            ScaleSpec::Band(s) => Some(s.instantiate(self.scale_range(plot))),
            ScaleSpec::Linear(_) => None,
        }
    }

    fn scale_range(&self, plot: Rect) -> (f64, f64) {
        match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y1, plot.y0),
        }
    }

    fn tick_values(&self) -> (Vec<f64>, f64) {
        match self.scale {
            ScaleSpec::Linear(s) => {
                let domain = s.resolved_domain(self.tick_count);
                let tmp = ScaleLinear::new(domain, (0.0, 1.0));
                let ticks = tmp.ticks(self.tick_count);
                let step = tick_step(&ticks);
                (ticks, step)
            }
            ScaleSpec::Band(s) => {
                let ticks: Vec<f64> = (0..s.count).map(|i| i as f64).collect();
                (ticks, 1.0)
            }
        }
    }

    fn continuous_domain(&self) -> Option<(f64, f64)> {
        match self.scale {
            ScaleSpec::Linear(s) => Some(s.resolved_domain(self.tick_count)),
            ScaleSpec::Band(_) => None,
        }
    }

    /// Measure the thickness this axis needs along its normal direction.
    ///
    /// This is intended for a measure/arrange layout pass.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let tick_extent = if self.ticks {
            self.tick_size.abs()
        } else {
            0.0
        };
        let label_gap = self.tick_padding.max(0.0) + self.label_padding.max(0.0);
        let (ticks, step) = self.tick_values();

        let theta = self.label_angle.to_radians();
        let sin = theta.sin().abs();
        let cos = theta.cos().abs();

        let mut max_label_extent = 0.0_f64;
        if self.labels {
            for v in ticks {
                let label = self.format_tick(v, step);
                let (w, h) = measurer.measure(&label, self.style.label_font_size);
                let extent = match self.orient {
                    // Rotated width contributes to height below the plot.
                    AxisOrient::Bottom => sin * w + cos * h,
                    AxisOrient::Left => cos * w + sin * h,
                };
                max_label_extent = max_label_extent.max(extent);
            }
        }

        let label_thickness = if self.labels {
            label_gap + max_label_extent
        } else {
            0.0
        };
        let mut out = tick_extent + label_thickness;
        if let Some(title) = &self.title {
            let extent = match self.orient {
                AxisOrient::Bottom => {
                    let (_w, h) = measurer.measure(title, self.style.title_font_size);
                    h
                }
                // With a rotated title, height maps to width.
                AxisOrient::Left => self.style.title_font_size,
            };
            out += self.title_offset.max(0.0) + extent;
        }
        out
    }

    /// Generate axis marks for the given plot rectangle and arranged axis rectangle.
    ///
    /// `axis_rect` should be the reserved region for this axis, adjacent to `plot`.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        match self.orient {
            AxisOrient::Left => self.marks_left(plot, axis_rect),
            AxisOrient::Bottom => self.marks_bottom(plot, axis_rect),
        }
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    fn tick_position(&self, plot: Rect, v: f64) -> f64 {
        match self.scale {
            ScaleSpec::Linear(s) => s
                .instantiate_resolved(self.scale_range(plot), self.tick_count)
                .map(v),
            ScaleSpec::Band(s) => {
                let band = s.instantiate(self.scale_range(plot));
                band.x(discrete_index(v)) + 0.5 * band.band_width()
            }
        }
    }

    fn marks_bottom(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let y = plot.y1;
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = (self.tick_padding + self.label_padding).max(0.0);
        let (ticks, step) = self.tick_values();

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            let mut ticks_in_plot: Vec<f64> = ticks
                .iter()
                .copied()
                .filter(|v| {
                    let x = self.tick_position(plot, *v);
                    x >= plot.x0 - 1.0e-9 && x <= plot.x1 + 1.0e-9
                })
                .collect();
            // Ensure the plot boundaries (domain endpoints) get a grid line
            // even if the tick generator doesn't include them.
            if let Some((d0, d1)) = self.continuous_domain() {
                push_if_missing(&mut ticks_in_plot, d0);
                push_if_missing(&mut ticks_in_plot, d1);
            }
            for (i, v) in ticks_in_plot.iter().copied().enumerate() {
                let x = self.tick_position(plot, v);
                out.push(line_mark(
                    self.id_base.wrapping_sub(5_000) + i as u64,
                    Point::new(x, plot.y0),
                    Point::new(x, plot.y1),
                    &grid.stroke,
                    z_order::GRID_LINES,
                ));
            }
        }

        if self.show_domain {
            out.push(line_mark(
                self.id_base,
                Point::new(plot.x0, y),
                Point::new(plot.x1, y),
                &self.style.rule,
                z_order::AXIS_RULES,
            ));
        }

        let ticks_len = ticks.len();
        for (i, v) in ticks.iter().copied().enumerate() {
            let x = self.tick_position(plot, v);
            if x < plot.x0 - 1.0e-9 || x > plot.x1 + 1.0e-9 {
                continue;
            }
            let label = self.format_tick(v, step);

            if self.ticks {
                out.push(line_mark(
                    self.id_base + 1 + i as u64,
                    Point::new(x, y),
                    Point::new(x, y + tick_size),
                    &self.style.rule,
                    z_order::AXIS_RULES,
                ));
            }

            if self.labels {
                let (anchor, x) = if i == 0 {
                    (TextAnchor::Start, x.clamp(plot.x0, plot.x1))
                } else if i + 1 == ticks_len {
                    (TextAnchor::End, x.clamp(plot.x0, plot.x1))
                } else {
                    (TextAnchor::Middle, x)
                };

                // Rotation happens around the label's `(x, y)` origin, so
                // changing the anchor changes the rotation origin relative
                // to the label's center and can shift first/last labels
                // vertically (the x-offset rotates into y). Compensate with
                // an estimated label width so the visual midline stays
                // aligned.
                let y_label = {
                    let mut y_label = y + tick_extent + label_gap;
                    if self.label_angle != 0.0 {
                        let theta = self.label_angle.to_radians();
                        let sin = theta.sin();
                        if sin != 0.0 {
                            let (w, _) =
                                HeuristicTextMeasurer.measure(&label, self.style.label_font_size);
                            let dy = 0.5 * w * sin;
                            match anchor {
                                TextAnchor::Start => y_label -= dy,
                                TextAnchor::End => y_label += dy,
                                TextAnchor::Middle => {}
                            }
                        }
                    }
                    y_label
                };
                out.push(Mark::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    z_order::AXIS_LABELS,
                    MarkShape::Text(TextMark {
                        pos: Point::new(x, y_label),
                        text: label,
                        font_size: self.style.label_font_size,
                        angle: self.label_angle,
                        anchor,
                        baseline: TextBaseline::Hanging,
                        fill: self.style.label_fill.clone(),
                    }),
                ));
            }
        }

        if let Some(title) = &self.title {
            let x = (plot.x0 + plot.x1) * 0.5;
            // Place the title in the "title strip" at the outer edge of
            // `axis_rect`; see `marks_left` for rationale.
            let y = axis_rect.y1 - self.style.title_font_size;
            out.push(Mark::new(
                MarkId::from_raw(self.id_base + 9000),
                z_order::AXIS_TITLES,
                MarkShape::Text(TextMark {
                    pos: Point::new(x, y),
                    text: title.clone(),
                    font_size: self.style.title_font_size,
                    angle: 0.0,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                    fill: self.style.title_fill.clone(),
                }),
            ));
        }

        out
    }

    fn marks_left(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let x = plot.x0;
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = (self.tick_padding + self.label_padding).max(0.0);
        let (ticks, step) = self.tick_values();

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            // Clamp grid lines to the plot bounds. Ticks may be "niced"
            // beyond the domain, but grid lines must not render outside the
            // plot.
            let mut ticks_in_plot: Vec<f64> = ticks
                .iter()
                .copied()
                .filter(|v| {
                    let y = self.tick_position(plot, *v);
                    y >= plot.y0 - 1.0e-9 && y <= plot.y1 + 1.0e-9
                })
                .collect();
            if let Some((d0, d1)) = self.continuous_domain() {
                push_if_missing(&mut ticks_in_plot, d0);
                push_if_missing(&mut ticks_in_plot, d1);
            }
            for (i, v) in ticks_in_plot.iter().copied().enumerate() {
                let y = self.tick_position(plot, v);
                out.push(line_mark(
                    self.id_base.wrapping_sub(5_000) + i as u64,
                    Point::new(plot.x0, y),
                    Point::new(plot.x1, y),
                    &grid.stroke,
                    z_order::GRID_LINES,
                ));
            }
        }

        if self.show_domain {
            out.push(line_mark(
                self.id_base,
                Point::new(x, plot.y0),
                Point::new(x, plot.y1),
                &self.style.rule,
                z_order::AXIS_RULES,
            ));
        }

        for (i, v) in ticks.into_iter().enumerate() {
            let y = self.tick_position(plot, v);
            if y < plot.y0 - 1.0e-9 || y > plot.y1 + 1.0e-9 {
                continue;
            }
            let label = self.format_tick(v, step);

            if self.ticks {
                out.push(line_mark(
                    self.id_base + 1 + i as u64,
                    Point::new(x, y),
                    Point::new(x - tick_size, y),
                    &self.style.rule,
                    z_order::AXIS_RULES,
                ));
            }

            if self.labels {
                out.push(Mark::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    z_order::AXIS_LABELS,
                    MarkShape::Text(TextMark {
                        pos: Point::new(x - tick_extent - label_gap, y),
                        text: label,
                        font_size: self.style.label_font_size,
                        angle: self.label_angle,
                        anchor: TextAnchor::End,
                        baseline: TextBaseline::Middle,
                        fill: self.style.label_fill.clone(),
                    }),
                ));
            }
        }

        if let Some(title) = &self.title {
            // Place the rotated title in the "title strip" at the outer edge
            // of `axis_rect`.
            //
            // `axis_rect` is laid out using `AxisSpec::measure`, which
            // includes (in order): tick extent + label extent +
            // `title_offset` + title thickness. Placing the title at the
            // axis_rect edge therefore respects `title_offset` and avoids
            // overlapping tick labels.
            let x = axis_rect.x0 + 0.5 * self.style.title_font_size;
            let y = (plot.y0 + plot.y1) * 0.5;
            out.push(Mark::new(
                MarkId::from_raw(self.id_base + 9000),
                z_order::AXIS_TITLES,
                MarkShape::Text(TextMark {
                    pos: Point::new(x, y),
                    text: title.clone(),
                    font_size: self.style.title_font_size,
                    angle: -90.0,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Alphabetic,
                    fill: self.style.title_fill.clone(),
                }),
            ));
        }

        out
    }
}

fn line_mark(id: u64, p0: Point, p1: Point, stroke: &StrokeStyle, z_index: i32) -> Mark {
    Mark::new(
        MarkId::from_raw(id),
        z_index,
        MarkShape::Line(LineMark {
            p0,
            p1,
            stroke: stroke.clone(),
            dash: None,
        }),
    )
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn discrete_index(v: f64) -> usize {
    if !v.is_finite() || v < 0.0 {
        return 0;
    }
    let v = v.round().min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to a small non-negative range"
    )]
    {
        v as usize
    }
}

fn push_if_missing(ticks: &mut Vec<f64>, v: f64) {
    if !v.is_finite() {
        return;
    }
    let eps = 1.0e-9;
    if ticks.iter().any(|t| (*t - v).abs() <= eps) {
        return;
    }
    ticks.push(v);
}
