// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative frame configuration.
//!
//! [`FrameSpec`] is the outer configuration object a host hands over per
//! render: canvas size, margins, the value extent, the inter-column gap, and
//! guide options. `render` wires everything together: arrange the layout,
//! band the columns, instantiate the value scale, run the waterfall pass,
//! and generate guide marks, all in view-space coordinates.

use std::sync::Arc;

use kurbo::{Point, Rect, Vec2};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::AxisSpec;
use crate::column::ColumnBands;
use crate::error::ChartError;
use crate::layout::{FrameLayout, Margin, Size};
use crate::mark::{Mark, MarkId, MarkShape, RectMark, TextAnchor, TextBaseline, TextMark};
use crate::scale::{ScaleLinear, ScaleLinearSpec};
use crate::waterfall::{CategoryRecord, RenderedPiece, WaterfallMarkSpec};
use crate::z_order;

// Deterministic id offsets for frame-owned marks, clear of the per-row ids
// the waterfall pass derives from the same base.
const AXIS_ID_OFFSET: u64 = 10_000;
const CATEGORY_LABEL_ID_OFFSET: u64 = 20_000;

/// A declarative waterfall frame: size, margins, extent, and guides.
#[derive(Clone)]
pub struct FrameSpec {
    /// Stable-id base shared by the series and the frame guides.
    pub id_base: u64,
    /// Outer canvas size.
    pub size: Size,
    /// Explicit margins around the plot.
    pub margin: Margin,
    /// Value domain for the vertical scale.
    pub value_extent: (f64, f64),
    /// Pixel gap between (and around) category columns; also the connector
    /// reach.
    pub gap: f64,
    /// The waterfall series configuration.
    pub waterfall: WaterfallMarkSpec,
    /// Whether to draw the left value axis.
    pub value_axis: bool,
    /// Approximate tick count for the value axis.
    pub tick_count: usize,
    /// Optional tick label formatter for the value axis.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
    /// Whether to draw category labels below the plot.
    pub category_labels: bool,
    /// Category label rotation in degrees.
    pub category_label_angle: f64,
    /// Category label font size.
    pub category_label_font_size: f64,
    /// Vertical padding between the plot bottom and the category labels.
    pub category_label_padding: f64,
    /// Category label fill paint.
    pub category_label_fill: Brush,
    /// Optional plot background fill.
    pub background: Option<Brush>,
}

impl core::fmt::Debug for FrameSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameSpec")
            .field("id_base", &self.id_base)
            .field("size", &self.size)
            .field("margin", &self.margin)
            .field("value_extent", &self.value_extent)
            .field("gap", &self.gap)
            .field("waterfall", &self.waterfall)
            .field("value_axis", &self.value_axis)
            .field("tick_count", &self.tick_count)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("category_labels", &self.category_labels)
            .field("category_label_angle", &self.category_label_angle)
            .field("category_label_font_size", &self.category_label_font_size)
            .field("category_label_padding", &self.category_label_padding)
            .field("category_label_fill", &self.category_label_fill)
            .field("background", &self.background)
            .finish()
    }
}

impl FrameSpec {
    /// Creates a frame spec with default guides: a left value axis, rotated
    /// 45-degree category labels, no background.
    pub fn new(
        id_base: u64,
        size: Size,
        margin: Margin,
        value_extent: (f64, f64),
        gap: f64,
    ) -> Self {
        Self {
            id_base,
            size,
            margin,
            value_extent,
            gap,
            waterfall: WaterfallMarkSpec::new(id_base, gap),
            value_axis: true,
            tick_count: 10,
            tick_formatter: None,
            category_labels: true,
            category_label_angle: 45.0,
            category_label_font_size: 10.0,
            category_label_padding: 12.0,
            category_label_fill: Brush::Solid(css::BLACK),
            background: None,
        }
    }

    /// Sets the waterfall series configuration.
    pub fn with_waterfall(mut self, waterfall: WaterfallMarkSpec) -> Self {
        self.waterfall = waterfall;
        self
    }

    /// Enables or disables the left value axis.
    pub fn with_value_axis(mut self, value_axis: bool) -> Self {
        self.value_axis = value_axis;
        self
    }

    /// Sets the approximate tick count for the value axis.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets a custom tick label formatter for the value axis.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Enables or disables category labels.
    pub fn with_category_labels(mut self, category_labels: bool) -> Self {
        self.category_labels = category_labels;
        self
    }

    /// Sets the category label rotation angle in degrees.
    pub fn with_category_label_angle(mut self, angle_degrees: f64) -> Self {
        self.category_label_angle = angle_degrees;
        self
    }

    /// Sets the category label fill paint.
    pub fn with_category_label_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.category_label_fill = fill.into();
        self
    }

    /// Sets the plot background fill.
    pub fn with_background(mut self, background: impl Into<Brush>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Renders the frame for the given rows.
    ///
    /// Returns the arranged layout, the waterfall pieces (translated into
    /// view space), and the guide marks (background, axis, category labels).
    /// Piece marks stay attached to their pieces so hosts keep per-row
    /// identity for hit-testing; guide marks come back as one flat list.
    pub fn render(
        &self,
        rows: &[CategoryRecord],
    ) -> Result<(FrameLayout, Vec<RenderedPiece>, Vec<Mark>), ChartError> {
        let layout = FrameLayout::arrange(self.size, self.margin);
        let plot = layout.plot;
        let adjusted = layout.adjusted_size();

        let category_of = self.waterfall.category_accessor.resolve()?;
        let names: Vec<String> = rows.iter().map(|r| category_of(r)).collect();
        let columns = ColumnBands::with_gap(&names, (0.0, adjusted.width), self.gap);
        let scale = ScaleLinear::new(self.value_extent, (0.0, adjusted.height));

        let pieces = self.waterfall.pieces(rows, &columns, scale, &layout)?;
        let offset = Vec2::new(plot.x0, plot.y0);
        let pieces: Vec<RenderedPiece> =
            pieces.into_iter().map(|p| p.translated(offset)).collect();

        let mut marks = Vec::new();

        if let Some(background) = &self.background {
            marks.push(Mark::new(
                MarkId::from_raw(self.id_base.wrapping_sub(1)),
                z_order::PLOT_BACKGROUND,
                MarkShape::Rect(RectMark {
                    rect: plot,
                    fill: background.clone(),
                    stroke: None,
                }),
            ));
        }

        if self.value_axis {
            let mut axis = AxisSpec::left(
                self.id_base + AXIS_ID_OFFSET,
                ScaleLinearSpec::new(self.value_extent),
            )
            .with_tick_count(self.tick_count);
            axis.tick_formatter = self.tick_formatter.clone();
            let axis_rect = Rect::new(layout.view.x0, plot.y0, plot.x0, plot.y1);
            marks.extend(axis.marks(plot, axis_rect));
        }

        if self.category_labels {
            // One label per column, rotated around the column center, the
            // way the host's ordinal label hook renders them.
            let anchor = if self.category_label_angle == 0.0 {
                TextAnchor::Middle
            } else {
                TextAnchor::Start
            };
            for (i, name) in names.iter().enumerate() {
                let Some(column) = columns.get(name) else {
                    continue;
                };
                marks.push(Mark::new(
                    MarkId::from_raw(self.id_base + CATEGORY_LABEL_ID_OFFSET + i as u64),
                    z_order::AXIS_LABELS,
                    MarkShape::Text(TextMark {
                        pos: Point::new(
                            plot.x0 + column.x + 0.5 * column.width,
                            plot.y1 + self.category_label_padding,
                        ),
                        text: name.clone(),
                        font_size: self.category_label_font_size,
                        angle: self.category_label_angle,
                        anchor,
                        baseline: TextBaseline::Hanging,
                        fill: self.category_label_fill.clone(),
                    }),
                ));
            }
        }

        Ok((layout, pieces, marks))
    }
}
