// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waterfall/bridge layout.
//!
//! A single forward pass turns an ordered sequence of named signed values
//! into floating bars: each bar starts where the previous one ended, and the
//! row named by the total key drops back to the zero baseline. Per row the
//! pass emits a rectangle, a dashed connector reaching toward the next
//! column (non-total rows only), and a value label.

use std::sync::Arc;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::accessor::{AccessorSpec, FieldLookup};
use crate::column::ColumnBands;
use crate::error::ChartError;
use crate::format::currency_label;
use crate::layout::FrameLayout;
use crate::mark::{
    LineMark, Mark, MarkId, MarkShape, RectMark, StrokeStyle, TextAnchor, TextBaseline, TextMark,
};
use crate::scale::ScaleLinear;
use crate::z_order;

/// One input row: a category name and a signed value.
///
/// The value is absent only for the row designated as the running total
/// (sentinel by name, not by type). Row order is significant: values
/// accumulate in sequence order.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRecord {
    /// Category name; also the column lookup key.
    pub name: String,
    /// Signed value, absent for the total row.
    pub value: Option<f64>,
}

impl CategoryRecord {
    /// Creates a record with a value.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }

    /// Creates a total record (no stored value).
    pub fn total(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

impl FieldLookup<Option<f64>> for CategoryRecord {
    fn field(name: &str) -> Option<fn(&Self) -> Option<f64>> {
        match name {
            "value" => Some(|r| r.value),
            _ => None,
        }
    }
}

impl FieldLookup<String> for CategoryRecord {
    fn field(name: &str) -> Option<fn(&Self) -> String> {
        match name {
            "name" => Some(|r| r.name.clone()),
            _ => None,
        }
    }
}

/// Bar fill brushes keyed by row kind.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterfallPalette {
    /// Fill for the total row.
    pub total: Brush,
    /// Fill for rows with positive values.
    pub positive: Brush,
    /// Fill for rows with non-positive values.
    pub negative: Brush,
}

impl Default for WaterfallPalette {
    fn default() -> Self {
        Self {
            total: Brush::Solid(Color::from_rgb8(0x00, 0xa2, 0xce)),
            positive: Brush::Solid(Color::from_rgb8(0x4d, 0x43, 0x0c)),
            negative: Brush::Solid(Color::from_rgb8(0xb3, 0x33, 0x1d)),
        }
    }
}

/// How bar fills are chosen: a fixed palette, or a per-row callback.
#[derive(Clone)]
pub enum FillRule {
    /// Total/positive/negative brushes.
    Palette(WaterfallPalette),
    /// A callback receiving the record and its effective value.
    With(Arc<dyn Fn(&CategoryRecord, f64) -> Brush>),
}

impl core::fmt::Debug for FillRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Palette(p) => f.debug_tuple("Palette").field(p).finish(),
            Self::With(_) => f.debug_tuple("With").field(&"<fn>").finish(),
        }
    }
}

/// Output for one input row: its key, source record, an anchor point, and
/// the drawable marks (bar, optional connector, label).
///
/// Pieces come back in input order, one per row, with plot-local
/// coordinates. The anchor is the horizontal bar center at the bar's
/// top-left y.
#[derive(Clone, Debug)]
pub struct RenderedPiece {
    /// The category name this piece was generated for.
    pub key: String,
    /// The source record.
    pub record: CategoryRecord,
    /// Anchor point for hit-testing and tooltips.
    pub anchor: Point,
    /// Drawable marks, in paint order within the piece.
    pub marks: SmallVec<[Mark; 3]>,
}

impl RenderedPiece {
    /// Returns this piece with its anchor and marks moved by `offset`.
    pub fn translated(mut self, offset: kurbo::Vec2) -> Self {
        self.anchor += offset;
        self.marks = self
            .marks
            .into_iter()
            .map(|m| m.translated(offset))
            .collect();
        self
    }
}

/// Waterfall series styling and identity.
#[derive(Clone, Debug)]
pub struct WaterfallMarkSpec {
    /// Stable-id base; row `i` uses ids `id_base + 3*i ..= id_base + 3*i + 2`
    /// (bar, connector, label).
    pub id_base: u64,
    /// Name of the row treated as the running total.
    pub total_key: String,
    /// How a row's value is read (field name or callback).
    pub value_accessor: AccessorSpec<CategoryRecord, Option<f64>>,
    /// How a row's category name is read; the result is also the column
    /// lookup key and the total-key comparand.
    pub category_accessor: AccessorSpec<CategoryRecord, String>,
    /// Bar fill rule.
    pub fill: FillRule,
    /// Connector stroke.
    pub connector: StrokeStyle,
    /// Connector `(on, off)` dash pattern.
    pub connector_dash: (f64, f64),
    /// Horizontal connector reach past the bar's right edge; normally the
    /// inter-column gap, so the connector meets the next bar.
    pub gap: f64,
    /// Value label font size.
    pub label_font_size: f64,
    /// Value label fill.
    pub label_fill: Brush,
    /// Label y-offset from the connector line for total/positive rows.
    pub label_offset_positive: f64,
    /// Label y-offset from the connector line for negative rows.
    pub label_offset_negative: f64,
}

impl WaterfallMarkSpec {
    /// Creates a waterfall spec with default styling.
    ///
    /// Defaults: total key `"Total"`, default palette, gray dashed `(5, 5)`
    /// connector, white 10px labels offset `+15`/`-5` from the connector.
    pub fn new(id_base: u64, gap: f64) -> Self {
        Self {
            id_base,
            total_key: String::from("Total"),
            value_accessor: AccessorSpec::Field("value"),
            category_accessor: AccessorSpec::Field("name"),
            fill: FillRule::Palette(WaterfallPalette::default()),
            connector: StrokeStyle::solid(css::GRAY, 1.0),
            connector_dash: (5.0, 5.0),
            gap,
            label_font_size: 10.0,
            label_fill: Brush::Solid(css::WHITE),
            label_offset_positive: 15.0,
            label_offset_negative: -5.0,
        }
    }

    /// Sets the name of the total row.
    pub fn with_total_key(mut self, total_key: impl Into<String>) -> Self {
        self.total_key = total_key.into();
        self
    }

    /// Sets how a row's value is read.
    pub fn with_value_accessor(
        mut self,
        accessor: AccessorSpec<CategoryRecord, Option<f64>>,
    ) -> Self {
        self.value_accessor = accessor;
        self
    }

    /// Sets how a row's category name is read.
    pub fn with_category_accessor(
        mut self,
        accessor: AccessorSpec<CategoryRecord, String>,
    ) -> Self {
        self.category_accessor = accessor;
        self
    }

    /// Sets a fixed fill palette.
    pub fn with_palette(mut self, palette: WaterfallPalette) -> Self {
        self.fill = FillRule::Palette(palette);
        self
    }

    /// Sets a per-row fill callback receiving the record and its effective
    /// value.
    pub fn with_fill_rule(
        mut self,
        f: impl Fn(&CategoryRecord, f64) -> Brush + 'static,
    ) -> Self {
        self.fill = FillRule::With(Arc::new(f));
        self
    }

    /// Sets the connector stroke.
    pub fn with_connector(mut self, connector: StrokeStyle) -> Self {
        self.connector = connector;
        self
    }

    /// Sets the connector dash pattern.
    pub fn with_connector_dash(mut self, on: f64, off: f64) -> Self {
        self.connector_dash = (on, off);
        self
    }

    /// Sets the label font size.
    pub fn with_label_font_size(mut self, font_size: f64) -> Self {
        self.label_font_size = font_size;
        self
    }

    /// Sets the label fill paint.
    pub fn with_label_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.label_fill = fill.into();
        self
    }

    /// Sets the label y-offsets for total/positive and negative rows.
    pub fn with_label_offsets(mut self, positive: f64, negative: f64) -> Self {
        self.label_offset_positive = positive;
        self.label_offset_negative = negative;
        self
    }

    /// Returns the per-row effective values.
    ///
    /// A row named by the total key contributes the negation of the
    /// cumulative sum at its position; every other row contributes its
    /// accessed value (absent values become NaN). Over a sequence with one
    /// trailing total row, the effective values sum to zero. Fails with
    /// [`ChartError::UnknownField`] when a field accessor does not resolve.
    pub fn effective_values(&self, rows: &[CategoryRecord]) -> Result<Vec<f64>, ChartError> {
        let value_of = self.value_accessor.resolve()?;
        let category_of = self.category_accessor.resolve()?;
        let mut cumulative = 0.0;
        Ok(rows
            .iter()
            .map(|row| {
                if category_of(row) == self.total_key {
                    -cumulative
                } else {
                    let value = value_of(row).unwrap_or(f64::NAN);
                    cumulative += value;
                    value
                }
            })
            .collect())
    }

    /// Runs the layout pass: one [`RenderedPiece`] per row, in input order,
    /// in plot-local coordinates.
    ///
    /// Values and category names are read through the configured accessors,
    /// resolved once before the loop. `scale` maps values to vertical pixels
    /// over `(0, plot height)`; the pass flips it so the zero baseline sits
    /// at the plot bottom and bars float at cumulative heights. A row whose
    /// accessed name has no entry in `columns` fails the whole pass with
    /// [`ChartError::UnknownColumn`].
    ///
    /// Rows named by the total key each independently negate the cumulative
    /// sum at their position. Multiple total rows, or a total row that is
    /// not last, are not validated; the output is well-defined but probably
    /// not what the chart author meant. Absent values on non-total rows
    /// become NaN and flow through the scale unvalidated.
    pub fn pieces(
        &self,
        rows: &[CategoryRecord],
        columns: &ColumnBands,
        scale: ScaleLinear,
        layout: &FrameLayout,
    ) -> Result<Vec<RenderedPiece>, ChartError> {
        let value_of = self.value_accessor.resolve()?;
        let category_of = self.category_accessor.resolve()?;

        let adjusted = layout.adjusted_size();
        let margin_top = layout.plot.y0;
        let zero_y = scale.map(0.0);

        let mut cumulative = 0.0;
        let mut y_offset = 0.0;
        let mut out = Vec::with_capacity(rows.len());

        for (i, record) in rows.iter().enumerate() {
            let name = category_of(record);
            let is_total = name == self.total_key;
            let effective = if is_total {
                -cumulative
            } else {
                let value = value_of(record).unwrap_or(f64::NAN);
                cumulative += value;
                value
            };

            let column = columns
                .get(&name)
                .ok_or_else(|| ChartError::UnknownColumn { name: name.clone() })?;

            let bar_h = scale.map(effective) - zero_y;
            let mut y = adjusted.height - margin_top - bar_h;
            if bar_h < 0.0 {
                // Negative-height bars draw downward from the baseline.
                y = adjusted.height - margin_top;
            }
            y += margin_top + y_offset;

            let id = self.id_base + 3 * i as u64;
            let mut marks: SmallVec<[Mark; 3]> = SmallVec::new();

            marks.push(Mark::new(
                MarkId::from_raw(id),
                z_order::SERIES_FILL,
                MarkShape::Rect(RectMark {
                    rect: Rect::new(column.x, y, column.x + column.width, y + bar_h.abs()),
                    fill: self.fill_for(record, effective, is_total),
                    stroke: None,
                }),
            ));

            // The "outer" edge of the bar: top for total/positive rows,
            // bottom for negative ones.
            let line_y = if is_total || effective > 0.0 {
                y
            } else {
                y + bar_h.abs()
            };

            if !is_total {
                marks.push(Mark::new(
                    MarkId::from_raw(id + 1),
                    z_order::SERIES_STROKE,
                    MarkShape::Line(LineMark {
                        p0: Point::new(column.x + column.width, line_y),
                        p1: Point::new(column.x + column.width + self.gap, line_y),
                        stroke: self.connector.clone(),
                        dash: Some(self.connector_dash),
                    }),
                ));
            }

            let text_offset = if is_total || effective > 0.0 {
                self.label_offset_positive
            } else {
                self.label_offset_negative
            };
            let shown = if is_total { effective.abs() } else { effective };
            marks.push(Mark::new(
                MarkId::from_raw(id + 2),
                z_order::VALUE_LABELS,
                MarkShape::Text(TextMark {
                    pos: Point::new(column.x + 0.5 * column.width, line_y + text_offset),
                    text: currency_label(shown),
                    font_size: self.label_font_size,
                    angle: 0.0,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Alphabetic,
                    fill: self.label_fill.clone(),
                }),
            ));

            out.push(RenderedPiece {
                key: name,
                record: record.clone(),
                anchor: Point::new(column.x + 0.5 * column.width, y),
                marks,
            });

            y_offset -= bar_h;
        }

        Ok(out)
    }

    fn fill_for(&self, record: &CategoryRecord, effective: f64, is_total: bool) -> Brush {
        match &self.fill {
            FillRule::Palette(palette) => {
                if is_total {
                    palette.total.clone()
                } else if effective > 0.0 {
                    palette.positive.clone()
                } else {
                    palette.negative.clone()
                }
            }
            FillRule::With(f) => f(record, effective),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_fill_selects_by_row_kind() {
        let spec = WaterfallMarkSpec::new(0, 10.0);
        let palette = WaterfallPalette::default();

        let gain = CategoryRecord::new("Gain", 5.0);
        assert_eq!(spec.fill_for(&gain, 5.0, false), palette.positive);

        let loss = CategoryRecord::new("Loss", -5.0);
        assert_eq!(spec.fill_for(&loss, -5.0, false), palette.negative);

        let total = CategoryRecord::total("Total");
        assert_eq!(spec.fill_for(&total, 0.0, true), palette.total);
    }

    #[test]
    fn fill_callback_overrides_the_palette() {
        let spec = WaterfallMarkSpec::new(0, 10.0)
            .with_fill_rule(|_record, effective| {
                if effective >= 0.0 {
                    Brush::Solid(css::GREEN)
                } else {
                    Brush::Solid(css::RED)
                }
            });
        let row = CategoryRecord::new("x", 1.0);
        assert_eq!(spec.fill_for(&row, 1.0, false), Brush::Solid(css::GREEN));
        assert_eq!(spec.fill_for(&row, -1.0, false), Brush::Solid(css::RED));
    }

    #[test]
    fn effective_values_negate_the_running_sum_at_each_total() {
        let spec = WaterfallMarkSpec::new(0, 10.0);
        let rows = [
            CategoryRecord::new("a", 10.0),
            CategoryRecord::new("b", -4.0),
            CategoryRecord::total("Total"),
        ];
        let values = spec.effective_values(&rows).expect("default accessors resolve");
        assert_eq!(values, vec![10.0, -4.0, -6.0]);
        assert!(values.iter().sum::<f64>().abs() < 1e-9);
    }

    #[test]
    fn custom_total_key_is_honored() {
        let spec = WaterfallMarkSpec::new(0, 10.0).with_total_key("Net");
        let rows = [
            CategoryRecord::new("a", 3.0),
            CategoryRecord::total("Net"),
        ];
        let values = spec.effective_values(&rows).expect("default accessors resolve");
        assert_eq!(values, vec![3.0, -3.0]);
    }

    #[test]
    fn absent_value_on_a_non_total_row_flows_through_as_nan() {
        let spec = WaterfallMarkSpec::new(0, 10.0);
        let rows = [CategoryRecord {
            name: String::from("Broken"),
            value: None,
        }];
        let values = spec.effective_values(&rows).expect("default accessors resolve");
        assert!(values[0].is_nan());
    }

    #[test]
    fn unresolvable_field_accessor_fails_the_pass() {
        let spec = WaterfallMarkSpec::new(0, 10.0)
            .with_value_accessor(AccessorSpec::Field("amount"));
        let rows = [CategoryRecord::new("a", 1.0)];
        let err = spec
            .effective_values(&rows)
            .expect_err("no such field on the record type");
        assert_eq!(err, ChartError::UnknownField { field: "amount" });
    }
}
