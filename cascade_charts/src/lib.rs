// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waterfall/bridge chart building blocks.
//!
//! This crate turns an ordered sequence of named signed values (with one row
//! designated as the running total) into drawable marks for a waterfall
//! chart: floating bars at cumulative heights, dashed connectors between
//! adjacent bars, and currency-style value labels.
//!
//! - **Scales** map data values into screen coordinates.
//! - **Column bands** place categories along the horizontal axis.
//! - The **waterfall pass** emits one [`RenderedPiece`] per input row.
//! - **Guides** (a value axis, category labels) are generated as marks.
//! - A [`FrameSpec`] composes all of the above from one declarative
//!   configuration object.
//!
//! The host is responsible for mounting the marks into its drawing surface
//! (SVG, canvas, a scene graph) and for hit-testing. Text shaping and layout
//! are out of scope; text marks store unshaped strings.

mod accessor;
mod axis;
mod column;
mod error;
mod format;
mod frame;
mod layout;
mod mark;
mod measure;
mod scale;
mod waterfall;
pub mod z_order;

#[cfg(test)]
mod waterfall_tests;

pub use accessor::{AccessorSpec, FieldLookup};
pub use axis::{AxisOrient, AxisSpec, AxisStyle, GridStyle};
pub use column::{ColumnBands, ColumnGeometry};
pub use error::ChartError;
pub use format::{currency_label, format_tick_with_step};
pub use frame::FrameSpec;
pub use layout::{FrameLayout, Margin, Size};
pub use mark::{
    LineMark, Mark, MarkId, MarkShape, RectMark, StrokeStyle, TextAnchor, TextBaseline, TextMark,
};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec, ScaleSpec};
pub use waterfall::{
    CategoryRecord, FillRule, RenderedPiece, WaterfallMarkSpec, WaterfallPalette,
};
