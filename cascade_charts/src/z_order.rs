// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suggested z-order conventions for generated marks.
//!
//! Marks carry an explicit `z_index` for render ordering. Generators set
//! z-indexes consistently so callers don't have to hand-tune paint order.
//!
//! These values are intentionally coarse. Renderers should sort by
//! `(z_index, MarkId)` for a deterministic tie-break.

/// Plot background/frame fills.
pub const PLOT_BACKGROUND: i32 = -100;
/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled series marks (bars).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (connector lines).
pub const SERIES_STROKE: i32 = 10;
/// Per-piece value labels drawn above their bars.
pub const VALUE_LABELS: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels and category labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;
