// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordinal column banding.
//!
//! The waterfall pass positions bars by category name, not by index, so the
//! name-to-slot mapping is its own small structure. Two build modes exist:
//! one derived from a [`ScaleBand`] (proportional padding), and one with a
//! fixed pixel gap between columns (the inter-column padding model the
//! connector lines reach across).

use hashbrown::HashMap;

use crate::scale::ScaleBand;

/// Horizontal placement of one category column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnGeometry {
    /// Left edge in plot-local coordinates.
    pub x: f64,
    /// Column width.
    pub width: f64,
}

/// A mapping from category name to column geometry.
///
/// One slot per distinct name; inserting a name twice keeps the last
/// geometry.
#[derive(Clone, Debug, Default)]
pub struct ColumnBands {
    map: HashMap<String, ColumnGeometry>,
}

impl ColumnBands {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Assigns one band slot per name, in order, from a band scale.
    pub fn from_band<S: AsRef<str>>(names: &[S], band: ScaleBand) -> Self {
        let width = band.band_width();
        let mut out = Self::new();
        for (i, name) in names.iter().enumerate() {
            out.insert(name.as_ref(), ColumnGeometry { x: band.x(i), width });
        }
        out
    }

    /// Assigns columns over `range` with a fixed pixel `gap` between and
    /// around them.
    ///
    /// With `n` names, each column gets
    /// `width = (span - gap * (n + 1)) / n`, so a connector drawn from a
    /// column's right edge with reach `gap` lands exactly on the next
    /// column's left edge.
    pub fn with_gap<S: AsRef<str>>(names: &[S], range: (f64, f64), gap: f64) -> Self {
        let mut out = Self::new();
        let n = names.len();
        if n == 0 {
            return out;
        }
        let (r0, r1) = range;
        let span = (r1 - r0).abs();
        let gap = gap.max(0.0);
        let width = ((span - gap * (n as f64 + 1.0)) / n as f64).max(0.0);
        let start = r0.min(r1);
        for (i, name) in names.iter().enumerate() {
            let x = start + gap + i as f64 * (width + gap);
            out.insert(name.as_ref(), ColumnGeometry { x, width });
        }
        out
    }

    /// Inserts (or replaces) the geometry for a name.
    pub fn insert(&mut self, name: impl Into<String>, geometry: ColumnGeometry) {
        self.map.insert(name.into(), geometry);
    }

    /// Looks up the geometry for a name.
    pub fn get(&self, name: &str) -> Option<ColumnGeometry> {
        self.map.get(name).copied()
    }

    /// Returns the number of distinct names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` when no names are assigned.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_gap_spaces_columns_by_exactly_the_gap() {
        let names = ["a", "b", "c", "d"];
        let bands = ColumnBands::with_gap(&names, (0.0, 100.0), 10.0);
        assert_eq!(bands.len(), 4);

        // width = (100 - 10*5) / 4
        let a = bands.get("a").expect("missing a");
        assert!((a.width - 12.5).abs() < 1e-9);
        assert!((a.x - 10.0).abs() < 1e-9);

        // Right edge + gap lands on the next column's left edge.
        let b = bands.get("b").expect("missing b");
        assert!((a.x + a.width + 10.0 - b.x).abs() < 1e-9);

        // Last column ends one gap short of the range end.
        let d = bands.get("d").expect("missing d");
        assert!((d.x + d.width + 10.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn from_band_uses_band_slots_in_name_order() {
        let names = ["x", "y", "z"];
        let band = ScaleBand::new((0.0, 90.0), 3).with_padding(0.0, 0.0);
        let bands = ColumnBands::from_band(&names, band);

        let x = bands.get("x").expect("missing x");
        let y = bands.get("y").expect("missing y");
        assert!((x.width - 30.0).abs() < 1e-9);
        assert!((x.x - 0.0).abs() < 1e-9);
        assert!((y.x - 30.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_name_lookup_returns_none() {
        let bands = ColumnBands::with_gap(&["only"], (0.0, 10.0), 1.0);
        assert!(bands.get("missing").is_none());
    }

    #[test]
    fn duplicate_names_keep_the_last_geometry() {
        let bands = ColumnBands::with_gap(&["a", "a"], (0.0, 100.0), 0.0);
        assert_eq!(bands.len(), 1);
        let a = bands.get("a").expect("missing a");
        assert!((a.x - 50.0).abs() < 1e-9);
    }
}
