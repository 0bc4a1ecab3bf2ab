// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::{
    CategoryRecord, ChartError, ColumnBands, ColumnGeometry, FrameLayout, FrameSpec, Margin, Mark,
    MarkShape, ScaleLinear, Size, WaterfallMarkSpec,
};

fn reference_rows() -> Vec<CategoryRecord> {
    vec![
        CategoryRecord::new("Product Revenue", 42_000.0),
        CategoryRecord::new("Services Revenue", 21_000.0),
        CategoryRecord::new("Fixed Costs", -17_000.0),
        CategoryRecord::new("Variable Costs", -14_000.0),
        CategoryRecord::new("Other Costs", -10_000.0),
        CategoryRecord::new("Ransoms", 10_000.0),
        CategoryRecord::new("Cat Rental", 10_000.0),
        CategoryRecord::total("Total"),
    ]
}

fn reference_frame() -> FrameSpec {
    FrameSpec::new(
        0,
        Size::new(700.0, 400.0),
        Margin::new(20.0, 20.0, 100.0, 60.0),
        (0.0, 65_000.0),
        40.0,
    )
}

fn reference_layout() -> FrameLayout {
    FrameLayout::arrange(Size::new(700.0, 400.0), Margin::new(20.0, 20.0, 100.0, 60.0))
}

fn assert_rect_close(a: Rect, b: Rect) {
    let eps = 1e-9;
    assert!((a.x0 - b.x0).abs() <= eps, "x0 {a:?} != {b:?}");
    assert!((a.y0 - b.y0).abs() <= eps, "y0 {a:?} != {b:?}");
    assert!((a.x1 - b.x1).abs() <= eps, "x1 {a:?} != {b:?}");
    assert!((a.y1 - b.y1).abs() <= eps, "y1 {a:?} != {b:?}");
}

fn piece_label(marks: &[Mark]) -> &str {
    for m in marks {
        if let MarkShape::Text(t) = &m.shape {
            return &t.text;
        }
    }
    panic!("piece has no label mark");
}

#[test]
fn one_piece_per_row_in_input_order() {
    let rows = reference_rows();
    let layout = reference_layout();
    let adjusted = layout.adjusted_size();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let columns = ColumnBands::with_gap(&names, (0.0, adjusted.width), 40.0);
    let scale = ScaleLinear::new((0.0, 65_000.0), (0.0, adjusted.height));

    let pieces = WaterfallMarkSpec::new(0, 40.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect("complete geometry");

    assert_eq!(pieces.len(), rows.len());
    let keys: Vec<&str> = pieces.iter().map(|p| p.key.as_str()).collect();
    let expected: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(keys, expected);
}

#[test]
fn effective_values_sum_to_zero_through_the_total() {
    let rows = reference_rows();
    let spec = WaterfallMarkSpec::new(0, 40.0);
    let values = spec.effective_values(&rows).expect("default accessors resolve");

    let before_total: f64 = values[..7].iter().sum();
    assert!((before_total - 42_000.0).abs() < 1e-9);
    assert!((values[7] + 42_000.0).abs() < 1e-9);
    assert!(values.iter().sum::<f64>().abs() < 1e-9);
}

#[test]
fn labels_carry_the_sign_before_the_currency_prefix() {
    let rows = reference_rows();
    let layout = reference_layout();
    let adjusted = layout.adjusted_size();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let columns = ColumnBands::with_gap(&names, (0.0, adjusted.width), 40.0);
    let scale = ScaleLinear::new((0.0, 65_000.0), (0.0, adjusted.height));

    let pieces = WaterfallMarkSpec::new(0, 40.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect("complete geometry");

    let labels: Vec<&str> = pieces.iter().map(|p| piece_label(&p.marks)).collect();
    assert_eq!(
        labels,
        vec!["$42k", "$21k", "-$17k", "-$14k", "-$10k", "$10k", "$10k", "$42k"]
    );
    for label in labels {
        // The sign, when present, always precedes the `$`.
        assert!(!label.contains("$-"), "sign after prefix in {label:?}");
    }
}

#[test]
fn zero_effective_value_yields_a_zero_height_bar() {
    let rows = [CategoryRecord::new("Nothing", 0.0)];
    let mut columns = ColumnBands::new();
    columns.insert("Nothing", ColumnGeometry { x: 10.0, width: 20.0 });
    // A strictly decreasing pixel-space scale.
    let scale = ScaleLinear::new((0.0, 100_000.0), (100.0, 0.0));
    let layout = FrameLayout::arrange(Size::new(140.0, 120.0), Margin::new(20.0, 0.0, 0.0, 0.0));

    let pieces = WaterfallMarkSpec::new(0, 5.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect("complete geometry");
    let bar = pieces[0].marks[0].bounds().expect("bar bounds");
    assert!(bar.height().abs() < 1e-9);
}

#[test]
fn decreasing_scale_pins_the_bar_to_the_baseline() {
    // Geometry {x: 10, width: 20} and scale(v) = 100 - v/1000: value 42000
    // gives bar_h = scale(42000) - scale(0) = -42, so the bar is pinned at
    // the baseline and spans 42 pixels.
    let rows = [CategoryRecord::new("A", 42_000.0)];
    let mut columns = ColumnBands::new();
    columns.insert("A", ColumnGeometry { x: 10.0, width: 20.0 });
    let scale = ScaleLinear::new((0.0, 100_000.0), (100.0, 0.0));
    let layout = FrameLayout::arrange(Size::new(140.0, 120.0), Margin::new(20.0, 0.0, 0.0, 0.0));
    assert!((layout.adjusted_size().height - 100.0).abs() < 1e-9);

    let pieces = WaterfallMarkSpec::new(0, 5.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect("complete geometry");

    let bar = pieces[0].marks[0].bounds().expect("bar bounds");
    assert_rect_close(bar, Rect::new(10.0, 100.0, 30.0, 142.0));
}

#[test]
fn missing_column_geometry_names_the_category() {
    let rows = [
        CategoryRecord::new("Known", 5.0),
        CategoryRecord::new("Unknown", 3.0),
    ];
    let mut columns = ColumnBands::new();
    columns.insert("Known", ColumnGeometry { x: 0.0, width: 10.0 });
    let scale = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
    let layout = FrameLayout::arrange(Size::new(100.0, 100.0), Margin::default());

    let err = WaterfallMarkSpec::new(0, 5.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect_err("second row has no geometry");
    assert_eq!(
        err,
        ChartError::UnknownColumn {
            name: String::from("Unknown"),
        }
    );
}

#[test]
fn bars_float_at_cumulative_heights() {
    let rows = reference_rows();
    let layout = reference_layout();
    let adjusted = layout.adjusted_size();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let columns = ColumnBands::with_gap(&names, (0.0, adjusted.width), 40.0);
    let scale = ScaleLinear::new((0.0, 65_000.0), (0.0, adjusted.height));
    let px = |v: f64| v / 65_000.0 * adjusted.height;

    let pieces = WaterfallMarkSpec::new(0, 40.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect("complete geometry");

    // First bar rises from the baseline.
    let first = pieces[0].marks[0].bounds().expect("bar bounds");
    assert!((first.y1 - adjusted.height).abs() < 1e-9);
    assert!((first.height() - px(42_000.0)).abs() < 1e-9);

    // Second bar starts where the first ended.
    let second = pieces[1].marks[0].bounds().expect("bar bounds");
    assert!((second.y1 - first.y0).abs() < 1e-9);
    assert!((second.height() - px(21_000.0)).abs() < 1e-9);

    // The first negative bar descends from the running top.
    let third = pieces[2].marks[0].bounds().expect("bar bounds");
    assert!((third.y0 - second.y0).abs() < 1e-9);
    assert!((third.height() - px(17_000.0)).abs() < 1e-9);

    // The total bar returns to the baseline.
    let total = pieces[7].marks[0].bounds().expect("bar bounds");
    assert!((total.y1 - adjusted.height).abs() < 1e-9);
    assert!((total.height() - px(42_000.0)).abs() < 1e-9);
}

#[test]
fn connectors_reach_the_next_bars_left_edge() {
    let rows = reference_rows();
    let layout = reference_layout();
    let adjusted = layout.adjusted_size();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let columns = ColumnBands::with_gap(&names, (0.0, adjusted.width), 40.0);
    let scale = ScaleLinear::new((0.0, 65_000.0), (0.0, adjusted.height));

    let pieces = WaterfallMarkSpec::new(0, 40.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect("complete geometry");

    for window in pieces.windows(2) {
        let bar = window[0].marks[0].bounds().expect("bar bounds");
        let MarkShape::Line(connector) = &window[0].marks[1].shape else {
            panic!("expected a connector after each non-total bar");
        };
        assert!((connector.p0.x - bar.x1).abs() < 1e-9);
        let next_bar = window[1].marks[0].bounds().expect("bar bounds");
        assert!((connector.p1.x - next_bar.x0).abs() < 1e-9);
        assert!(connector.dash.is_some(), "connectors are dashed");
    }

    // The total row emits no connector: just the bar and its label.
    assert_eq!(pieces[7].marks.len(), 2);
}

#[test]
fn connector_sits_on_the_outer_bar_edge() {
    let rows = reference_rows();
    let layout = reference_layout();
    let adjusted = layout.adjusted_size();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let columns = ColumnBands::with_gap(&names, (0.0, adjusted.width), 40.0);
    let scale = ScaleLinear::new((0.0, 65_000.0), (0.0, adjusted.height));

    let pieces = WaterfallMarkSpec::new(0, 40.0)
        .pieces(&rows, &columns, scale, &layout)
        .expect("complete geometry");

    // Positive row: connector at the bar top.
    let bar = pieces[0].marks[0].bounds().expect("bar bounds");
    let MarkShape::Line(line) = &pieces[0].marks[1].shape else {
        panic!("expected a connector line");
    };
    assert!((line.p0.y - bar.y0).abs() < 1e-9);

    // Negative row: connector at the bar bottom.
    let bar = pieces[2].marks[0].bounds().expect("bar bounds");
    let MarkShape::Line(line) = &pieces[2].marks[1].shape else {
        panic!("expected a connector line");
    };
    assert!((line.p0.y - bar.y1).abs() < 1e-9);
}

#[test]
fn frame_render_composes_bands_axis_and_category_labels() {
    let spec = reference_frame()
        .with_tick_formatter(|v, _step| format!("${}k", v / 1000.0));
    let rows = reference_rows();
    let (layout, pieces, marks) = spec.render(&rows).expect("complete geometry");

    assert_rect_close(layout.plot, Rect::new(60.0, 20.0, 680.0, 300.0));
    assert_eq!(pieces.len(), 8);

    // Column banding: width = (620 - 40 * 9) / 8, first column one gap in.
    let first = pieces[0].marks[0].bounds().expect("bar bounds");
    assert!((first.width() - 32.5).abs() < 1e-9);
    assert!((first.x0 - (60.0 + 40.0)).abs() < 1e-9);

    // Pieces are in view space: the first bar's bottom is the plot bottom.
    assert!((first.y1 - 300.0).abs() < 1e-9);

    // The anchor is the bar's horizontal center at its top.
    assert!((pieces[0].anchor.x - (first.x0 + 0.5 * first.width())).abs() < 1e-9);
    assert!((pieces[0].anchor.y - first.y0).abs() < 1e-9);

    // Axis labels use the currency formatter.
    assert!(
        marks.iter().any(|m| match &m.shape {
            MarkShape::Text(t) => t.text == "$10k",
            _ => false,
        }),
        "missing formatted value-axis labels"
    );

    // One rotated category label per row.
    let rotated = marks
        .iter()
        .filter(|m| matches!(&m.shape, MarkShape::Text(t) if t.angle == 45.0))
        .count();
    assert_eq!(rotated, 8);
}

#[test]
fn duplicate_total_rows_each_negate_the_running_sum() {
    // Documented undefined-but-deterministic behavior: every row named by
    // the total key negates the cumulative sum at its position.
    let rows = [
        CategoryRecord::new("a", 10.0),
        CategoryRecord::total("Total"),
        CategoryRecord::new("b", 4.0),
        CategoryRecord::total("Total"),
    ];
    let spec = WaterfallMarkSpec::new(0, 5.0);
    let values = spec.effective_values(&rows).expect("default accessors resolve");
    assert_eq!(values, vec![10.0, -10.0, 4.0, -14.0]);
}
