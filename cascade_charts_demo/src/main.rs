// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waterfall chart demos for `cascade_charts`.
mod html;
mod svg;

use cascade_charts::{
    CategoryRecord, FrameSpec, Margin, Size, WaterfallMarkSpec, WaterfallPalette, currency_label,
};
use peniko::Brush;
use peniko::color::palette::css;

fn main() {
    let sections = vec![cash_flow_demo(), budget_demo()];

    let html = html::render_report("Cascade charts demo", &sections);
    std::fs::write("cascade_charts_demo.html", html).expect("write cascade_charts_demo.html");
    println!("wrote cascade_charts_demo.html");
}

fn render_frame(spec: &FrameSpec, rows: &[CategoryRecord]) -> String {
    let (layout, pieces, guides) = spec.render(rows).expect("render frame");
    let mut scene = svg::SvgScene::default();
    scene.set_view_box(layout.view);
    for mark in guides {
        scene.push(mark);
    }
    for piece in pieces {
        for mark in piece.marks {
            scene.push(mark);
        }
    }
    scene.to_svg_string()
}

fn cash_flow_demo() -> html::HtmlSection {
    let rows = vec![
        CategoryRecord::new("Product Revenue", 42_000.0),
        CategoryRecord::new("Services Revenue", 21_000.0),
        CategoryRecord::new("Fixed Costs", -17_000.0),
        CategoryRecord::new("Variable Costs", -14_000.0),
        CategoryRecord::new("Other Costs", -10_000.0),
        CategoryRecord::new("Ransoms", 10_000.0),
        CategoryRecord::new("Cat Rental", 10_000.0),
        CategoryRecord::total("Total"),
    ];

    let spec = FrameSpec::new(
        0x1_000,
        Size::new(700.0, 400.0),
        Margin::new(20.0, 20.0, 100.0, 60.0),
        (0.0, 65_000.0),
        40.0,
    )
    .with_tick_formatter(|v, _step| currency_label(v))
    .with_background(css::WHITE_SMOKE);

    let svg = render_frame(&spec, &rows);
    html::HtmlSection {
        title: "Cash flow waterfall",
        description: "Signed revenue/cost rows accumulate left to right; the dashed connectors carry each running level to the next bar, and the trailing Total bar drops back to the baseline.",
        svg,
    }
}

fn budget_demo() -> html::HtmlSection {
    // A smaller frame with a custom total key, palette, and unrotated labels.
    let rows = vec![
        CategoryRecord::new("Salary", 5_200.0),
        CategoryRecord::new("Freelance", 1_800.0),
        CategoryRecord::new("Rent", -1_900.0),
        CategoryRecord::new("Groceries", -600.0),
        CategoryRecord::new("Transport", -300.0),
        CategoryRecord::total("Net"),
    ];

    let waterfall = WaterfallMarkSpec::new(0x2_000, 24.0)
        .with_total_key("Net")
        .with_palette(WaterfallPalette {
            total: Brush::Solid(css::STEEL_BLUE),
            positive: Brush::Solid(css::SEA_GREEN),
            negative: Brush::Solid(css::INDIAN_RED),
        });

    let spec = FrameSpec::new(
        0x2_000,
        Size::new(520.0, 300.0),
        Margin::new(20.0, 20.0, 50.0, 50.0),
        (0.0, 8_000.0),
        24.0,
    )
    .with_waterfall(waterfall)
    .with_tick_count(8)
    .with_category_label_angle(0.0)
    .with_background(css::WHITE_SMOKE);

    let svg = render_frame(&spec, &rows);
    html::HtmlSection {
        title: "Monthly budget",
        description: "The total row key, bar palette, connector reach, and label rotation are all configurable; here the running total is named Net and category labels stay horizontal.",
        svg,
    }
}
