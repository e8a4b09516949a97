use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, ScrollArea, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Corner, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};

use crate::color::{generate_palette, CategoryColors};
use crate::data::aggregate::{Histogram, ScatterSeries, Share};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;
const HISTOGRAM_FILL: Color32 = Color32::from_rgb(76, 114, 176);
/// Pie orientation of the first slice, degrees counter-clockwise from +x.
const PIE_START_ANGLE: f64 = 140.0;

// ---------------------------------------------------------------------------
// Dashboard page (central panel)
// ---------------------------------------------------------------------------

/// Count plus the four charts for the dashboard filters.
pub fn dashboard_page(ui: &mut Ui, state: &AppState) {
    let view = &state.dashboard;

    ui.heading(format!("Filtered Restaurants Count: {}", view.total));
    if view.is_empty() {
        ui.label(
            RichText::new("⚠ No restaurants found with selected filters.")
                .color(Color32::from_rgb(230, 160, 40)),
        );
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(hist) = &view.rating_histogram {
                ui.heading("⭐ Rating Distribution");
                rating_histogram(ui, hist, &view.rating_density);
                ui.add_space(12.0);
            }
            if let Some(series) = &view.cost_vs_rating {
                ui.heading("💰 Cost vs ⭐ Rating");
                cost_vs_rating(ui, series, &state.cuisine_colors, &state.currency);
                ui.add_space(12.0);
            }
            if let Some(counts) = &view.city_counts {
                ui.heading("🏙 Restaurants Count by City");
                city_bars(ui, counts);
                ui.add_space(12.0);
            }
            if let Some(shares) = &view.cuisine_shares {
                ui.heading("🍽 Top Cuisines Distribution");
                cuisine_pie(ui, shares, &state.cuisine_colors);
            }
        });
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn rating_histogram(ui: &mut Ui, hist: &Histogram, density: &[[f64; 2]]) {
    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .bars()
        .map(|(centre, count)| Bar::new(centre, count as f64).width(width))
        .collect();

    Plot::new("rating_histogram")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Rating")
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Restaurants").color(HISTOGRAM_FILL));
            if !density.is_empty() {
                let curve: PlotPoints = density.iter().copied().collect();
                plot_ui.line(
                    Line::new(curve)
                        .name("Density")
                        .color(Color32::from_rgb(40, 70, 130))
                        .width(2.0),
                );
            }
        });
}

fn cost_vs_rating(ui: &mut Ui, series: &[ScatterSeries], colors: &CategoryColors, currency: &str) {
    Plot::new("cost_vs_rating")
        .height(CHART_HEIGHT)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(format!("Cost ({currency})"))
        .y_axis_label("Rating")
        .show(ui, |plot_ui| {
            for s in series {
                plot_ui.points(
                    Points::new(s.points.clone())
                        .name(&s.label)
                        .color(colors.color_for(&s.label))
                        .radius(3.0),
                );
            }
        });
}

fn city_bars(ui: &mut Ui, counts: &[(String, usize)]) {
    let palette = generate_palette(counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((city, n), color))| {
            Bar::new(i as f64, *n as f64)
                .name(city)
                .width(0.7)
                .fill(color)
        })
        .collect();
    let labels: Vec<String> = counts.iter().map(|(city, _)| city.clone()).collect();

    Plot::new("city_counts")
        .height(CHART_HEIGHT)
        .y_axis_label("Restaurants")
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn cuisine_pie(ui: &mut Ui, shares: &[Share], colors: &CategoryColors) {
    let wedges = pie_wedges(shares);

    Plot::new("cuisine_pie")
        .height(CHART_HEIGHT + 80.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            for (share, (start, sweep)) in shares.iter().zip(wedges) {
                // Same name on every part keeps a single legend entry.
                for (part_start, part_sweep) in convex_parts(start, sweep) {
                    let outline: PlotPoints =
                        wedge_outline(part_start, part_sweep).into_iter().collect();
                    plot_ui.polygon(
                        Polygon::new(outline)
                            .name(&share.label)
                            .fill_color(colors.color_for(&share.label))
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = start + sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", share.percent)).small(),
                ));
                plot_ui.text(Text::new(
                    PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                    RichText::new(&share.label).small(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Axis label for integer category positions, blank elsewhere.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// `(start, sweep)` in radians per slice, counter-clockwise.
fn pie_wedges(shares: &[Share]) -> Vec<(f64, f64)> {
    let mut start = PIE_START_ANGLE.to_radians();
    shares
        .iter()
        .map(|share| {
            let sweep = share.percent / 100.0 * TAU;
            let wedge = (start, sweep);
            start += sweep;
            wedge
        })
        .collect()
}

/// Split a sector into pieces of at most a quarter turn; polygon fill
/// only handles convex shapes.
fn convex_parts(start: f64, sweep: f64) -> Vec<(f64, f64)> {
    let quarter = TAU / 4.0;
    let n = ((sweep / quarter).ceil() as usize).max(1);
    let step = sweep / n as f64;
    (0..n).map(|i| (start + step * i as f64, step)).collect()
}

/// Closed unit-circle sector: centre, then the arc.
fn wedge_outline(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / 0.05).ceil() as usize).max(2);
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|i| {
            let a = start + sweep * i as f64 / steps as f64;
            [a.cos(), a.sin()]
        }))
        .collect()
}
