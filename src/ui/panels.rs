use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, DragValue, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::{FilterConfig, MAX_RATING, RATING_STEP};
use crate::state::{AppState, Page};

/// Step of the minimum cost input.
const COST_STEP: f64 = 10.0;

#[derive(Clone, Copy)]
enum Control {
    Cities,
    Rating,
    Cost,
    Cuisines,
}

impl Page {
    fn filter_heading(self) -> &'static str {
        match self {
            Page::Explore => "🎯 Apply Filters",
            Page::Dashboard => "📊 Dashboard Filters",
        }
    }

    fn controls(self) -> [Control; 4] {
        match self {
            Page::Explore => [
                Control::Cities,
                Control::Rating,
                Control::Cost,
                Control::Cuisines,
            ],
            Page::Dashboard => [
                Control::Cities,
                Control::Cuisines,
                Control::Rating,
                Control::Cost,
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filters of the current page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let page = state.page;
    ui.heading(page.filter_heading());
    ui.separator();

    let dataset = Arc::clone(&state.dataset);
    let schema = dataset.schema();
    let cuisine_options = state.cuisine_options();
    let currency = state.currency.clone();

    let mut changed = false;
    let mut reset = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let filters = state.filters_mut();

            for control in page.controls() {
                match control {
                    Control::Cities if schema.has_city => {
                        changed |= multi_select(
                            ui,
                            page,
                            "Select City(s)",
                            dataset.cities(),
                            &mut filters.cities,
                        );
                    }
                    Control::Cuisines if schema.has_cuisine => {
                        changed |= multi_select(
                            ui,
                            page,
                            "🍱 Select Cuisine(s)",
                            &cuisine_options,
                            &mut filters.cuisines,
                        );
                    }
                    Control::Rating if schema.has_rating => {
                        ui.label("Minimum Rating ⭐");
                        let mut min_rating = filters.min_rating;
                        let response = ui.add(
                            Slider::new(&mut min_rating, 0.0..=MAX_RATING)
                                .step_by(RATING_STEP)
                                .max_decimals(1),
                        );
                        if response.changed() {
                            filters.set_min_rating(min_rating);
                            changed = true;
                        }
                    }
                    Control::Cost if schema.has_cost => {
                        ui.label(format!("Minimum Cost ({currency})"));
                        changed |= cost_input(ui, filters, &currency);
                    }
                    _ => {}
                }
                ui.add_space(6.0);
            }

            ui.separator();
            if ui.button("Reset filters").clicked() {
                reset = true;
            }
        });

    if reset {
        state.reset_filters();
    } else if changed {
        state.refilter();
    }
}

/// Collapsible checkbox list. Nothing checked means no constraint.
fn multi_select(
    ui: &mut Ui,
    page: Page,
    title: &str,
    options: &[String],
    selected: &mut BTreeSet<String>,
) -> bool {
    let mut changed = false;

    let header_text = if selected.is_empty() {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt((page, title))
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() && !selected.is_empty() {
                selected.clear();
                changed = true;
            }

            for value in options {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    FilterConfig::toggle(selected, value);
                    changed = true;
                }
            }
        });

    changed
}

/// Number input with step buttons. There is no upper bound: a floor above
/// every cost is a valid query that matches nothing.
fn cost_input(ui: &mut Ui, filters: &mut FilterConfig, currency: &str) -> bool {
    let before = filters.min_cost;
    let mut min_cost = before;
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("−").clicked() {
            min_cost -= COST_STEP;
        }
        ui.add(
            DragValue::new(&mut min_cost)
                .speed(COST_STEP)
                .range(0.0..=f64::INFINITY)
                .prefix(currency),
        );
        if ui.small_button("+").clicked() {
            min_cost += COST_STEP;
        }
    });
    filters.set_min_cost(min_cost);
    filters.min_cost != before
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the page selector and dataset summary.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("🍴 Restaurant Explorer");
        ui.separator();

        let mut page = state.page;
        for candidate in Page::ALL {
            ui.selectable_value(&mut page, candidate, candidate.label());
        }
        state.set_page(page);

        ui.separator();
        ui.label(format!(
            "{} restaurants loaded, {} matching",
            state.dataset.len(),
            state.visible_count()
        ));
    });
}
