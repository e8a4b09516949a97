use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Restaurant;
use crate::state::AppState;
use crate::view::{format_cost, format_rating, or_dash, TOP_PICKS};

// ---------------------------------------------------------------------------
// Explore page (central panel)
// ---------------------------------------------------------------------------

/// Top picks and the top-10 table for the explore filters.
pub fn explore_page(ui: &mut Ui, state: &AppState) {
    let view = &state.explore;
    if view.is_empty() {
        ui.label(
            RichText::new("⚠ No matching restaurants found. Please adjust your filters.")
                .color(Color32::from_rgb(230, 160, 40)),
        );
        return;
    }

    let currency = state.currency.as_str();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Total Restaurants Found: {}", view.total));
            ui.add_space(8.0);

            ui.heading("🏆 Top 3 Restaurants");
            ui.columns(TOP_PICKS, |columns: &mut [Ui]| {
                for (column, restaurant) in columns.iter_mut().zip(view.top_picks()) {
                    restaurant_card(column, restaurant, currency);
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.heading("📊 Top 10 Filtered Restaurants");
            top_table(ui, &view.top, currency);
        });
}

fn restaurant_card(ui: &mut Ui, r: &Restaurant, currency: &str) {
    ui.group(|ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(format!("🍽 {}", r.name)).strong().size(16.0));
        ui.label(format!("📍 City: {}", or_dash(r.city.as_deref())));
        ui.label(format!("⭐ Rating: {}", format_rating(r.rating)));
        ui.label(format!("💰 Cost: {}", format_cost(r.cost, currency)));
        ui.label(format!("🍛 Cuisine: {}", or_dash(r.cuisine.as_deref())));
        ui.label(format!("📌 Address: {}", r.address));
    });
}

fn top_table(ui: &mut Ui, rows: &[Restaurant], currency: &str) {
    let headers = [
        "Restaurant Name".to_string(),
        "City".to_string(),
        format!("Cost ({currency})"),
        "Rating".to_string(),
        "Cuisine".to_string(),
        "Address".to_string(),
    ];

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(70.0), 4)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in &headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(title.as_str());
                });
            }
        })
        .body(|mut body| {
            for r in rows {
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(r.name.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(or_dash(r.city.as_deref()));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_cost(r.cost, ""));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_rating(r.rating));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(or_dash(r.cuisine.as_deref()));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.address.as_str());
                    });
                });
            }
        });
}
