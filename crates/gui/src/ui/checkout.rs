use std::time::Instant;

use egui::{RichText, Ui};
use shared::{format_usd, Route};

use crate::i18n::t;
use crate::state::AppState;

/// Order summary built from the cart
pub fn show(ui: &mut Ui, state: &mut AppState, now: Instant) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(480.0);
        ui.add_space(24.0);
        ui.heading(t("checkout.title"));
        ui.add_space(12.0);

        let cart = state.configurator.cart();
        ui.label(RichText::new(t("checkout.summary")).strong());
        if cart.is_empty() {
            ui.weak(t("nav.cart_empty"));
        }

        egui::Grid::new("checkout_lines")
            .num_columns(2)
            .striped(true)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                for line in cart.lines() {
                    ui.vertical(|ui| {
                        ui.label(format!("{} {}", line.quantity, t("nav.line_title")));
                        ui.small(line.summary());
                    });
                    ui.label(format_usd(line.total()));
                    ui.end_row();
                }
            });

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(RichText::new(t("checkout.total")).strong());
            ui.label(RichText::new(format_usd(cart.subtotal())).strong());
        });

        if let Some(user) = state.session.user() {
            ui.small(&user.name);
        }

        ui.add_space(12.0);
        if ui.button(t("checkout.back")).clicked() {
            state.navigate(Route::HOME_SKIP_INTRO, now);
        }
    });
}
