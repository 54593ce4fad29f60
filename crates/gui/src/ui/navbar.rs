use std::time::Instant;

use egui::{RichText, Ui};
use shared::{format_usd, Route, SessionUser};

use crate::i18n::t;
use crate::state::{AppState, SessionState, Theme};

pub fn show(ui: &mut Ui, state: &mut AppState, now: Instant) {
    ui.horizontal(|ui| {
        if ui
            .add(egui::Button::new(RichText::new("STYLECROP").size(20.0).strong()).frame(false))
            .clicked()
        {
            state.navigate(Route::HOME_SKIP_INTRO, now);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            session_area(ui, state, now);
            ui.add_space(8.0);
            cart_menu(ui, state, now);
            if state.configurator.added_to_cart.is_visible() {
                ui.colored_label(ui.visuals().hyperlink_color, t("nav.added"));
            }
        });
    });
}

// ── Cart dropdown ────────────────────────────────────────────

fn cart_menu(ui: &mut Ui, state: &mut AppState, now: Instant) {
    let count = state.configurator.cart().item_count();
    let menu = ui.menu_button(format!("🛒 {count}"), |ui| {
        ui.set_min_width(220.0);
        let cart = state.configurator.cart();
        ui.label(RichText::new(format!("{count} {}", t("nav.items"))).strong().size(16.0));
        ui.horizontal(|ui| {
            ui.label(format!("{}:", t("nav.subtotal")));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format_usd(cart.subtotal()));
            });
        });
        if cart.is_empty() {
            ui.weak(t("nav.cart_empty"));
        }
        for line in cart.lines() {
            ui.horizontal(|ui| {
                ui.label(format!("{} {}", line.quantity, t("nav.line_title")));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format_usd(line.total()));
                });
            });
            ui.small(line.summary());
        }
        ui.separator();
        let enabled = !cart.is_empty();
        let button = egui::Button::new(t("nav.checkout")).min_size(egui::vec2(ui.available_width(), 0.0));
        if ui.add_enabled(enabled, button).clicked() {
            state.activate_checkout(now);
            ui.close_menu();
        }
    });
    if menu.response.clicked() {
        state.configurator.added_to_cart.dismiss();
    }
}

// ── Session area ─────────────────────────────────────────────

fn session_area(ui: &mut Ui, state: &mut AppState, now: Instant) {
    match &state.session {
        SessionState::Loading => {
            ui.spinner();
        }
        SessionState::Absent => {
            if ui.button(t("nav.sign_in")).clicked() {
                state.sign_in.open();
            }
        }
        SessionState::Present(user) => {
            let label = avatar_label(user);
            ui.menu_button(label, |ui| {
                if ui.button(t("nav.profile")).clicked() {
                    state.navigate(Route::Profile, now);
                    ui.close_menu();
                }
                if ui.button(theme_switch_label(state.settings.theme)).clicked() {
                    state.toggle_theme();
                    ui.close_menu();
                }
                if ui.button(t("nav.settings")).clicked() {
                    state.show_settings_window = true;
                    ui.close_menu();
                }
                ui.horizontal(|ui| {
                    let _ = ui.button(t("nav.orders"));
                    ui.small("New");
                });
                if ui.button(t("nav.sign_out")).clicked() {
                    state.sign_out();
                    ui.close_menu();
                }
            });
        }
    }
}

/// Initial in a ring stands in for the profile picture
fn avatar_label(user: &SessionUser) -> RichText {
    let initial = user
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".into());
    RichText::new(format!("({initial})")).strong().size(16.0)
}

/// Label names the theme the click switches to
fn theme_switch_label(current: Theme) -> &'static str {
    match current.next() {
        Theme::Light => t("nav.switch_to_light"),
        Theme::Dark => t("nav.switch_to_dark"),
    }
}
