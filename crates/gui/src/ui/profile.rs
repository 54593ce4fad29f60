use egui::{RichText, Ui};

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(420.0);
        ui.add_space(24.0);
        ui.heading(t("profile.title"));
        ui.add_space(12.0);

        if !state.session.is_signed_in() {
            if state.session.is_loading() {
                ui.spinner();
            } else {
                ui.label(t("profile.signed_out"));
                if ui.button(t("nav.sign_in")).clicked() {
                    state.sign_in.open();
                }
            }
            return;
        }

        if state.profile.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(t("profile.loading"));
            });
        }

        let busy = state.profile.is_busy();
        let profile = &mut state.profile;
        egui::Grid::new("address_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                field(ui, t("profile.street"), &mut profile.form.street, profile.errors.street, busy);
                field(ui, t("profile.city"), &mut profile.form.city, profile.errors.city, busy);
                field(ui, t("profile.state"), &mut profile.form.state, profile.errors.state, busy);
                field(ui, t("profile.zip"), &mut profile.form.zip, profile.errors.zip, busy);
            });

        ui.add_space(8.0);
        let label = if profile.form.id.is_some() {
            t("profile.update")
        } else {
            t("profile.create")
        };
        let clicked = ui
            .add_enabled(!busy, egui::Button::new(label).min_size(egui::vec2(160.0, 28.0)))
            .clicked();
        if let Some(error) = &profile.last_error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }
        if clicked {
            state.submit_profile();
        }
    });
}

fn field(ui: &mut Ui, label: &str, value: &mut String, error: Option<&str>, busy: bool) {
    ui.label(label);
    ui.vertical(|ui| {
        ui.add_enabled(!busy, egui::TextEdit::singleline(value));
        if error.is_some() {
            ui.label(RichText::new(t("profile.required")).small().color(ui.visuals().error_fg_color));
        }
    });
    ui.end_row();
}
