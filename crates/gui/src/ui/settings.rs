use crate::i18n::t;
use crate::state::{AppSettings, AppState, Language, Theme};

/// Preferences window opened from the avatar menu
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_settings_window {
        return;
    }

    let mut open = true;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(false)
        .default_width(340.0)
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(t("settings.language"));
                    let mut language = state.settings.language;
                    egui::ComboBox::from_id_salt("settings_language")
                        .selected_text(language.display_name())
                        .show_ui(ui, |ui| {
                            for l in Language::all() {
                                ui.selectable_value(&mut language, *l, l.display_name());
                            }
                        });
                    state.set_language(language);
                    ui.end_row();

                    ui.label(t("settings.theme"));
                    ui.horizontal(|ui| {
                        for (theme, key) in [(Theme::Light, "theme.light"), (Theme::Dark, "theme.dark")] {
                            let selected = state.settings.theme == theme;
                            if ui.selectable_label(selected, t(key)).clicked() && !selected {
                                state.toggle_theme();
                            }
                        }
                    });
                    ui.end_row();

                    ui.label(t("settings.api_url"));
                    ui.text_edit_singleline(&mut state.settings.api_base_url);
                    ui.end_row();

                    ui.label(t("settings.assets_dir"));
                    ui.text_edit_singleline(&mut state.settings.assets_dir);
                    ui.end_row();
                });

            ui.small(t("settings.restart_hint"));
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button(t("settings.apply")).clicked() {
                    state.settings.save();
                }
                if ui.button(t("settings.reset")).clicked() {
                    let token = state.settings.session_token.take();
                    state.settings = AppSettings {
                        session_token: token,
                        ..AppSettings::default()
                    };
                }
                if ui.button(t("settings.close")).clicked() {
                    state.show_settings_window = false;
                }
            });
        });

    if !open {
        state.show_settings_window = false;
    }
}
