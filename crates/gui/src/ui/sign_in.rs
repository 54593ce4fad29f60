use crate::i18n::t;
use crate::state::AppState;

/// Modal asking for a display name and an optional avatar
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.sign_in.open {
        return;
    }

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;
    egui::Window::new(t("sign_in.title"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .open(&mut open)
        .show(ctx, |ui| {
            let form = &mut state.sign_in;
            egui::Grid::new("sign_in_form").num_columns(2).show(ui, |ui| {
                ui.label(t("sign_in.name"));
                let name = ui.text_edit_singleline(&mut form.name);
                if name.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.end_row();
                ui.label(t("sign_in.image"));
                ui.text_edit_singleline(&mut form.image);
                ui.end_row();
            });

            if let Some(error) = &form.error {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }

            ui.horizontal(|ui| {
                let pending = form.pending;
                if ui.add_enabled(!pending, egui::Button::new(t("sign_in.submit"))).clicked() {
                    submit = true;
                }
                if ui.button(t("sign_in.cancel")).clicked() {
                    cancel = true;
                }
                if pending {
                    ui.spinner();
                }
            });
        });

    if submit && !state.sign_in.pending {
        state.submit_sign_in();
    }
    if cancel || !open {
        state.sign_in.close();
    }
}
