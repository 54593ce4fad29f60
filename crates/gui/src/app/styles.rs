//! Application style configuration

use eframe::egui;

use crate::state::Theme;

/// Apply the light or dark storefront look
pub fn configure_styles(ctx: &egui::Context, theme: Theme) {
    let mut style = (*ctx.style()).clone();

    style.visuals = match theme {
        Theme::Light => light_visuals(),
        Theme::Dark => dark_visuals(),
    };

    // Rounding
    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.menu_margin = egui::Margin::same(6);

    apply_text_styles(&mut style);
    ctx.set_style(style);
}

fn dark_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgb(29, 32, 36);
    visuals.window_fill = egui::Color32::from_rgb(36, 40, 46);
    visuals.selection.bg_fill = egui::Color32::from_rgb(102, 26, 230);
    visuals.hyperlink_color = egui::Color32::from_rgb(58, 191, 248);
    visuals
}

fn light_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = egui::Color32::from_rgb(242, 242, 245);
    visuals.window_fill = egui::Color32::WHITE;
    visuals.selection.bg_fill = egui::Color32::from_rgb(87, 13, 248);
    visuals.selection.stroke.color = egui::Color32::WHITE;
    visuals.hyperlink_color = egui::Color32::from_rgb(2, 132, 199);
    visuals
}

fn apply_text_styles(style: &mut egui::Style) {
    let body = 14.0;
    style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(body));
    style.text_styles.insert(egui::TextStyle::Button, egui::FontId::proportional(body));
    style.text_styles.insert(egui::TextStyle::Small, egui::FontId::proportional(body * 0.85));
    style.text_styles.insert(egui::TextStyle::Heading, egui::FontId::proportional(body * 1.6));
    style.text_styles.insert(egui::TextStyle::Monospace, egui::FontId::monospace(body));
}
