pub mod checkout;
pub mod intro;
pub mod navbar;
pub mod overlay;
pub mod profile;
pub mod settings;
pub mod sign_in;

use egui::Color32;
use shared::Color;

/// Swatch fill for a catalog colour
pub fn color32(color: Color) -> Color32 {
    let [r, g, b] = color.rgb8();
    Color32::from_rgb(r, g, b)
}

/// Translucent card background used by every overlay
pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    let fill = ui.visuals().panel_fill.gamma_multiply(0.85);
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(8))
        .shadow(ui.visuals().popup_shadow)
}
