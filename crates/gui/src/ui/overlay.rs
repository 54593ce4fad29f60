//! Configurator overlay floating over the 3D viewport

use std::path::Path;
use std::time::Instant;

use egui::{Align2, RichText, Ui};
use shared::{format_usd, Color, Decal, Size, UNIT_PRICE_USD};

use super::{card_frame, color32};
use crate::asset::resolve_asset;
use crate::i18n::t;
use crate::state::{AppState, Configurator};

const TAGLINES: [&str; 8] = [
    "Ultimate Comfort. Flawless Fit.",
    "Timeless Elegance. Unmatched Quality.",
    "Built to Last. Stylishly Strong.",
    "Fashion with a Conscience.",
    "Standout Style. Eco-Friendly Essence.",
    "Versatile. Unforgettable. You.",
    "Confidence Begins Here.",
    "Luxurious Comfort. Unbeatable Style.",
];

const SWATCH_RADIUS: f32 = 14.0;
const DECAL_THUMB: f32 = 48.0;

/// What the overlay asks of the app this frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOutput {
    pub download_preview: bool,
}

pub fn show(ctx: &egui::Context, state: &mut AppState, now: Instant) -> OverlayOutput {
    let mut output = OverlayOutput::default();

    egui::Area::new(egui::Id::new("overlay_colors"))
        .anchor(Align2::LEFT_BOTTOM, egui::vec2(24.0, -240.0))
        .show(ctx, |ui| {
            card_frame(ui).show(ui, |ui| color_swatches(ui, &mut state.configurator));
        });

    egui::Area::new(egui::Id::new("overlay_decals"))
        .anchor(Align2::LEFT_BOTTOM, egui::vec2(24.0, -24.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                card_frame(ui).show(ui, |ui| {
                    decal_picker(ui, &mut state.configurator, Path::new(&state.settings.assets_dir));
                });
                ui.add_space(8.0);
                if ui.button(format!("{}  ⬇", t("overlay.download"))).clicked() {
                    output.download_preview = true;
                }
            });
        });

    egui::Area::new(egui::Id::new("overlay_product"))
        .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -20.0))
        .show(ctx, |ui| {
            card_frame(ui).show(ui, |ui| {
                ui.set_max_width(320.0);
                product_card(ui, &mut state.configurator, now);
            });
        });

    output
}

// ── Pickers ──────────────────────────────────────────────────

fn color_swatches(ui: &mut Ui, configurator: &mut Configurator) {
    ui.vertical(|ui| {
        for color in Color::ALL {
            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(SWATCH_RADIUS * 2.0, SWATCH_RADIUS * 2.0),
                egui::Sense::click(),
            );
            let selected = configurator.color() == color;
            let radius = if response.hovered() { SWATCH_RADIUS * 1.1 } else { SWATCH_RADIUS };
            let ring = if selected {
                egui::Stroke::new(2.0, ui.visuals().selection.stroke.color)
            } else {
                egui::Stroke::new(1.0, egui::Color32::WHITE)
            };
            let painter = ui.painter();
            painter.circle_filled(rect.center(), radius - 1.0, color32(color));
            painter.circle_stroke(rect.center(), radius, ring);

            if response.on_hover_text(color.name()).clicked() {
                configurator.select_color(color);
            }
        }
    });
}

fn decal_picker(ui: &mut Ui, configurator: &mut Configurator, assets_dir: &Path) {
    ui.vertical(|ui| {
        for decal in Decal::ALL {
            let path = resolve_asset(assets_dir, &decal.asset_path());
            let image = egui::Image::new(format!("file://{}", path.display()))
                .fit_to_exact_size(egui::vec2(DECAL_THUMB, DECAL_THUMB));
            let response = ui
                .add(egui::ImageButton::new(image).selected(configurator.decal() == decal))
                .on_hover_text(decal.name());
            if response.clicked() {
                configurator.select_decal(decal);
            }
        }
    });
}

// ── Product card ─────────────────────────────────────────────

fn product_card(ui: &mut Ui, configurator: &mut Configurator, now: Instant) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(t("overlay.title")).size(24.0).strong());
        let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 6.0, color32(configurator.color()));
        ui.small(configurator.color().name());
    });

    for line in TAGLINES {
        ui.small(line);
    }
    ui.label(RichText::new(format_usd(UNIT_PRICE_USD)).color(ui.visuals().hyperlink_color));

    ui.horizontal(|ui| {
        size_picker(ui, configurator);

        let mut text = configurator.quantity().to_string();
        let edit = egui::TextEdit::singleline(&mut text)
            .hint_text(t("overlay.quantity"))
            .desired_width(80.0);
        if ui.add(edit).changed() {
            configurator.set_quantity_input(&text);
        }
    });

    if configurator.is_over_catalog_stock() {
        ui.colored_label(ui.visuals().warn_fg_color, t("overlay.over_stock"));
    }

    let error_id = egui::Id::new("overlay_submit_error");
    let label = format!("{}  {}", t("overlay.add_to_cart"), format_usd(configurator.line_total()));
    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 28.0));
    if ui.add_enabled(!configurator.add_to_cart_disabled(), button).clicked() {
        match configurator.submit(now) {
            Ok(_) => {
                ui.data_mut(|d| d.remove::<String>(error_id));
            }
            Err(e) => {
                tracing::debug!("Add to cart rejected: {e}");
                ui.data_mut(|d| d.insert_temp(error_id, e.to_string()));
            }
        }
    }
    if let Some(message) = ui.data(|d| d.get_temp::<String>(error_id)) {
        ui.colored_label(ui.visuals().error_fg_color, message);
    }
}

fn size_picker(ui: &mut Ui, configurator: &mut Configurator) {
    let selected_text = configurator
        .size()
        .map(|s| s.label())
        .unwrap_or_else(|| t("overlay.choose_size").to_string());

    egui::ComboBox::from_id_salt("overlay_size")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for size in Size::ALL {
                let text = size_option_label(size, configurator.available_stock().get(size));
                let selectable = configurator.is_size_selectable(size);
                let selected = configurator.size() == Some(size);
                let clicked = ui
                    .add_enabled(selectable, egui::SelectableLabel::new(selected, text))
                    .clicked();
                if clicked {
                    if let Err(e) = configurator.select_size(size) {
                        tracing::debug!("Size {} not selectable: {e}", size.id());
                    }
                }
            }
        });
}

/// `M (3)` or `L (Out of Stock)`
pub fn size_option_label(size: Size, available: i64) -> String {
    if available <= 0 {
        format!("{} ({})", size.label(), t("overlay.out_of_stock"))
    } else {
        format!("{} ({available})", size.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_option_label() {
        assert_eq!(size_option_label(Size::M, 3), "M (3)");
        assert_eq!(
            size_option_label(Size::L, 0),
            format!("L ({})", t("overlay.out_of_stock"))
        );
    }
}
