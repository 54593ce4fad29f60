//! Keyboard shortcut handling

use std::time::Instant;

use eframe::egui;
use shared::Route;

use crate::state::AppState;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, now: Instant) {
    // Escape closes the topmost dialog first, then leaves secondary pages
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        handle_escape(state, now);
    }

    // Don't handle letter shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+Enter: add the current selection to the cart
        if i.modifiers.command
            && i.key_pressed(egui::Key::Enter)
            && state.route.is_home()
            && !state.configurator.add_to_cart_disabled()
        {
            if let Err(e) = state.configurator.submit(now) {
                tracing::debug!("Add to cart rejected: {e}");
            }
        }
    });
}

fn handle_escape(state: &mut AppState, now: Instant) {
    if state.sign_in.open {
        state.sign_in.close();
    } else if state.show_settings_window {
        state.show_settings_window = false;
    } else if !state.route.is_home() {
        state.navigate(Route::HOME_SKIP_INTRO, now);
    }
}
