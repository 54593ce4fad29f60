//! Main application module

mod keyboard;
mod styles;

use std::path::Path;
use std::time::Instant;

use eframe::egui;
use shared::Route;

use crate::api::ApiClient;
use crate::i18n::{self, Lang};
use crate::state::{AppSettings, AppState, Effect, Theme};
use crate::ui::{checkout, intro, navbar, overlay, profile, settings, sign_in};
use crate::viewport::{SceneAssets, ViewportPanel};

/// Main application
pub struct StorefrontApp {
    state: AppState,
    viewport: ViewportPanel,
    api: Option<ApiClient>,
    /// Last applied theme (to detect changes)
    last_theme: Theme,
    /// Screen rect of the 3D panel, for cropping previews
    viewport_rect: egui::Rect,
}

impl StorefrontApp {
    pub fn new(cc: &eframe::CreationContext<'_>, route: Route) -> Self {
        let settings = AppSettings::load();
        let mut state = AppState::new(settings, route, Instant::now());

        styles::configure_styles(&cc.egui_ctx, state.settings.theme);
        i18n::set_lang(Lang::from(state.settings.language));
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut viewport = ViewportPanel::new(state.configurator.color());
        if let Some(gl) = cc.gl.as_ref() {
            let assets = SceneAssets::load(Path::new(&state.settings.assets_dir));
            viewport.init_gl(gl, &assets);
        }

        let api = match ApiClient::new(&state.settings.api_base_url) {
            Ok(mut client) => {
                client.set_repaint_context(cc.egui_ctx.clone());
                Some(client)
            }
            Err(e) => {
                tracing::error!("Storefront API unavailable: {e}");
                None
            }
        };

        state.restore_session();
        let last_theme = state.settings.theme;

        Self {
            state,
            viewport,
            api,
            last_theme,
            viewport_rect: egui::Rect::NOTHING,
        }
    }

    /// Run side effects queued by state transitions
    fn run_effects(&mut self) {
        for effect in self.state.drain_effects() {
            if let Effect::SaveSettings = effect {
                self.state.settings.save();
                continue;
            }
            let Some(api) = self.api.as_mut() else {
                tracing::warn!("Dropping {effect:?}: no API client");
                continue;
            };
            match effect {
                Effect::SetToken(token) => api.set_token(token),
                Effect::WhoAmI => api.who_am_i(),
                Effect::SignIn(request) => api.sign_in(request),
                Effect::SignOut => api.sign_out(),
                Effect::FetchAddresses => api.list_addresses(),
                Effect::CreateAddress(input) => api.create_address(input),
                Effect::UpdateAddresses(patches) => api.update_addresses(patches),
                Effect::SaveSettings => {}
            }
        }
    }
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Apply theme and language if changed
        if self.state.settings.theme != self.last_theme {
            styles::configure_styles(ctx, self.state.settings.theme);
            self.last_theme = self.state.settings.theme;
        }
        i18n::set_lang(Lang::from(self.state.settings.language));

        // ── Timers and backend responses ─────────────────────
        self.state.tick(now);
        if let Some(api) = self.api.as_mut() {
            for event in api.poll() {
                self.state.apply_api_event(event);
            }
        }

        keyboard::handle_keyboard(ctx, &mut self.state, now);
        self.viewport.handle_screenshot(ctx);

        // ── Navbar ───────────────────────────────────────────
        let nav = egui::TopBottomPanel::top("navbar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(12, 6)))
            .show(ctx, |ui| {
                navbar::show(ui, &mut self.state, now);
            });

        // ── Page ─────────────────────────────────────────────
        match self.state.route {
            Route::Home { .. } => {
                egui::CentralPanel::default()
                    .frame(egui::Frame::NONE)
                    .show(ctx, |ui| {
                        self.viewport_rect = ui.max_rect();
                        self.viewport.show(ui, &self.state);
                    });
                if !self.viewport.is_capturing() {
                    let output = overlay::show(ctx, &mut self.state, now);
                    if output.download_preview {
                        self.viewport.request_preview(ctx, self.viewport_rect);
                    }
                }
            }
            Route::Profile => {
                egui::CentralPanel::default().show(ctx, |ui| profile::show(ui, &mut self.state));
            }
            Route::Checkout => {
                egui::CentralPanel::default()
                    .show(ctx, |ui| checkout::show(ui, &mut self.state, now));
            }
        }

        // ── Dialogs ──────────────────────────────────────────
        sign_in::show(ctx, &mut self.state);
        settings::show(ctx, &mut self.state);
        intro::show(ctx, &self.state.intro, now);

        // Shirt stops following the pointer over any UI element
        self.state.overlay_hovered = nav.response.contains_pointer() || ctx.is_pointer_over_area();

        self.run_effects();

        if let Some(deadline) = self.state.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
