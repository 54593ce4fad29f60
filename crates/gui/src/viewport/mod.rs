//! Shirt showcase: OpenGL scene, pointer-driven rig and preview download

mod gl_renderer;
pub use stylecrop_gui_lib::viewport::{mesh, rig};

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use egui::{Rect, Ui};
use glam::Vec2;
use shared::{Color, Decal, ENVIRONMENT_PATH, PREVIEW_FILE_NAME, SHIRT_MESH_PATH};

use crate::asset::{self, RgbaTexture};
use crate::i18n::t;
use crate::state::{AppState, Theme};
use gl_renderer::{FrameParams, GlRenderer};
use mesh::MeshData;
use rig::ShirtRig;

/// Neutral ambient used when the environment map is missing
const DEFAULT_TINT: [f32; 3] = [1.0, 1.0, 1.0];

/// Scene assets decoded on the CPU, uploaded once a GL context exists
pub struct SceneAssets {
    pub shirt: MeshData,
    pub decals: HashMap<Decal, RgbaTexture>,
    pub environment_tint: [f32; 3],
}

impl SceneAssets {
    /// Load everything from `assets_dir`, falling back where files are missing
    pub fn load(assets_dir: &Path) -> Self {
        let shirt_path = asset::resolve_asset(assets_dir, SHIRT_MESH_PATH);
        let shirt = match asset::load_glb_mesh(&shirt_path) {
            Ok(mesh) => mesh,
            Err(e) => {
                tracing::warn!("Using fallback shirt, {}: {e}", shirt_path.display());
                mesh::fallback_tee([1.0; 3])
            }
        };

        let env_path = asset::resolve_asset(assets_dir, ENVIRONMENT_PATH);
        let environment_tint = asset::load_environment_tint(&env_path).unwrap_or_else(|e| {
            tracing::warn!("No environment lighting, {}: {e}", env_path.display());
            DEFAULT_TINT
        });

        Self {
            shirt,
            decals: asset::load_decal_textures(assets_dir),
            environment_tint,
        }
    }
}

/// Central 3D panel
pub struct ViewportPanel {
    rig: ShirtRig,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    environment_tint: [f32; 3],
    /// Screen rect to crop from the next screenshot
    pending_preview: Option<Rect>,
}

impl ViewportPanel {
    pub fn new(color: Color) -> Self {
        Self {
            rig: ShirtRig::new(color),
            gl_renderer: None,
            environment_tint: DEFAULT_TINT,
            pending_preview: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context, assets: &SceneAssets) {
        self.environment_tint = assets.environment_tint;
        match GlRenderer::new(gl, &assets.shirt, &assets.decals) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("Failed to initialize GL renderer: {e}"),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &AppState) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());

        // ── Rig animation ───────────────────────────────────
        let (dt, pointer) = ui.input(|i| {
            let screen = i.screen_rect();
            let pointer = i
                .pointer
                .latest_pos()
                .map(|p| pointer_ndc(p, screen))
                .unwrap_or(Vec2::ZERO);
            (i.stable_dt.min(0.1), pointer)
        });
        let moving = self.rig.update(
            dt,
            state.configurator.color(),
            pointer,
            state.overlay_hovered,
        );
        if moving {
            ui.ctx().request_repaint();
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect, state);
    }

    fn render_gl(&self, ui: &mut Ui, rect: Rect, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                t("viewport.no_gl"),
                egui::FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            return;
        };

        let renderer = gl_renderer.clone();
        let aspect = rect.width() / rect.height().max(1.0);
        let model = self.rig.model_matrix();
        let view_projection = self.rig.projection_matrix(aspect) * self.rig.view_matrix();
        let shirt_color = self.rig.shirt_color.rgb();
        let backdrop_color = self.rig.backdrop_color.rgb();
        let environment_tint = self.environment_tint;
        let decal = state.configurator.decal();
        let clear_color = clear_color(state.settings.theme);

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let clip = info.clip_rect_in_pixels();
                let params = FrameParams {
                    viewport: [
                        clip.left_px as f32,
                        clip.from_bottom_px as f32,
                        clip.width_px as f32,
                        clip.height_px as f32,
                    ],
                    model,
                    view_projection,
                    shirt_color,
                    backdrop_color,
                    environment_tint,
                    decal,
                    clear_color,
                };
                if let Ok(r) = renderer.lock() {
                    r.paint(painter.gl(), &params);
                }
            })),
        };
        ui.painter().add(callback);
    }

    // ── Preview download ─────────────────────────────────────

    /// Ask the backend for a screenshot; the crop happens when it arrives
    pub fn request_preview(&mut self, ctx: &egui::Context, rect: Rect) {
        if rect.width() < 1.0 || rect.height() < 1.0 {
            tracing::debug!("Preview skipped: empty viewport");
            return;
        }
        self.pending_preview = Some(rect);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        ctx.request_repaint();
    }

    /// Overlays stay hidden until the captured frame arrives
    pub fn is_capturing(&self) -> bool {
        self.pending_preview.is_some()
    }

    /// Handle a finished screenshot, if any, by offering to save it
    pub fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if self.pending_preview.is_none() {
            return;
        }
        let image = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = image else {
            return;
        };
        let Some(rect) = self.pending_preview.take() else {
            return;
        };

        let cropped = image.region(&rect, Some(ctx.pixels_per_point()));
        let Some(path) = rfd::FileDialog::new()
            .set_title(t("preview.save_title"))
            .add_filter("PNG", &["png"])
            .set_file_name(PREVIEW_FILE_NAME)
            .save_file()
        else {
            tracing::debug!("Preview download cancelled");
            return;
        };
        match crate::export::save_preview(&cropped, &path) {
            Ok(()) => tracing::info!("Saved preview to {}", path.display()),
            Err(e) => tracing::error!("Failed to save preview: {e}"),
        }
    }
}

/// Pointer position in normalized device coordinates, y up
fn pointer_ndc(pos: egui::Pos2, screen: Rect) -> Vec2 {
    if screen.width() <= 0.0 || screen.height() <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (pos.x - screen.left()) / screen.width() * 2.0 - 1.0;
    let y = -((pos.y - screen.top()) / screen.height() * 2.0 - 1.0);
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

fn clear_color(theme: Theme) -> [f32; 3] {
    match theme {
        Theme::Light => [0.93, 0.93, 0.95],
        Theme::Dark => [0.11, 0.12, 0.14],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_ndc_corners() {
        let screen = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 100.0));
        assert_eq!(pointer_ndc(egui::pos2(100.0, 50.0), screen), Vec2::ZERO);
        assert_eq!(pointer_ndc(egui::pos2(0.0, 0.0), screen), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_ndc(egui::pos2(200.0, 100.0), screen), Vec2::new(1.0, -1.0));
        assert_eq!(pointer_ndc(egui::pos2(400.0, -50.0), screen), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_missing_assets_fall_back() {
        let dir = std::env::temp_dir().join("stylecrop-no-assets");
        let assets = SceneAssets::load(&dir);
        assert!(assets.shirt.vertex_count() > 0);
        assert!(assets.decals.is_empty());
        assert_eq!(assets.environment_tint, DEFAULT_TINT);
    }
}
