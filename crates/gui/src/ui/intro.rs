use std::time::Instant;

use egui::Color32;

use crate::state::intro::INTRO_WORDS;
use crate::state::IntroState;

/// Delay between consecutive words of the trail, seconds
const TRAIL_STAGGER: f32 = 0.08;
/// Time for one word to settle, seconds
const TRAIL_RISE: f32 = 0.5;

/// Splash covering the whole window while the intro is visible or fading
pub fn show(ctx: &egui::Context, intro: &IntroState, now: Instant) {
    let opacity = intro.opacity(now);
    if opacity <= 0.0 {
        return;
    }
    let elapsed = intro.elapsed(now).map(|d| d.as_secs_f32()).unwrap_or(f32::MAX);
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("intro"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let fill = ui.visuals().panel_fill.gamma_multiply(opacity);
            ui.painter().rect_filled(screen, 0.0, fill);
            // Swallow clicks meant for the page underneath
            ui.allocate_rect(screen, egui::Sense::click_and_drag());

            let text_color = ui.visuals().strong_text_color();
            let mut y = screen.top() + screen.height() * 0.15;
            for (i, word) in INTRO_WORDS.iter().enumerate() {
                let (word_alpha, offset) = trail_step(elapsed, i);
                let color = fade(text_color, word_alpha * opacity);
                let galley = ui.painter().layout_no_wrap(
                    word.to_string(),
                    egui::FontId::proportional(96.0),
                    color,
                );
                let pos = egui::pos2(screen.left() + 48.0, y + offset);
                y += galley.size().y * 0.9;
                ui.painter().galley(pos, galley, color);
            }
        });

    ctx.request_repaint();
}

/// Alpha and vertical offset of word `i` at `elapsed` seconds
fn trail_step(elapsed: f32, i: usize) -> (f32, f32) {
    let t = ((elapsed - i as f32 * TRAIL_STAGGER) / TRAIL_RISE).clamp(0.0, 1.0);
    // ease-out cubic
    let eased = 1.0 - (1.0 - t).powi(3);
    (eased, (1.0 - eased) * 40.0)
}

fn fade(color: Color32, alpha: f32) -> Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_is_staggered() {
        let (first, _) = trail_step(0.2, 0);
        let (last, last_offset) = trail_step(0.2, 3);
        assert!(first > last);
        assert_eq!(last, 0.0);
        assert_eq!(last_offset, 40.0);
        assert_eq!(trail_step(5.0, 3), (1.0, 0.0));
    }
}
