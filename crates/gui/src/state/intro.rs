use std::time::{Duration, Instant};

use shared::Route;

use super::timer::CancellableTimer;

/// Intro stays fully visible for this long
pub const INTRO_DURATION: Duration = Duration::from_secs(2);
/// Then fades out over this long
pub const INTRO_FADE: Duration = Duration::from_secs(2);

pub const INTRO_WORDS: [&str; 4] = ["STYLECROP", "MAKES", "YOU", "UNIQUE"];

/// Intro splash shown on the first visit to the home page
#[derive(Debug, Clone)]
pub struct IntroState {
    visible: bool,
    started: Option<Instant>,
    hidden_at: Option<Instant>,
    timer: CancellableTimer,
}

impl IntroState {
    pub fn new(route: &Route, now: Instant) -> Self {
        let mut intro = Self {
            visible: false,
            started: None,
            hidden_at: None,
            timer: CancellableTimer::new(INTRO_DURATION),
        };
        intro.on_navigate(route, now);
        intro
    }

    /// Re-arm on `/`, stay hidden on `/?intro=false` and other pages
    pub fn on_navigate(&mut self, route: &Route, now: Instant) {
        match route {
            Route::Home { intro: true } => {
                self.visible = true;
                self.started = Some(now);
                self.hidden_at = None;
                self.timer.schedule(now);
            }
            _ => {
                self.visible = false;
                self.started = None;
                self.hidden_at = None;
                self.timer.cancel();
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true when the intro just got dismissed
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.poll(now) {
            self.visible = false;
            self.hidden_at = Some(now);
            true
        } else {
            false
        }
    }

    /// Time since the intro started, for the staggered word trail
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started.map(|s| now.saturating_duration_since(s))
    }

    /// Overlay opacity: 1 while shown, then linear fade after dismissal
    pub fn opacity(&self, now: Instant) -> f32 {
        if self.visible {
            return 1.0;
        }
        match self.hidden_at {
            Some(hidden) => {
                let t = now.saturating_duration_since(hidden).as_secs_f32() / INTRO_FADE.as_secs_f32();
                (1.0 - t).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    /// Whether anything still needs to be painted (visible or fading)
    pub fn is_animating(&self, now: Instant) -> bool {
        self.opacity(now) > 0.0
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_dismissed_after_two_seconds() {
        let t0 = Instant::now();
        let mut intro = IntroState::new(&Route::default(), t0);
        assert!(intro.is_visible());
        assert!(!intro.poll(t0 + Duration::from_millis(1999)));
        assert!(intro.poll(t0 + INTRO_DURATION));
        assert!(!intro.is_visible());

        let half = t0 + INTRO_DURATION + INTRO_FADE / 2;
        assert!((intro.opacity(half) - 0.5).abs() < 1e-3);
        assert!(!intro.is_animating(t0 + INTRO_DURATION + INTRO_FADE));
    }

    #[test]
    fn test_skip_intro_route() {
        let t0 = Instant::now();
        let intro = IntroState::new(&Route::HOME_SKIP_INTRO, t0);
        assert!(!intro.is_visible());
        assert_eq!(intro.opacity(t0), 0.0);
        assert_eq!(intro.deadline(), None);
    }

    #[test]
    fn test_navigating_away_cancels_timer() {
        let t0 = Instant::now();
        let mut intro = IntroState::new(&Route::default(), t0);
        intro.on_navigate(&Route::Profile, t0 + Duration::from_secs(1));
        assert!(!intro.poll(t0 + Duration::from_secs(5)));
        assert!(!intro.is_visible());
    }
}
