//! Headless storefront driver with a controllable clock.

use std::time::{Duration, Instant};

use serde_json::{json, Map, Value};
use shared::{format_usd, AddOutcome, Color, Decal, Route, Size};

use crate::api::ApiEvent;
use crate::fixtures;
use crate::state::{AppSettings, AppState, CheckoutAction, Effect, SubmitError};

/// Headless harness: application state plus a synthetic clock
pub struct StorefrontHarness {
    pub state: AppState,
    now: Instant,
    started: Instant,
    effects: Vec<Effect>,
}

impl StorefrontHarness {
    /// Home page with the intro, default settings (nothing read from disk)
    pub fn new() -> Self {
        Self::with_route(Route::default())
    }

    pub fn with_route(route: Route) -> Self {
        let now = Instant::now();
        Self {
            state: AppState::new(AppSettings::default(), route, now),
            now,
            started: now,
            effects: Vec::new(),
        }
    }

    // ── Clock ─────────────────────────────────────────────────

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn elapsed(&self) -> Duration {
        self.now - self.started
    }

    /// Move the clock forward and fire due timers
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.state.tick(self.now);
    }

    // ── Configurator ──────────────────────────────────────────

    pub fn select_color(&mut self, color: Color) {
        self.state.configurator.select_color(color);
    }

    pub fn select_decal(&mut self, decal: Decal) {
        self.state.configurator.select_decal(decal);
    }

    pub fn select_size(&mut self, size: Size) -> Result<(), SubmitError> {
        self.state.configurator.select_size(size)
    }

    pub fn set_quantity(&mut self, input: &str) -> u32 {
        self.state.configurator.set_quantity_input(input)
    }

    pub fn add_to_cart(&mut self) -> Result<AddOutcome, SubmitError> {
        self.state.configurator.submit(self.now)
    }

    /// Select everything and submit in one go
    pub fn add(&mut self, color: Color, decal: Decal, size: Size, quantity: u32) -> Result<AddOutcome, SubmitError> {
        self.select_color(color);
        self.select_decal(decal);
        self.select_size(size)?;
        self.set_quantity(&quantity.to_string());
        self.add_to_cart()
    }

    pub fn added_tip_visible(&self) -> bool {
        self.state.configurator.added_to_cart.is_visible()
    }

    // ── Session & navigation ──────────────────────────────────

    pub fn checkout(&mut self) -> CheckoutAction {
        let action = self.state.activate_checkout(self.now);
        self.collect_effects();
        action
    }

    /// Act as if the backend accepted a sign-in
    pub fn sign_in_as(&mut self, name: &str) {
        self.state
            .apply_api_event(ApiEvent::SignedIn(fixtures::sign_in_response(name)));
        self.collect_effects();
    }

    pub fn sign_out(&mut self) {
        self.state.sign_out();
        self.collect_effects();
    }

    pub fn navigate(&mut self, route: Route) {
        self.state.navigate(route, self.now);
        self.collect_effects();
    }

    pub fn apply_api_event(&mut self, event: ApiEvent) {
        self.state.apply_api_event(event);
        self.collect_effects();
    }

    /// Side effects requested so far, oldest first
    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.collect_effects();
        std::mem::take(&mut self.effects)
    }

    fn collect_effects(&mut self) {
        self.effects.extend(self.state.drain_effects());
    }

    // ── Inspection ────────────────────────────────────────────

    /// JSON snapshot of everything the UI shows
    pub fn snapshot(&self) -> Value {
        let c = &self.state.configurator;
        let available: Map<String, Value> = c
            .available_stock()
            .iter()
            .map(|(size, n)| (size.id().to_string(), json!(n)))
            .collect();
        json!({
            "route": self.state.route.path(),
            "intro_visible": self.state.intro.is_visible(),
            "color": c.color(),
            "decal": c.decal(),
            "size": c.size(),
            "quantity": c.quantity(),
            "line_total": c.line_total(),
            "add_to_cart_disabled": c.add_to_cart_disabled(),
            "added_to_cart": c.added_to_cart.is_visible(),
            "cart": c.cart(),
            "item_count": c.cart().item_count(),
            "subtotal": c.cart().subtotal(),
            "subtotal_display": format_usd(c.cart().subtotal()),
            "available_stock": available,
            "signed_in": self.state.session.is_signed_in(),
            "theme": self.state.settings.theme,
        })
    }
}

impl Default for StorefrontHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_clears_with_clock() {
        let mut h = StorefrontHarness::new();
        assert!(h.state.intro.is_visible());
        h.advance(Duration::from_secs(2));
        assert!(!h.state.intro.is_visible());
        assert_eq!(h.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn test_snapshot_shape() {
        let mut h = StorefrontHarness::with_route(Route::HOME_SKIP_INTRO);
        h.add(Color::Green, Decal::Nextjs, Size::S, 2).unwrap();
        let snap = h.snapshot();
        assert_eq!(snap["route"], "/?intro=false");
        assert_eq!(snap["color"], "#80C670");
        assert_eq!(snap["size"], "s");
        assert_eq!(snap["available_stock"]["s"], 4);
        assert_eq!(snap["subtotal_display"], "$90.00");
        assert_eq!(snap["theme"], "light");
    }
}
