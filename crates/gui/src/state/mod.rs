pub mod configurator;
pub mod intro;
pub mod profile;
pub mod session;
pub mod settings;
pub mod timer;

use std::time::Instant;

use shared::{DeliveryAddressInput, DeliveryAddressPatch, Route, SignInRequest};

use crate::api::{ApiEvent, ApiRequest};

pub use configurator::{Configurator, SubmitError};
pub use intro::IntroState;
pub use profile::{AddressForm, FormErrors, ProfileState, SubmitPlan};
pub use session::{checkout_action, CheckoutAction, SessionState, SignInForm};
pub use settings::{AppSettings, Language, Theme};
pub use timer::{CancellableTimer, TransientFlag};

/// Side effect requested by a state transition, executed by the app shell
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetToken(Option<String>),
    WhoAmI,
    SignIn(SignInRequest),
    SignOut,
    FetchAddresses,
    CreateAddress(DeliveryAddressInput),
    UpdateAddresses(Vec<DeliveryAddressPatch>),
    SaveSettings,
}

/// Combined application state, passed explicitly to every panel
pub struct AppState {
    pub route: Route,
    pub configurator: Configurator,
    pub session: SessionState,
    pub sign_in: SignInForm,
    pub intro: IntroState,
    pub profile: ProfileState,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
    /// Pointer is over a UI overlay; the shirt stops following it
    pub overlay_hovered: bool,
    effects: Vec<Effect>,
}

impl AppState {
    pub fn new(settings: AppSettings, route: Route, now: Instant) -> Self {
        Self {
            intro: IntroState::new(&route, now),
            route,
            configurator: Configurator::default(),
            session: SessionState::Absent,
            sign_in: SignInForm::default(),
            profile: ProfileState::default(),
            settings,
            show_settings_window: false,
            overlay_hovered: false,
            effects: Vec::new(),
        }
    }

    /// Pending side effects, oldest first
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Advance timers
    pub fn tick(&mut self, now: Instant) {
        self.configurator.tick(now);
        self.intro.poll(now);
    }

    /// Earliest pending timer deadline, used to schedule a repaint
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.configurator.added_to_cart.deadline(), self.intro.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    // ── Navigation ────────────────────────────────────────────

    pub fn navigate(&mut self, route: Route, now: Instant) {
        tracing::info!("Navigate to {}", route.path());
        self.intro.on_navigate(&route, now);
        if route == Route::Profile && self.session.is_signed_in() {
            self.profile.loading = true;
            self.effects.push(Effect::FetchAddresses);
        }
        self.route = route;
    }

    /// Checkout button in the cart dropdown
    pub fn activate_checkout(&mut self, now: Instant) -> CheckoutAction {
        let action = checkout_action(self.configurator.cart(), &self.session);
        match &action {
            CheckoutAction::Disabled => {}
            CheckoutAction::SignIn => self.sign_in.open(),
            CheckoutAction::Navigate(route) => self.navigate(*route, now),
        }
        action
    }

    // ── Session ───────────────────────────────────────────────

    /// Resume a stored session token at startup
    pub fn restore_session(&mut self) {
        if let Some(token) = self.settings.session_token.clone() {
            self.session = SessionState::Loading;
            self.effects.push(Effect::SetToken(Some(token)));
            self.effects.push(Effect::WhoAmI);
        }
    }

    pub fn submit_sign_in(&mut self) {
        match self.sign_in.request() {
            Ok(request) => {
                self.sign_in.pending = true;
                self.sign_in.error = None;
                self.effects.push(Effect::SignIn(request));
            }
            Err(message) => self.sign_in.error = Some(message),
        }
    }

    pub fn sign_out(&mut self) {
        if !self.session.is_signed_in() {
            return;
        }
        self.effects.push(Effect::SignOut);
        self.effects.push(Effect::SetToken(None));
        self.session = SessionState::Absent;
        self.profile = ProfileState::default();
        self.settings.session_token = None;
        self.effects.push(Effect::SaveSettings);
    }

    // ── Preferences ───────────────────────────────────────────

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.next();
        self.effects.push(Effect::SaveSettings);
    }

    pub fn set_language(&mut self, language: Language) {
        if self.settings.language != language {
            self.settings.language = language;
            self.effects.push(Effect::SaveSettings);
        }
    }

    // ── Profile ───────────────────────────────────────────────

    pub fn submit_profile(&mut self) {
        match self.profile.begin_submit() {
            Some(SubmitPlan::Create(input)) => self.effects.push(Effect::CreateAddress(input)),
            Some(SubmitPlan::UpdateAll(patches)) => {
                self.effects.push(Effect::UpdateAddresses(patches))
            }
            None => {}
        }
    }

    // ── Backend responses ─────────────────────────────────────

    pub fn apply_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::SignedIn(response) => {
                tracing::info!("Signed in as {}", response.user.name);
                self.session = SessionState::Present(response.user);
                self.sign_in.close();
                self.settings.session_token = Some(response.token.clone());
                self.effects.push(Effect::SetToken(Some(response.token)));
                self.effects.push(Effect::SaveSettings);
                if self.route == Route::Profile {
                    self.profile.loading = true;
                    self.effects.push(Effect::FetchAddresses);
                }
            }
            ApiEvent::SessionRestored(user) => {
                if self.session.is_loading() {
                    self.session = SessionState::Present(user);
                    if self.route == Route::Profile {
                        self.profile.loading = true;
                        self.effects.push(Effect::FetchAddresses);
                    }
                }
            }
            ApiEvent::SessionRejected => {
                if self.session.is_loading() {
                    tracing::warn!("Stored session expired");
                    self.session = SessionState::Absent;
                    self.settings.session_token = None;
                    self.effects.push(Effect::SetToken(None));
                    self.effects.push(Effect::SaveSettings);
                }
            }
            ApiEvent::SignedOut => {}
            ApiEvent::AddressesLoaded(addresses) => self.profile.on_loaded(addresses),
            ApiEvent::AddressCreated(address) => {
                tracing::info!("Created delivery address {}", address.id);
                self.profile.finish_submit(None);
                self.effects.push(Effect::FetchAddresses);
            }
            ApiEvent::AddressesUpdated(_) => self.profile.finish_submit(None),
            ApiEvent::Failed { request, message } => self.apply_failure(request, message),
        }
    }

    fn apply_failure(&mut self, request: ApiRequest, message: String) {
        match request {
            ApiRequest::SignIn => {
                self.sign_in.pending = false;
                self.sign_in.error = Some(message);
            }
            ApiRequest::WhoAmI => {
                if self.session.is_loading() {
                    self.session = SessionState::Absent;
                }
            }
            ApiRequest::SignOut => {}
            ApiRequest::ListAddresses => {
                self.profile.loading = false;
                self.profile.last_error = Some(message);
            }
            ApiRequest::CreateAddress => {
                self.profile.finish_submit(Some(message));
                // refetch on settle, success or not
                self.effects.push(Effect::FetchAddresses);
            }
            ApiRequest::UpdateAddresses => self.profile.finish_submit(Some(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Size, SessionUser, SignInResponse};

    fn state() -> AppState {
        AppState::new(AppSettings::default(), Route::default(), Instant::now())
    }

    fn signed_in_event() -> ApiEvent {
        ApiEvent::SignedIn(SignInResponse {
            token: "tok".into(),
            user: SessionUser {
                id: "u1".into(),
                name: "Ada".into(),
                image: None,
            },
        })
    }

    #[test]
    fn test_checkout_opens_sign_in_when_signed_out() {
        let now = Instant::now();
        let mut s = state();
        assert_eq!(s.activate_checkout(now), CheckoutAction::Disabled);

        s.configurator.select_size(Size::S).unwrap();
        s.configurator.submit(now).unwrap();
        assert_eq!(s.activate_checkout(now), CheckoutAction::SignIn);
        assert!(s.sign_in.open);
        assert_eq!(s.route, Route::default());
    }

    #[test]
    fn test_sign_in_stores_token() {
        let mut s = state();
        s.apply_api_event(signed_in_event());
        assert!(s.session.is_signed_in());
        assert_eq!(s.settings.session_token.as_deref(), Some("tok"));
        assert_eq!(
            s.drain_effects(),
            vec![Effect::SetToken(Some("tok".into())), Effect::SaveSettings]
        );
    }

    #[test]
    fn test_restore_session_then_reject() {
        let mut s = state();
        s.settings.session_token = Some("old".into());
        s.restore_session();
        assert!(s.session.is_loading());
        assert_eq!(
            s.drain_effects(),
            vec![Effect::SetToken(Some("old".into())), Effect::WhoAmI]
        );
        s.apply_api_event(ApiEvent::SessionRejected);
        assert_eq!(s.session, SessionState::Absent);
        assert_eq!(s.settings.session_token, None);
    }

    #[test]
    fn test_late_rejection_does_not_sign_out() {
        let mut s = state();
        s.apply_api_event(signed_in_event());
        s.apply_api_event(ApiEvent::SessionRejected);
        assert!(s.session.is_signed_in());
    }

    #[test]
    fn test_profile_fetches_when_signed_in() {
        let now = Instant::now();
        let mut s = state();
        s.navigate(Route::Profile, now);
        assert!(s.drain_effects().is_empty());

        s.apply_api_event(signed_in_event());
        s.drain_effects();
        s.navigate(Route::Profile, now);
        assert_eq!(s.drain_effects(), vec![Effect::FetchAddresses]);
        assert!(s.profile.loading);
    }

    #[test]
    fn test_create_failure_still_refetches() {
        let mut s = state();
        s.apply_api_event(ApiEvent::Failed {
            request: ApiRequest::CreateAddress,
            message: "boom".into(),
        });
        assert_eq!(s.drain_effects(), vec![Effect::FetchAddresses]);
        assert_eq!(s.profile.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_next_deadline_tracks_timers() {
        let now = Instant::now();
        let mut s = AppState::new(AppSettings::default(), Route::HOME_SKIP_INTRO, now);
        assert_eq!(s.next_deadline(), None);
        s.configurator.select_size(Size::M).unwrap();
        s.configurator.submit(now).unwrap();
        assert!(s.next_deadline().is_some());
    }
}
