//! Integration tests driving the storefront through StorefrontHarness:
//! checkout gating, session restore, the profile address flow and the intro.

use std::time::Duration;

use shared::{Color, Decal, Route, Size, UpdateManyResult};
use stylecrop_gui_lib::api::{ApiEvent, ApiRequest};
use stylecrop_gui_lib::fixtures;
use stylecrop_gui_lib::harness::StorefrontHarness;
use stylecrop_gui_lib::state::{AppSettings, AppState, CheckoutAction, Effect, SessionState};

fn with_one_shirt() -> StorefrontHarness {
    let mut h = StorefrontHarness::with_route(Route::HOME_SKIP_INTRO);
    h.add(Color::Black, Decal::React, Size::Xxxl, 1).unwrap();
    h
}

// ── Checkout gate ────────────────────────────────────────────────

#[test]
fn test_checkout_disabled_on_empty_cart() {
    let mut h = StorefrontHarness::with_route(Route::HOME_SKIP_INTRO);
    h.sign_in_as("Ada");
    assert_eq!(h.checkout(), CheckoutAction::Disabled);
    assert_eq!(h.state.route, Route::HOME_SKIP_INTRO);
}

#[test]
fn test_checkout_signed_out_opens_sign_in() {
    let mut h = with_one_shirt();
    assert_eq!(h.checkout(), CheckoutAction::SignIn);
    assert!(h.state.sign_in.open);
    assert_eq!(h.state.route, Route::HOME_SKIP_INTRO);
}

#[test]
fn test_checkout_after_sign_in_navigates() {
    let mut h = with_one_shirt();
    h.checkout();
    h.sign_in_as("Ada");
    assert!(!h.state.sign_in.open, "dialog closes on success");

    assert_eq!(h.checkout(), CheckoutAction::Navigate(Route::Checkout));
    assert_eq!(h.state.route, Route::Checkout);
    assert_eq!(h.snapshot()["route"], "/checkout");
}

#[test]
fn test_checkout_while_session_loading_asks_to_sign_in() {
    let mut settings = AppSettings::default();
    settings.session_token = Some("token-ada".into());
    let mut state = AppState::new(settings, Route::HOME_SKIP_INTRO, std::time::Instant::now());
    state.restore_session();
    assert!(state.session.is_loading());

    let now = std::time::Instant::now();
    state.configurator.select_size(Size::S).unwrap();
    state.configurator.submit(now).unwrap();
    assert_eq!(state.activate_checkout(now), CheckoutAction::SignIn);
}

// ── Session ──────────────────────────────────────────────────────

#[test]
fn test_sign_in_persists_token() {
    let mut h = StorefrontHarness::new();
    h.take_effects();
    h.sign_in_as("Ada");

    assert_eq!(h.state.settings.session_token.as_deref(), Some("token-ada"));
    let effects = h.take_effects();
    assert!(effects.contains(&Effect::SetToken(Some("token-ada".into()))));
    assert!(effects.contains(&Effect::SaveSettings));
}

#[test]
fn test_sign_out_clears_session() {
    let mut h = with_one_shirt();
    h.sign_in_as("Ada");
    h.take_effects();

    h.sign_out();
    assert_eq!(h.state.session, SessionState::Absent);
    assert_eq!(h.state.settings.session_token, None);
    let effects = h.take_effects();
    assert_eq!(effects[0], Effect::SignOut);
    assert!(effects.contains(&Effect::SetToken(None)));

    // Cart survives a sign-out
    assert_eq!(h.snapshot()["item_count"], 1);
    assert_eq!(h.checkout(), CheckoutAction::SignIn);
}

#[test]
fn test_late_session_rejection_is_ignored() {
    let mut h = StorefrontHarness::new();
    h.sign_in_as("Ada");
    h.apply_api_event(ApiEvent::SessionRejected);
    assert!(h.state.session.is_signed_in());
}

#[test]
fn test_failed_sign_in_keeps_dialog_open() {
    let mut h = with_one_shirt();
    h.checkout();
    h.state.sign_in.name = "Ada".into();
    h.state.submit_sign_in();
    assert!(h.state.sign_in.pending);

    h.apply_api_event(ApiEvent::Failed {
        request: ApiRequest::SignIn,
        message: "503 Service Unavailable".into(),
    });
    assert!(h.state.sign_in.open);
    assert!(!h.state.sign_in.pending);
    assert_eq!(h.state.sign_in.error.as_deref(), Some("503 Service Unavailable"));
    assert!(!h.state.session.is_signed_in());
}

// ── Profile ──────────────────────────────────────────────────────

#[test]
fn test_profile_create_then_refetch() {
    let mut h = StorefrontHarness::with_route(Route::HOME_SKIP_INTRO);
    h.sign_in_as("Ada");
    h.take_effects();

    h.navigate(Route::Profile);
    assert_eq!(h.take_effects(), vec![Effect::FetchAddresses]);
    assert!(h.state.profile.is_busy());

    h.apply_api_event(ApiEvent::AddressesLoaded(Vec::new()));
    assert!(!h.state.profile.is_busy());
    assert_eq!(h.state.profile.submit_label(), "Create");

    // Empty fields are flagged and nothing is sent
    h.state.submit_profile();
    assert_eq!(h.state.profile.errors.street, Some("Required"));
    assert!(h.take_effects().is_empty());

    let address = fixtures::sample_address("a1");
    h.state.profile.form.street = address.street.clone();
    h.state.profile.form.city = address.city.clone();
    h.state.profile.form.state = address.state.clone();
    h.state.profile.form.zip = address.zip.clone();
    h.state.submit_profile();
    assert!(h.state.profile.errors.is_empty());
    assert!(matches!(h.take_effects().as_slice(), [Effect::CreateAddress(input)] if input.city == "Portland"));

    h.apply_api_event(ApiEvent::AddressCreated(address.clone()));
    assert_eq!(h.take_effects(), vec![Effect::FetchAddresses]);

    h.apply_api_event(ApiEvent::AddressesLoaded(vec![address]));
    assert_eq!(h.state.profile.form.id.as_deref(), Some("a1"));
    assert_eq!(h.state.profile.submit_label(), "Update");
}

#[test]
fn test_profile_update_existing_address() {
    let mut h = StorefrontHarness::with_route(Route::Profile);
    h.sign_in_as("Ada");
    assert_eq!(h.take_effects().last(), Some(&Effect::FetchAddresses));
    h.apply_api_event(ApiEvent::AddressesLoaded(vec![fixtures::sample_address("a1")]));

    h.state.profile.form.zip = "97205".into();
    h.state.submit_profile();
    let effects = h.take_effects();
    let [Effect::UpdateAddresses(patches)] = effects.as_slice() else {
        panic!("expected one update, got {effects:?}");
    };
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].id, "a1");
    assert_eq!(patches[0].zip.as_deref(), Some("97205"));

    h.apply_api_event(ApiEvent::AddressesUpdated(vec![UpdateManyResult { count: 1 }]));
    assert!(!h.state.profile.saving);
    assert_eq!(h.state.profile.last_error, None);
    // Updates do not refetch
    assert!(h.take_effects().is_empty());
}

#[test]
fn test_failed_create_still_refetches() {
    let mut h = StorefrontHarness::with_route(Route::Profile);
    h.sign_in_as("Ada");
    h.apply_api_event(ApiEvent::AddressesLoaded(Vec::new()));
    h.state.profile.form.street = "1 Main".into();
    h.state.profile.form.city = "Austin".into();
    h.state.profile.form.state = "TX".into();
    h.state.profile.form.zip = "73301".into();
    h.state.submit_profile();
    h.take_effects();

    h.apply_api_event(ApiEvent::Failed {
        request: ApiRequest::CreateAddress,
        message: "500".into(),
    });
    assert_eq!(h.state.profile.last_error.as_deref(), Some("500"));
    assert_eq!(h.take_effects(), vec![Effect::FetchAddresses]);
}

#[test]
fn test_profile_signed_out_fetches_nothing() {
    let mut h = StorefrontHarness::new();
    h.navigate(Route::Profile);
    assert!(h.take_effects().is_empty());
    assert!(!h.state.profile.loading);
}

// ── Intro ────────────────────────────────────────────────────────

#[test]
fn test_intro_hides_after_two_seconds() {
    let mut h = StorefrontHarness::new();
    assert_eq!(h.snapshot()["intro_visible"], true);

    h.advance(Duration::from_millis(1999));
    assert!(h.state.intro.is_visible());
    h.advance(Duration::from_millis(1));
    assert!(!h.state.intro.is_visible());
}

#[test]
fn test_logo_route_skips_intro() {
    let h = StorefrontHarness::with_route(Route::HOME_SKIP_INTRO);
    assert!(!h.state.intro.is_visible());
    assert_eq!(h.state.next_deadline(), None);
}

#[test]
fn test_navigating_home_rearms_intro() {
    let mut h = StorefrontHarness::with_route(Route::Checkout);
    assert!(!h.state.intro.is_visible());

    h.navigate(Route::default());
    assert!(h.state.intro.is_visible());
    h.advance(Duration::from_secs(2));
    assert!(!h.state.intro.is_visible());
}
