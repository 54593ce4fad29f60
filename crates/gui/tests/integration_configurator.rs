//! Integration tests for the configurator store: stock accounting, quantity
//! bounding, cart merging and the "added to cart" tip.

use std::time::Duration;

use shared::{AddOutcome, Color, Decal, Size};
use stylecrop_gui_lib::harness::StorefrontHarness;
use stylecrop_gui_lib::state::SubmitError;

#[test]
fn test_single_line_reduces_available_stock() {
    for size in Size::ALL {
        let catalog = size.catalog_stock();
        if catalog == 0 {
            continue;
        }
        let mut h = StorefrontHarness::new();
        h.add(Color::Green, Decal::Nextjs, size, 1).unwrap();
        assert_eq!(
            h.state.configurator.available_stock().get(size),
            catalog - 1,
            "size {}",
            size.id()
        );
        // Other sizes untouched
        for other in Size::ALL.into_iter().filter(|s| *s != size) {
            assert_eq!(h.state.configurator.available_stock().get(other), other.catalog_stock());
        }
    }
}

#[test]
fn test_identical_lines_merge() {
    let mut h = StorefrontHarness::new();
    assert_eq!(
        h.add(Color::Red, Decal::React, Size::Xl, 2).unwrap(),
        AddOutcome::Appended { index: 0 }
    );
    assert_eq!(
        h.add(Color::Red, Decal::React, Size::Xl, 1).unwrap(),
        AddOutcome::Merged { index: 0 }
    );
    let cart = h.state.configurator.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 3);
    assert_eq!(cart.subtotal(), 3 * shared::UNIT_PRICE_USD);
}

#[test]
fn test_same_size_other_decal_is_not_subtracted() {
    // Stock is derived from the first line of each size only
    let mut h = StorefrontHarness::new();
    h.add(Color::White, Decal::React, Size::Xxl, 2).unwrap();
    h.add(Color::White, Decal::Dodgecoin, Size::Xxl, 3).unwrap();

    let cart = h.state.configurator.cart();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 5);
    assert_eq!(
        h.state.configurator.available_stock().get(Size::Xxl),
        Size::Xxl.catalog_stock() - 2
    );
}

#[test]
fn test_quantity_input_is_sanitized_and_clamped() {
    let mut h = StorefrontHarness::new();
    h.select_size(Size::M).unwrap();
    assert_eq!(h.state.configurator.available_for_selected(), Some(3));

    assert_eq!(h.set_quantity("10"), 3);
    assert_eq!(h.set_quantity("-5"), 3);
    assert_eq!(h.set_quantity("-2"), 2);
    assert_eq!(h.set_quantity("abc"), 0);
    assert_eq!(h.set_quantity("1.0"), 3);
}

#[test]
fn test_quantity_unbounded_without_size() {
    let mut h = StorefrontHarness::new();
    assert_eq!(h.set_quantity("250"), 250);
    // Choosing a size clamps the pending quantity
    h.select_size(Size::Xs).unwrap();
    assert_eq!(h.state.configurator.quantity(), 4);
}

#[test]
fn test_out_of_stock_size_cannot_be_chosen() {
    let mut h = StorefrontHarness::new();
    assert_eq!(Size::L.catalog_stock(), 0);
    assert!(!h.state.configurator.is_size_selectable(Size::L));
    assert_eq!(
        h.select_size(Size::L),
        Err(SubmitError::SizeUnavailable("L".into()))
    );
    assert_eq!(h.state.configurator.size(), None);
}

#[test]
fn test_add_to_cart_disabled_against_catalog_stock() {
    let c = stylecrop_gui_lib::state::Configurator::default();
    assert!(!c.add_to_cart_disabled());

    // Quantity equal to the catalog stock is still allowed
    let mut h = StorefrontHarness::new();
    h.select_size(Size::Xs).unwrap();
    h.set_quantity("4");
    assert!(!h.state.configurator.add_to_cart_disabled());

    // Remaining stock drops, catalog guard does not follow it
    h.add_to_cart().unwrap();
    assert_eq!(h.state.configurator.available_stock().get(Size::Xs), 0);
    assert!(!h.state.configurator.add_to_cart_disabled());
}

#[test]
fn test_submit_without_size() {
    let mut h = StorefrontHarness::new();
    assert_eq!(h.add_to_cart(), Err(SubmitError::NoSize));
    assert!(h.state.configurator.cart().is_empty());
    assert!(!h.added_tip_visible());
}

#[test]
fn test_medium_scenario() {
    let mut h = StorefrontHarness::new();

    h.add(Color::White, Decal::React, Size::M, 2).unwrap();
    let snap = h.snapshot();
    assert_eq!(
        snap["cart"],
        serde_json::json!([{ "color": "#ccc", "size": "m", "decal": "react", "quantity": 2 }])
    );
    assert_eq!(snap["available_stock"]["m"], 1);
    // Quantity re-clamped to the one remaining shirt
    assert_eq!(h.state.configurator.quantity(), 1);

    h.set_quantity("1");
    h.add_to_cart().unwrap();
    let snap = h.snapshot();
    assert_eq!(snap["cart"][0]["quantity"], 3);
    assert_eq!(snap["cart"].as_array().unwrap().len(), 1);
    assert_eq!(snap["available_stock"]["m"], 0);
    assert_eq!(snap["quantity"], 0);

    // Live clamp wins: a third shirt cannot be entered, so the submit is rejected
    assert_eq!(h.set_quantity("1"), 0);
    assert!(!h.state.configurator.add_to_cart_disabled());
    assert_eq!(h.add_to_cart(), Err(SubmitError::ZeroQuantity));
    assert_eq!(h.state.configurator.cart().item_count(), 3);
    assert!(!h.state.configurator.is_size_selectable(Size::M));
}

#[test]
fn test_added_tip_clears_once_after_last_add() {
    let mut h = StorefrontHarness::new();
    h.add(Color::Yellow, Decal::React, Size::S, 1).unwrap();
    assert!(h.added_tip_visible());

    h.advance(Duration::from_secs(1));
    h.add(Color::Yellow, Decal::React, Size::S, 1).unwrap();
    let second = h.now();

    let mut clears = Vec::new();
    for _ in 0..60 {
        let before = h.added_tip_visible();
        h.advance(Duration::from_millis(100));
        if before && !h.added_tip_visible() {
            clears.push(h.now());
        }
    }
    assert_eq!(clears.len(), 1);
    let delay = clears[0] - second;
    assert!(delay >= Duration::from_secs(3) && delay < Duration::from_millis(3100));
}

#[test]
fn test_color_and_decal_do_not_touch_cart() {
    let mut h = StorefrontHarness::new();
    h.select_color(Color::Purple);
    h.select_decal(Decal::Dodgecoin);
    let snap = h.snapshot();
    assert_eq!(snap["color"], "#726DE8");
    assert_eq!(snap["decal"], "dodgecoin");
    assert_eq!(snap["item_count"], 0);
}
