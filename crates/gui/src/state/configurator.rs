//! Product configurator: the shared selection/cart core plus the "added to cart" tip.

use std::time::Instant;

use shared::{AddOutcome, Cart, Color, ConfiguratorCore, Decal, Size, StockLevels};

pub use shared::SubmitError;

use super::timer::TransientFlag;

/// Selection + cart store shared by the overlay, navbar and viewport
#[derive(Debug, Clone, Default)]
pub struct Configurator {
    core: ConfiguratorCore,
    /// "Item was added in the cart" tip
    pub added_to_cart: TransientFlag,
}

impl Configurator {
    pub fn new(catalog: StockLevels) -> Self {
        Self {
            core: ConfiguratorCore::new(catalog),
            added_to_cart: TransientFlag::default(),
        }
    }

    // ── Selection ─────────────────────────────────────────────

    pub fn color(&self) -> Color {
        self.core.color()
    }

    pub fn select_color(&mut self, color: Color) {
        self.core.select_color(color);
    }

    pub fn decal(&self) -> Decal {
        self.core.decal()
    }

    pub fn select_decal(&mut self, decal: Decal) {
        self.core.select_decal(decal);
    }

    pub fn size(&self) -> Option<Size> {
        self.core.size()
    }

    pub fn select_size(&mut self, size: Size) -> Result<(), SubmitError> {
        self.core.select_size(size)
    }

    pub fn is_size_selectable(&self, size: Size) -> bool {
        self.core.is_size_selectable(size)
    }

    pub fn quantity(&self) -> u32 {
        self.core.quantity()
    }

    /// Raw text from the quantity field. Returns the stored value.
    pub fn set_quantity_input(&mut self, text: &str) -> u32 {
        self.core.set_quantity_input(text)
    }

    pub fn set_quantity(&mut self, quantity: u32) -> u32 {
        self.core.set_quantity(quantity)
    }

    // ── Derived ───────────────────────────────────────────────

    pub fn cart(&self) -> &Cart {
        self.core.cart()
    }

    pub fn available_stock(&self) -> &StockLevels {
        self.core.available_stock()
    }

    pub fn available_for_selected(&self) -> Option<i64> {
        self.core.available_for_selected()
    }

    pub fn is_over_catalog_stock(&self) -> bool {
        self.core.is_over_catalog_stock()
    }

    pub fn add_to_cart_disabled(&self) -> bool {
        self.core.add_to_cart_disabled()
    }

    pub fn line_total(&self) -> u64 {
        self.core.line_total()
    }

    // ── Commit ────────────────────────────────────────────────

    /// Commit the selection into the cart and raise the tip
    pub fn submit(&mut self, now: Instant) -> Result<AddOutcome, SubmitError> {
        let outcome = self.core.commit()?;
        self.added_to_cart.raise(now);

        let cart = self.core.cart();
        tracing::info!(
            "Cart {:?}: {} | now {} items",
            outcome,
            cart.lines()[outcome_index(outcome)].summary(),
            cart.item_count()
        );
        Ok(outcome)
    }

    /// Advance timers; true when the "added" tip just cleared
    pub fn tick(&mut self, now: Instant) -> bool {
        self.added_to_cart.poll(now)
    }
}

fn outcome_index(outcome: AddOutcome) -> usize {
    match outcome {
        AddOutcome::Merged { index } | AddOutcome::Appended { index } => index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rejected_submit_keeps_tip_down() {
        let now = Instant::now();
        let mut c = Configurator::default();
        assert_eq!(c.submit(now), Err(SubmitError::NoSize));
        c.select_size(Size::S).unwrap();
        c.set_quantity_input("0");
        assert_eq!(c.submit(now), Err(SubmitError::ZeroQuantity));
        assert!(!c.added_to_cart.is_visible());
        assert_eq!(c.added_to_cart.deadline(), None);
    }

    #[test]
    fn test_submit_raises_flag_for_three_seconds() {
        let now = Instant::now();
        let mut c = Configurator::default();
        c.select_size(Size::Xl).unwrap();
        c.set_quantity(4);
        assert_eq!(c.submit(now), Ok(AddOutcome::Appended { index: 0 }));
        assert_eq!(c.quantity(), 1);
        assert!(c.added_to_cart.is_visible());
        assert!(!c.tick(now + Duration::from_millis(2999)));
        assert!(c.tick(now + Duration::from_secs(3)));
        assert!(!c.added_to_cart.is_visible());
    }

    #[test]
    fn test_custom_catalog() {
        let mut c = Configurator::new(StockLevels::from_fn(|_| 1));
        c.select_size(Size::L).unwrap();
        c.submit(Instant::now()).unwrap();
        assert!(!c.is_size_selectable(Size::L));
        assert_eq!(c.available_stock().get(Size::M), 1);
    }
}
