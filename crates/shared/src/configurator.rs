use crate::cart::{available_stock, clamp_quantity, parse_quantity_input, AddOutcome, Cart};
use crate::catalog::{Color, Decal, Size, StockLevels, UNIT_PRICE_USD};

/// Почему выбор нельзя добавить в корзину
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("choose a size first")]
    NoSize,
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("only {stock} of size {size} in stock, requested {quantity}")]
    OverCatalogStock {
        size: String,
        stock: i64,
        quantity: u32,
    },
    #[error("size {0} is out of stock")]
    SizeUnavailable(String),
}

/// Ядро конфигуратора без часов: текущий выбор, корзина и остатки.
///
/// Подсказку "добавлено в корзину" с таймером держит обёртка на стороне UI.
#[derive(Debug, Clone)]
pub struct ConfiguratorCore {
    catalog: StockLevels,
    color: Color,
    decal: Decal,
    size: Option<Size>,
    quantity: u32,
    cart: Cart,
    /// Производное от (catalog, cart), пересчитывается при каждом изменении корзины
    available: StockLevels,
}

impl Default for ConfiguratorCore {
    fn default() -> Self {
        Self::new(StockLevels::catalog())
    }
}

impl ConfiguratorCore {
    pub fn new(catalog: StockLevels) -> Self {
        let cart = Cart::new();
        let available = available_stock(&catalog, &cart);
        Self {
            catalog,
            color: Color::default(),
            decal: Decal::default(),
            size: None,
            quantity: 1,
            cart,
            available,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn select_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn decal(&self) -> Decal {
        self.decal
    }

    pub fn select_decal(&mut self, decal: Decal) {
        self.decal = decal;
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Выбрать размер и обрезать количество его остатком.
    /// Размер без остатка выбрать нельзя.
    pub fn select_size(&mut self, size: Size) -> Result<(), SubmitError> {
        if !self.is_size_selectable(size) {
            return Err(SubmitError::SizeUnavailable(size.label()));
        }
        self.size = Some(size);
        self.quantity = clamp_quantity(self.quantity, self.available_for_selected());
        Ok(())
    }

    pub fn is_size_selectable(&self, size: Size) -> bool {
        self.available.get(size) > 0
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Сырой текст из поля количества. Возвращает сохранённое значение.
    pub fn set_quantity_input(&mut self, text: &str) -> u32 {
        self.set_quantity(parse_quantity_input(text))
    }

    pub fn set_quantity(&mut self, quantity: u32) -> u32 {
        self.quantity = clamp_quantity(quantity, self.available_for_selected());
        self.quantity
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &StockLevels {
        &self.catalog
    }

    pub fn available_stock(&self) -> &StockLevels {
        &self.available
    }

    /// Остаток выбранного размера; `None`, пока размер не выбран
    pub fn available_for_selected(&self) -> Option<i64> {
        self.size.map(|size| self.available.get(size))
    }

    /// Грубая проверка: сравнение с остатком по каталогу, а не с текущим остатком
    pub fn is_over_catalog_stock(&self) -> bool {
        self.size
            .is_some_and(|size| self.quantity as i64 > self.catalog.get(size))
    }

    pub fn add_to_cart_disabled(&self) -> bool {
        self.is_over_catalog_stock()
    }

    /// Стоимость текущего выбора
    pub fn line_total(&self) -> u64 {
        self.quantity as u64 * UNIT_PRICE_USD
    }

    /// Добавить выбор в корзину: пересчитать остатки и обрезать количество
    pub fn commit(&mut self) -> Result<AddOutcome, SubmitError> {
        let size = self.size.ok_or(SubmitError::NoSize)?;
        if self.quantity == 0 {
            return Err(SubmitError::ZeroQuantity);
        }
        if self.is_over_catalog_stock() {
            return Err(SubmitError::OverCatalogStock {
                size: size.label(),
                stock: self.catalog.get(size),
                quantity: self.quantity,
            });
        }

        let outcome = self.cart.add(self.color, size, self.decal, self.quantity);
        self.available = available_stock(&self.catalog, &self.cart);
        self.quantity = clamp_quantity(self.quantity, Some(self.available.get(size)));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_with_size(size: Size) -> ConfiguratorCore {
        let mut c = ConfiguratorCore::default();
        c.select_size(size).unwrap();
        c
    }

    #[test]
    fn test_defaults() {
        let c = ConfiguratorCore::default();
        assert_eq!(c.color(), Color::White);
        assert_eq!(c.decal(), Decal::React);
        assert_eq!(c.size(), None);
        assert_eq!(c.quantity(), 1);
        assert!(c.cart().is_empty());
        assert!(!c.add_to_cart_disabled());
    }

    #[test]
    fn test_quantity_unbounded_without_size() {
        let mut c = ConfiguratorCore::default();
        assert_eq!(c.set_quantity_input("250"), 250);
        assert_eq!(c.available_for_selected(), None);
    }

    #[test]
    fn test_size_change_clamps_quantity() {
        let mut c = ConfiguratorCore::default();
        c.set_quantity_input("6");
        c.select_size(Size::M).unwrap();
        assert_eq!(c.quantity(), 3);
    }

    #[test]
    fn test_quantity_input_sanitizing() {
        let mut c = core_with_size(Size::M);
        assert_eq!(c.set_quantity_input("10"), 3);
        assert_eq!(c.set_quantity_input("-5"), 3);
        assert_eq!(c.set_quantity_input("-2"), 2);
        assert_eq!(c.set_quantity_input("abc"), 0);
    }

    #[test]
    fn test_out_of_stock_size_cannot_be_selected() {
        let mut c = ConfiguratorCore::default();
        assert_eq!(
            c.select_size(Size::L),
            Err(SubmitError::SizeUnavailable("L".into()))
        );
        assert_eq!(c.size(), None);
    }

    #[test]
    fn test_disabled_exactly_when_over_catalog_stock() {
        let mut c = core_with_size(Size::Xs);
        c.set_quantity(4);
        assert!(!c.add_to_cart_disabled());

        c.quantity = 5;
        assert!(c.add_to_cart_disabled());
        assert_eq!(
            c.commit(),
            Err(SubmitError::OverCatalogStock {
                size: "XS".into(),
                stock: 4,
                quantity: 5
            })
        );

        // L has a catalog stock of 0, so any positive quantity is disabled
        let mut c = ConfiguratorCore::default();
        c.size = Some(Size::L);
        c.quantity = 1;
        assert!(c.add_to_cart_disabled());
    }

    #[test]
    fn test_commit_requires_size_and_quantity() {
        let mut c = ConfiguratorCore::default();
        assert_eq!(c.commit(), Err(SubmitError::NoSize));
        c.select_size(Size::S).unwrap();
        c.set_quantity_input("0");
        assert_eq!(c.commit(), Err(SubmitError::ZeroQuantity));
        assert!(c.cart().is_empty());
    }

    #[test]
    fn test_commit_reclamps_quantity() {
        let mut c = core_with_size(Size::Xl);
        c.set_quantity(4);
        assert_eq!(c.commit(), Ok(AddOutcome::Appended { index: 0 }));
        assert_eq!(c.available_stock().get(Size::Xl), 1);
        assert_eq!(c.quantity(), 1);
    }

    #[test]
    fn test_medium_scenario() {
        let mut c = ConfiguratorCore::default();
        c.select_size(Size::M).unwrap();
        c.set_quantity(2);
        assert_eq!(c.commit(), Ok(AddOutcome::Appended { index: 0 }));
        assert_eq!(c.available_stock().get(Size::M), 1);

        c.set_quantity(1);
        assert_eq!(c.commit(), Ok(AddOutcome::Merged { index: 0 }));
        assert_eq!(c.cart().lines()[0].quantity, 3);
        assert_eq!(c.available_stock().get(Size::M), 0);

        assert_eq!(c.set_quantity(1), 0);
        assert!(!c.add_to_cart_disabled());
        assert_eq!(c.commit(), Err(SubmitError::ZeroQuantity));
    }

    #[test]
    fn test_line_total() {
        let mut c = core_with_size(Size::S);
        c.set_quantity(3);
        assert_eq!(c.line_total(), 135);
    }
}
