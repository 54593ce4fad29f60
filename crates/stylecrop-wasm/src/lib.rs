use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{
    AddOutcome, CartLine, Color, ConfiguratorCore, Decal, Size, StockLevels, SubmitError,
    UNIT_PRICE_USD,
};

/// Снимок состояния конфигуратора для JS
#[derive(Serialize)]
struct ConfiguratorView<'a> {
    color: Color,
    decal: Decal,
    size: Option<Size>,
    quantity: u32,
    line_total: u64,
    add_to_cart_disabled: bool,
    cart: &'a [CartLine],
    item_count: u64,
    subtotal: u64,
}

/// Конфигуратор футболки поверх общего ядра.
/// Таймер подсказки "добавлено" остаётся на стороне JS.
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmConfigurator {
    core: ConfiguratorCore,
}

#[wasm_bindgen]
impl WasmConfigurator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Цвет по HEX-значению образца ("#EFBD4E")
    pub fn select_color(&mut self, hex: &str) -> Result<(), JsError> {
        let color = parse_color(hex).map_err(|e| JsError::new(&e))?;
        self.core.select_color(color);
        Ok(())
    }

    pub fn select_decal(&mut self, id: &str) -> Result<(), JsError> {
        let decal = parse_decal(id).map_err(|e| JsError::new(&e))?;
        self.core.select_decal(decal);
        Ok(())
    }

    /// Выбор размера; количество обрезается остатком
    pub fn select_size(&mut self, id: &str) -> Result<u32, JsError> {
        self.try_select_size(id).map_err(|e| JsError::new(&e))
    }

    /// Текст из поля количества; возвращает сохранённое значение
    pub fn set_quantity_input(&mut self, text: &str) -> u32 {
        self.core.set_quantity_input(text)
    }

    /// Добавить текущий выбор в корзину. Возвращает индекс позиции.
    pub fn submit(&mut self) -> Result<usize, JsError> {
        self.try_submit().map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn add_to_cart_disabled(&self) -> bool {
        self.core.add_to_cart_disabled()
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.view()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Остатки по размерам: `{"xs": 4, ...}`
    pub fn available_stock_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&stock_map(self.core.available_stock()))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Размеры, которые ещё можно выбрать
    pub fn selectable_sizes(&self) -> js_sys::Array {
        Size::ALL
            .into_iter()
            .filter(|s| self.core.is_size_selectable(*s))
            .map(|s| JsValue::from_str(s.id()))
            .collect()
    }
}

impl WasmConfigurator {
    fn try_select_size(&mut self, id: &str) -> Result<u32, String> {
        let size = Size::parse(id).ok_or_else(|| format!("Unknown size '{id}'"))?;
        self.core.select_size(size).map_err(|e| e.to_string())?;
        Ok(self.core.quantity())
    }

    fn try_submit(&mut self) -> Result<usize, SubmitError> {
        Ok(match self.core.commit()? {
            AddOutcome::Merged { index } | AddOutcome::Appended { index } => index,
        })
    }

    fn view(&self) -> ConfiguratorView<'_> {
        let cart = self.core.cart();
        ConfiguratorView {
            color: self.core.color(),
            decal: self.core.decal(),
            size: self.core.size(),
            quantity: self.core.quantity(),
            line_total: self.core.line_total(),
            add_to_cart_disabled: self.core.add_to_cart_disabled(),
            cart: cart.lines(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
        }
    }
}

fn parse_color(hex: &str) -> Result<Color, String> {
    Color::from_hex(hex).ok_or_else(|| format!("Unknown color '{hex}'"))
}

fn parse_decal(id: &str) -> Result<Decal, String> {
    Decal::parse(id).ok_or_else(|| format!("Unknown decal '{id}'"))
}

fn stock_map(levels: &StockLevels) -> serde_json::Map<String, serde_json::Value> {
    levels
        .iter()
        .map(|(size, n)| (size.id().to_string(), n.into()))
        .collect()
}

fn catalog_value() -> serde_json::Value {
    serde_json::json!({
        "unit_price": UNIT_PRICE_USD,
        "colors": Color::ALL.map(|c| serde_json::json!({ "hex": c.hex(), "name": c.name() })),
        "decals": Decal::ALL.map(|d| serde_json::json!({ "id": d.id(), "name": d.name() })),
        "stock": stock_map(&StockLevels::catalog()),
    })
}

/// Каталог: цвета, наклейки, цена и складские остатки
#[wasm_bindgen]
pub fn catalog_json() -> String {
    catalog_value().to_string()
}

/// Цена в долларах: `$1,350.00`
#[wasm_bindgen]
pub fn format_usd(amount: u64) -> String {
    shared::format_usd(amount)
}
