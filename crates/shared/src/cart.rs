use serde::{Deserialize, Serialize};

use crate::catalog::{Color, Decal, Size, StockLevels, UNIT_PRICE_USD};

/// Позиция корзины. Ключ уникальности — (color, size, decal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub color: Color,
    pub size: Size,
    pub decal: Decal,
    pub quantity: u32,
}

impl CartLine {
    pub fn matches(&self, color: Color, size: Size, decal: Decal) -> bool {
        self.color == color && self.size == size && self.decal == decal
    }

    /// Стоимость позиции
    pub fn total(&self) -> u64 {
        self.quantity as u64 * UNIT_PRICE_USD
    }

    /// Краткое описание: "White | M | React decal"
    pub fn summary(&self) -> String {
        [
            self.color.name().to_string(),
            self.size.label(),
            format!("{} decal", self.decal.name()),
        ]
        .join(" | ")
    }
}

/// Результат добавления в корзину
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Количество прибавлено к существующей позиции
    Merged { index: usize },
    /// Добавлена новая позиция в конец
    Appended { index: usize },
}

/// Корзина: порядок позиций — порядок первого добавления
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Добавить позицию: совпадение по ключу суммирует количество, иначе — новая позиция в конце
    pub fn add(&mut self, color: Color, size: Size, decal: Decal, quantity: u32) -> AddOutcome {
        let found = self
            .lines
            .iter()
            .position(|line| line.matches(color, size, decal));
        match found {
            Some(index) => {
                self.lines[index].quantity += quantity;
                AddOutcome::Merged { index }
            }
            None => {
                self.lines.push(CartLine {
                    color,
                    size,
                    decal,
                    quantity,
                });
                AddOutcome::Appended {
                    index: self.lines.len() - 1,
                }
            }
        }
    }

    /// Первая позиция с данным размером (цвет и наклейка не учитываются)
    pub fn first_line_of_size(&self, size: Size) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.size == size)
    }

    /// Общее количество товаров
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }

    /// Сумма заказа в долларах
    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::total).sum()
    }
}

/// Доступный остаток по размерам: остаток каталога минус количество в корзине.
///
/// Для каждого размера учитывается только ПЕРВАЯ позиция с этим размером;
/// другие позиции того же размера (с другим цветом/наклейкой) не вычитаются.
/// Результат не обрезается нулём.
pub fn available_stock(catalog: &StockLevels, cart: &Cart) -> StockLevels {
    StockLevels::from_fn(|size| {
        let committed = cart
            .first_line_of_size(size)
            .map(|line| line.quantity as i64)
            .unwrap_or(0);
        catalog.get(size) - committed
    })
}

/// Разбор поля количества: убираются `-` и `.`, затем читаются ведущие цифры.
/// Нечитаемое значение даёт 0.
pub fn parse_quantity_input(text: &str) -> u32 {
    let cleaned: String = text.chars().filter(|c| *c != '-' && *c != '.').collect();
    let trimmed = cleaned.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d))
}

/// Ограничить количество остатком. `None` означает "без ограничения".
/// Отрицательный остаток даёт 0.
pub fn clamp_quantity(quantity: u32, limit: Option<i64>) -> u32 {
    match limit {
        Some(limit) => (quantity as i64).min(limit.max(0)) as u32,
        None => quantity,
    }
}
