use serde::{Deserialize, Serialize};

/// Цена одной футболки в долларах
pub const UNIT_PRICE_USD: u64 = 45;

/// Путь к 3D-модели футболки
pub const SHIRT_MESH_PATH: &str = "/shirt_baked_collapsed.glb";
/// Путь к HDR-окружению
pub const ENVIRONMENT_PATH: &str = "/default_env.hdr";
/// Аватар по умолчанию
pub const DEFAULT_PROFILE_IMAGE: &str = "/default_profile.jpg";
/// Имя файла при скачивании превью
pub const PREVIEW_FILE_NAME: &str = "teeshirt_preview.png";

/// Цвет футболки (фиксированный набор образцов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "#ccc")]
    White,
    #[serde(rename = "#EFBD4E")]
    Yellow,
    #[serde(rename = "#80C670")]
    Green,
    #[serde(rename = "#726DE8")]
    Purple,
    #[serde(rename = "#EF674E")]
    Red,
    #[serde(rename = "#353934")]
    Black,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Green,
        Color::Purple,
        Color::Red,
        Color::Black,
    ];

    /// HEX-значение образца
    pub fn hex(&self) -> &'static str {
        match self {
            Color::White => "#ccc",
            Color::Yellow => "#EFBD4E",
            Color::Green => "#80C670",
            Color::Purple => "#726DE8",
            Color::Red => "#EF674E",
            Color::Black => "#353934",
        }
    }

    /// Название для отображения
    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Purple => "Purple",
            Color::Red => "Red",
            Color::Black => "Black",
        }
    }

    /// Поиск по HEX (регистр не важен)
    pub fn from_hex(hex: &str) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex.trim()))
    }

    /// RGB в диапазоне 0..1
    pub fn rgb(&self) -> [f32; 3] {
        let [r, g, b] = self.rgb8();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// RGB в диапазоне 0..255
    pub fn rgb8(&self) -> [u8; 3] {
        parse_hex_rgb(self.hex()).unwrap_or([0, 0, 0])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::ALL[0]
    }
}

/// Разбор `#rgb` / `#rrggbb`
pub fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in digits.chars().enumerate() {
                let v = ch.to_digit(16)? as u8;
                out[i] = v * 16 + v;
            }
            Some(out)
        }
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        _ => None,
    }
}

/// Картинка-наклейка на футболке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decal {
    React,
    Dodgecoin,
    Nextjs,
}

impl Decal {
    pub const ALL: [Decal; 3] = [Decal::React, Decal::Dodgecoin, Decal::Nextjs];

    /// Идентификатор (совпадает с именем файла)
    pub fn id(&self) -> &'static str {
        match self {
            Decal::React => "react",
            Decal::Dodgecoin => "dodgecoin",
            Decal::Nextjs => "nextjs",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Decal::React => "React",
            Decal::Dodgecoin => "Dodgecoin",
            Decal::Nextjs => "Next.js",
        }
    }

    /// Путь к картинке: `/{id}.png`
    pub fn asset_path(&self) -> String {
        format!("/{}.png", self.id())
    }

    pub fn parse(id: &str) -> Option<Decal> {
        Decal::ALL.into_iter().find(|d| d.id() == id.trim())
    }
}

impl Default for Decal {
    fn default() -> Self {
        Decal::ALL[0]
    }
}

/// Размер (упорядочен от xs до xxxl)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
    Xxxl,
}

impl Size {
    pub const COUNT: usize = 7;
    pub const ALL: [Size; Size::COUNT] = [
        Size::Xs,
        Size::S,
        Size::M,
        Size::L,
        Size::Xl,
        Size::Xxl,
        Size::Xxxl,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Size::Xs => "xs",
            Size::S => "s",
            Size::M => "m",
            Size::L => "l",
            Size::Xl => "xl",
            Size::Xxl => "xxl",
            Size::Xxxl => "xxxl",
        }
    }

    /// Подпись в верхнем регистре ("XL")
    pub fn label(&self) -> String {
        self.id().to_uppercase()
    }

    /// Складской остаток по каталогу
    pub fn catalog_stock(&self) -> i64 {
        match self {
            Size::Xs => 4,
            Size::S => 6,
            Size::M => 3,
            Size::L => 0,
            Size::Xl => 5,
            Size::Xxl => 6,
            Size::Xxxl => 7,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn parse(id: &str) -> Option<Size> {
        let id = id.trim();
        Size::ALL.into_iter().find(|s| s.id().eq_ignore_ascii_case(id))
    }
}

/// Остатки по размерам. Значения знаковые: вычитание не обрезается нулём.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    levels: [i64; Size::COUNT],
}

impl StockLevels {
    /// Остатки из каталога
    pub fn catalog() -> Self {
        Self {
            levels: Size::ALL.map(|s| s.catalog_stock()),
        }
    }

    pub fn from_fn(f: impl Fn(Size) -> i64) -> Self {
        Self {
            levels: Size::ALL.map(f),
        }
    }

    pub fn get(&self, size: Size) -> i64 {
        self.levels[size.index()]
    }

    pub fn set(&mut self, size: Size, value: i64) {
        self.levels[size.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Size, i64)> + '_ {
        Size::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

impl Default for StockLevels {
    fn default() -> Self {
        Self::catalog()
    }
}

/// Формат цены как `Intl.NumberFormat("en-US", { currency: "USD" })`: `$1,350.00`
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.00")
}
