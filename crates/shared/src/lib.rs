use serde::{Deserialize, Serialize};

pub mod cart;
pub mod catalog;
pub mod configurator;
pub mod route;

pub use cart::{
    available_stock, clamp_quantity, parse_quantity_input, AddOutcome, Cart, CartLine,
};
pub use catalog::{
    format_usd, parse_hex_rgb, Color, Decal, Size, StockLevels, DEFAULT_PROFILE_IMAGE,
    ENVIRONMENT_PATH, PREVIEW_FILE_NAME, SHIRT_MESH_PATH, UNIT_PRICE_USD,
};
pub use configurator::{ConfiguratorCore, SubmitError};
pub use route::Route;

/// Уникальный идентификатор пользователя
pub type UserId = String;

/// Уникальный идентификатор адреса доставки (назначается сервером)
pub type AddressId = String;

/// Адрес доставки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Данные для создания адреса
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryAddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Частичное обновление адреса: отсутствующие поля не меняются
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryAddressPatch {
    /// Может отсутствовать в теле `PATCH /api/delivery-addresses/{id}`: там id берётся из пути
    #[serde(default)]
    pub id: AddressId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl DeliveryAddressPatch {
    /// Полная замена всех полей адреса
    pub fn full(id: AddressId, input: DeliveryAddressInput) -> Self {
        Self {
            id,
            street: Some(input.street),
            city: Some(input.city),
            state: Some(input.state),
            zip: Some(input.zip),
        }
    }
}

impl DeliveryAddress {
    /// Применить частичное обновление
    pub fn apply(&mut self, patch: &DeliveryAddressPatch) {
        if let Some(street) = &patch.street {
            self.street = street.clone();
        }
        if let Some(city) = &patch.city {
            self.city = city.clone();
        }
        if let Some(state) = &patch.state {
            self.state = state.clone();
        }
        if let Some(zip) = &patch.zip {
            self.zip = zip.clone();
        }
    }
}

/// Результат массового обновления для одного элемента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateManyResult {
    pub count: u64,
}

/// Пользователь текущей сессии
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SessionUser {
    /// Картинка аватара или аватар по умолчанию
    pub fn image_or_default(&self) -> &str {
        self.image
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_PROFILE_IMAGE)
    }
}

/// Запрос на вход
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Ответ на вход: токен сессии и пользователь
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: SessionUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_skips_missing_fields() {
        let patch = DeliveryAddressPatch {
            id: "a1".into(),
            city: Some("Lyon".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "a1", "city": "Lyon" }));

        let mut address = DeliveryAddress {
            id: "a1".into(),
            street: "1 Main St".into(),
            city: "Paris".into(),
            state: "IDF".into(),
            zip: "75001".into(),
        };
        address.apply(&patch);
        assert_eq!(address.city, "Lyon");
        assert_eq!(address.street, "1 Main St");
    }

    #[test]
    fn test_patch_parses_partial_json() {
        let patch: DeliveryAddressPatch =
            serde_json::from_str(r#"{"id": "x", "zip": "10001"}"#).unwrap();
        assert_eq!(patch.zip.as_deref(), Some("10001"));
        assert!(patch.street.is_none());
    }

    #[test]
    fn test_patch_id_is_optional_in_body() {
        let patch: DeliveryAddressPatch = serde_json::from_str(r#"{"city": "Salem"}"#).unwrap();
        assert_eq!(patch.id, "");
        assert_eq!(patch.city.as_deref(), Some("Salem"));
    }

    #[test]
    fn test_session_user_default_image() {
        let user = SessionUser {
            id: "u".into(),
            name: "Ada".into(),
            image: Some(String::new()),
        };
        assert_eq!(user.image_or_default(), DEFAULT_PROFILE_IMAGE);
    }
}
