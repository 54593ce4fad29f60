use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::Language;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lang {
    En,
    Ru,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

impl From<Language> for Lang {
    fn from(language: Language) -> Self {
        match language {
            Language::En => Lang::En,
            Language::Ru => Lang::Ru,
        }
    }
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    translate(key, lang())
}

pub fn translate(key: &str, lang: Lang) -> &'static str {
    let ru = lang == Lang::Ru;
    match key {
        // ── Navbar ──────────────────────────────────────────
        "nav.items" => if ru { "Товаров" } else { "Items" },
        "nav.subtotal" => if ru { "Итого" } else { "Subtotal" },
        "nav.cart_empty" => if ru { "Корзина пуста" } else { "Your cart is empty" },
        "nav.checkout" => if ru { "Оформить заказ" } else { "Checkout" },
        "nav.added" => if ru { "Товар добавлен в корзину" } else { "Item was added in the cart" },
        "nav.sign_in" => if ru { "Войти" } else { "Sign In" },
        "nav.profile" => if ru { "Профиль" } else { "Profile" },
        "nav.switch_to_light" => if ru { "Светлая тема" } else { "Switch to light theme" },
        "nav.switch_to_dark" => if ru { "Тёмная тема" } else { "Switch to dark theme" },
        "nav.settings" => if ru { "Настройки" } else { "Settings" },
        "nav.orders" => if ru { "Заказы" } else { "Orders" },
        "nav.sign_out" => if ru { "Выйти" } else { "Sign Out" },
        "nav.line_title" => if ru { "Футболка с круглым вырезом" } else { "Crew neck Tee-Shirt" },

        // ── Theme names ─────────────────────────────────────
        "theme.light" => if ru { "Светлая" } else { "Light" },
        "theme.dark" => if ru { "Тёмная" } else { "Dark" },

        // ── Configurator overlay ────────────────────────────
        "overlay.download" => if ru { "Скачать превью" } else { "Download preview" },
        "overlay.title" => if ru { "Футболка с круглым вырезом" } else { "Crew neck Tee-Shirt" },
        "overlay.size" => if ru { "Размер" } else { "Size" },
        "overlay.choose_size" => if ru { "Выберите размер" } else { "Pick a size" },
        "overlay.out_of_stock" => if ru { "Нет в наличии" } else { "Out of Stock" },
        "overlay.quantity" => if ru { "Количество" } else { "Quantity" },
        "overlay.add_to_cart" => if ru { "В корзину" } else { "Add to Cart" },
        "overlay.over_stock" => if ru { "Столько нет на складе" } else { "Not enough in stock" },

        // ── Profile ─────────────────────────────────────────
        "profile.title" => if ru { "Адрес доставки" } else { "Delivery address" },
        "profile.street" => if ru { "Улица" } else { "Street" },
        "profile.city" => if ru { "Город" } else { "City" },
        "profile.state" => if ru { "Штат" } else { "State" },
        "profile.zip" => if ru { "Индекс" } else { "Zip" },
        "profile.create" => if ru { "Создать" } else { "Create" },
        "profile.update" => if ru { "Обновить" } else { "Update" },
        "profile.loading" => if ru { "Загрузка..." } else { "Loading..." },
        "profile.signed_out" => if ru { "Войдите, чтобы указать адрес" } else { "Sign in to manage your address" },
        "profile.required" => if ru { "Обязательное поле" } else { "Required" },

        // ── Checkout ────────────────────────────────────────
        "checkout.title" => if ru { "Оформление заказа" } else { "Checkout" },
        "checkout.summary" => if ru { "Ваш заказ" } else { "Order summary" },
        "checkout.total" => if ru { "Итого" } else { "Total" },
        "checkout.back" => if ru { "Вернуться в магазин" } else { "Back to store" },

        // ── Sign in ─────────────────────────────────────────
        "sign_in.title" => if ru { "Вход" } else { "Sign in" },
        "sign_in.name" => if ru { "Имя" } else { "Name" },
        "sign_in.image" => if ru { "Ссылка на аватар" } else { "Avatar URL" },
        "sign_in.submit" => if ru { "Войти" } else { "Sign In" },
        "sign_in.cancel" => if ru { "Отмена" } else { "Cancel" },

        // ── Settings ────────────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.language" => if ru { "Язык" } else { "Language" },
        "settings.theme" => if ru { "Тема" } else { "Theme" },
        "settings.api_url" => if ru { "Адрес сервера" } else { "API server" },
        "settings.assets_dir" => if ru { "Папка ресурсов" } else { "Assets folder" },
        "settings.restart_hint" => if ru {
            "Сервер и ресурсы применятся после перезапуска"
        } else {
            "Server and assets apply after restart"
        },
        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Viewport ────────────────────────────────────────
        "viewport.no_gl" => if ru { "OpenGL недоступен" } else { "OpenGL is not available" },
        "preview.save_title" => if ru { "Сохранить превью" } else { "Save preview" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        assert_eq!(translate("nav.sign_in", Lang::Ru), "Войти");
        assert_eq!(translate("nav.sign_in", Lang::En), "Sign In");
        assert_eq!(translate("no.such.key", Lang::En), "???");
    }

    #[test]
    fn test_language_setting_maps_to_lang() {
        assert_eq!(Lang::from(Language::Ru), Lang::Ru);
        assert_eq!(Lang::from(Language::default()), Lang::En);
    }
}
