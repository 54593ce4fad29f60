use serde::{Deserialize, Serialize};

/// Экран приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// Главная с конфигуратором; `intro` — показывать ли заставку
    Home { intro: bool },
    Profile,
    Checkout,
}

impl Default for Route {
    fn default() -> Self {
        Route::Home { intro: true }
    }
}

impl Route {
    /// Главная без заставки (ссылка с логотипа)
    pub const HOME_SKIP_INTRO: Route = Route::Home { intro: false };

    /// Разбор пути вида `/?intro=false`, `/profile`, `/checkout`
    pub fn parse(location: &str) -> Route {
        let location = location.trim();
        let (path, query) = match location.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (location, None),
        };
        match path.trim_end_matches('/') {
            "/profile" | "profile" => Route::Profile,
            "/checkout" | "checkout" => Route::Checkout,
            _ => {
                let skip = query
                    .into_iter()
                    .flat_map(|q| q.split('&'))
                    .filter_map(|pair| pair.split_once('='))
                    .any(|(k, v)| k == "intro" && v.eq_ignore_ascii_case("false"));
                Route::Home { intro: !skip }
            }
        }
    }

    /// Путь для навигации
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home { intro: true } => "/",
            Route::Home { intro: false } => "/?intro=false",
            Route::Profile => "/profile",
            Route::Checkout => "/checkout",
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_home_intro_flag() {
        assert_eq!(Route::parse("/"), Route::Home { intro: true });
        assert_eq!(Route::parse("/?intro=false"), Route::HOME_SKIP_INTRO);
        assert_eq!(Route::parse("/?foo=1&intro=FALSE"), Route::HOME_SKIP_INTRO);
        assert_eq!(Route::parse("/?intro=true"), Route::Home { intro: true });
    }

    #[test]
    fn test_parse_pages() {
        assert_eq!(Route::parse("/profile"), Route::Profile);
        assert_eq!(Route::parse("/checkout/"), Route::Checkout);
        assert_eq!(Route::parse("/nowhere"), Route::Home { intro: true });
    }

    #[test]
    fn test_path_reparses() {
        for route in [Route::Home { intro: true }, Route::HOME_SKIP_INTRO, Route::Profile, Route::Checkout] {
            assert_eq!(Route::parse(route.path()), route);
        }
    }
}
