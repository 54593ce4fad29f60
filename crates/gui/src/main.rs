mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::api`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use stylecrop_gui_lib::api;
pub use stylecrop_gui_lib::asset;
pub use stylecrop_gui_lib::export;
pub use stylecrop_gui_lib::state;

use app::StorefrontApp;
use shared::Route;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stylecrop=info,stylecrop_gui_lib=info".into()),
        )
        .init();

    // Parse --route <path> argument
    let route = parse_route_arg(std::env::args().skip(1));
    tracing::info!("Starting at {}", route.path());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("STYLECROP")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "stylecrop",
        native_options,
        Box::new(move |cc| Ok(Box::new(StorefrontApp::new(cc, route)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_route_arg(args: impl IntoIterator<Item = String>) -> Route {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--route" {
            match args.next() {
                Some(path) => return Route::parse(&path),
                None => tracing::warn!("--route needs a path, e.g. /?intro=false"),
            }
        } else if let Some(path) = arg.strip_prefix("--route=") {
            return Route::parse(path);
        }
    }
    Route::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_route_arg() {
        assert_eq!(parse_route_arg(args(&[])), Route::default());
        assert_eq!(
            parse_route_arg(args(&["--route", "/?intro=false"])),
            Route::HOME_SKIP_INTRO
        );
        assert_eq!(parse_route_arg(args(&["--route=/profile"])), Route::Profile);
        assert_eq!(parse_route_arg(args(&["--route"])), Route::default());
    }
}
