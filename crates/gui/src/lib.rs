// Library crate: exposes testable modules for integration tests and the automation interface.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod api;
pub mod asset;
pub mod command;
pub mod easing;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod validation;

/// Scene data and animation that do not need a GL context.
/// The renderer and panel stay in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod rig;
}
