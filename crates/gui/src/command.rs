//! JSON command protocol for automation agents and scripted tests.

use serde::{Deserialize, Serialize};
use shared::{Color, Decal, Route, Size};
use std::time::Duration;

use crate::harness::StorefrontHarness;
use crate::state::CheckoutAction;

/// A command an agent can execute against the storefront
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    SelectColor { color: Color },
    SelectDecal { decal: Decal },
    SelectSize { size: Size },
    /// Raw text typed into the quantity field
    SetQuantity { input: String },
    AddToCart,
    /// Activate the cart's Checkout button
    Checkout,
    Navigate { path: String },
    SignIn { name: String },
    SignOut,
    ToggleTheme,
    /// Advance the harness clock
    Wait { millis: u64 },
    /// Snapshot of the visible state
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut StorefrontHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::SelectColor { color } => {
            harness.select_color(color);
            CommandResponse::ok_with_data(serde_json::json!({ "color": color, "name": color.name() }))
        }

        AgentCommand::SelectDecal { decal } => {
            harness.select_decal(decal);
            CommandResponse::ok_with_data(serde_json::json!({ "decal": decal }))
        }

        AgentCommand::SelectSize { size } => match harness.select_size(size) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({
                "size": size,
                "quantity": harness.state.configurator.quantity(),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::SetQuantity { input } => {
            let quantity = harness.set_quantity(&input);
            CommandResponse::ok_with_data(serde_json::json!({ "quantity": quantity }))
        }

        AgentCommand::AddToCart => match harness.add_to_cart() {
            Ok(outcome) => {
                let cart = harness.state.configurator.cart();
                CommandResponse::ok_with_data(serde_json::json!({
                    "outcome": format!("{outcome:?}"),
                    "cart_len": cart.len(),
                    "item_count": cart.item_count(),
                    "quantity": harness.state.configurator.quantity(),
                }))
            }
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::Checkout => {
            let action = match harness.checkout() {
                CheckoutAction::Disabled => "disabled",
                CheckoutAction::SignIn => "sign_in",
                CheckoutAction::Navigate(_) => "navigate",
            };
            CommandResponse::ok_with_data(serde_json::json!({
                "action": action,
                "route": harness.state.route.path(),
            }))
        }

        AgentCommand::Navigate { path } => {
            harness.navigate(Route::parse(&path));
            CommandResponse::ok_with_data(serde_json::json!({ "route": harness.state.route.path() }))
        }

        AgentCommand::SignIn { name } => {
            if name.trim().is_empty() {
                return CommandResponse::err("name is required");
            }
            harness.sign_in_as(name.trim());
            CommandResponse::ok()
        }

        AgentCommand::SignOut => {
            harness.sign_out();
            CommandResponse::ok()
        }

        AgentCommand::ToggleTheme => {
            harness.state.toggle_theme();
            CommandResponse::ok_with_data(serde_json::json!({ "theme": harness.state.settings.theme }))
        }

        AgentCommand::Wait { millis } => {
            harness.advance(Duration::from_millis(millis));
            CommandResponse::ok()
        }

        AgentCommand::Inspect => CommandResponse::ok_with_data(harness.snapshot()),
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut StorefrontHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut StorefrontHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
