//! Identity state and the checkout gate

use shared::{Cart, Route, SessionUser, SignInRequest};

/// Identity as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Absent,
    Loading,
    Present(SessionUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionState::Present(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }
}

/// What activating "Checkout" does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutAction {
    /// Empty cart
    Disabled,
    /// Cart has items but nobody is signed in
    SignIn,
    Navigate(Route),
}

/// Loading counts as signed out until the session resolves.
pub fn checkout_action(cart: &Cart, session: &SessionState) -> CheckoutAction {
    if cart.is_empty() {
        CheckoutAction::Disabled
    } else if session.is_signed_in() {
        CheckoutAction::Navigate(Route::Checkout)
    } else {
        CheckoutAction::SignIn
    }
}

/// Sign-in dialog fields
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub open: bool,
    pub name: String,
    pub image: String,
    pub error: Option<String>,
    pub pending: bool,
}

impl SignInForm {
    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.pending = false;
        self.error = None;
    }

    pub fn request(&self) -> Result<SignInRequest, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Required".into());
        }
        let image = self.image.trim();
        Ok(SignInRequest {
            name: name.to_string(),
            image: (!image.is_empty()).then(|| image.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Color, Decal, Size};

    fn user() -> SessionUser {
        SessionUser {
            id: "u1".into(),
            name: "Ada".into(),
            image: None,
        }
    }

    fn cart_with_item() -> Cart {
        let mut cart = Cart::new();
        cart.add(Color::White, Size::M, Decal::React, 1);
        cart
    }

    #[test]
    fn test_checkout_gate_states() {
        let empty = Cart::new();
        let full = cart_with_item();
        let signed_in = SessionState::Present(user());

        assert_eq!(checkout_action(&empty, &SessionState::Absent), CheckoutAction::Disabled);
        assert_eq!(checkout_action(&empty, &signed_in), CheckoutAction::Disabled);
        assert_eq!(checkout_action(&full, &SessionState::Absent), CheckoutAction::SignIn);
        assert_eq!(checkout_action(&full, &SessionState::Loading), CheckoutAction::SignIn);
        assert_eq!(
            checkout_action(&full, &signed_in),
            CheckoutAction::Navigate(Route::Checkout)
        );
    }

    #[test]
    fn test_sign_in_form_request() {
        let mut form = SignInForm::default();
        assert_eq!(form.request(), Err("Required".to_string()));
        form.name = "  Ada ".into();
        let request = form.request().unwrap();
        assert_eq!(request.name, "Ada");
        assert_eq!(request.image, None);
    }
}
