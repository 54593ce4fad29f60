//! Delivery address form on the profile page

use shared::{DeliveryAddress, DeliveryAddressInput, DeliveryAddressPatch};

pub const REQUIRED: &str = "Required";

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub street: Option<&'static str>,
    pub city: Option<&'static str>,
    pub state: Option<&'static str>,
    pub zip: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip.is_none()
    }
}

/// Which request the form submit turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPlan {
    Create(DeliveryAddressInput),
    UpdateAll(Vec<DeliveryAddressPatch>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub id: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressForm {
    /// Reset to the first stored address, or clear when there is none
    pub fn reset_from(&mut self, address: Option<&DeliveryAddress>) {
        *self = match address {
            Some(a) => Self {
                id: Some(a.id.clone()),
                street: a.street.clone(),
                city: a.city.clone(),
                state: a.state.clone(),
                zip: a.zip.clone(),
            },
            None => Self::default(),
        };
    }

    pub fn validate(&self) -> Result<DeliveryAddressInput, FormErrors> {
        let required = |value: &str| value.is_empty().then_some(REQUIRED);
        let errors = FormErrors {
            street: required(&self.street),
            city: required(&self.city),
            state: required(&self.state),
            zip: required(&self.zip),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(DeliveryAddressInput {
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
        })
    }

    pub fn submit_plan(&self) -> Result<SubmitPlan, FormErrors> {
        let input = self.validate()?;
        Ok(match &self.id {
            Some(id) => SubmitPlan::UpdateAll(vec![DeliveryAddressPatch::full(id.clone(), input)]),
            None => SubmitPlan::Create(input),
        })
    }
}

/// Profile page state: loaded addresses, form and request status
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub addresses: Vec<DeliveryAddress>,
    pub form: AddressForm,
    pub errors: FormErrors,
    pub loading: bool,
    pub saving: bool,
    pub last_error: Option<String>,
}

impl ProfileState {
    pub fn on_loaded(&mut self, addresses: Vec<DeliveryAddress>) {
        self.loading = false;
        self.form.reset_from(addresses.first());
        self.addresses = addresses;
    }

    /// Validate and mark busy. `None` when validation failed.
    pub fn begin_submit(&mut self) -> Option<SubmitPlan> {
        match self.form.submit_plan() {
            Ok(plan) => {
                self.errors = FormErrors::default();
                self.saving = true;
                self.last_error = None;
                Some(plan)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn finish_submit(&mut self, error: Option<String>) {
        self.saving = false;
        self.last_error = error;
    }

    /// Submit button is disabled while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.loading || self.saving
    }

    pub fn submit_label(&self) -> &'static str {
        if self.form.id.is_some() {
            "Update"
        } else {
            "Create"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            id: "a1".into(),
            street: "12 Market St".into(),
            city: "Portland".into(),
            state: "OR".into(),
            zip: "97201".into(),
        }
    }

    #[test]
    fn test_empty_fields_are_required() {
        let form = AddressForm {
            street: "1 Main".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.street, None);
        assert_eq!(errors.city, Some(REQUIRED));
        assert_eq!(errors.zip, Some(REQUIRED));
    }

    #[test]
    fn test_plan_create_without_id() {
        let mut profile = ProfileState::default();
        profile.on_loaded(vec![]);
        assert_eq!(profile.submit_label(), "Create");
        profile.form.street = "1 Main".into();
        profile.form.city = "Austin".into();
        profile.form.state = "TX".into();
        profile.form.zip = "73301".into();
        assert!(matches!(profile.begin_submit(), Some(SubmitPlan::Create(_))));
        assert!(profile.is_busy());
    }

    #[test]
    fn test_plan_update_all_with_first_address() {
        let mut profile = ProfileState::default();
        profile.on_loaded(vec![address()]);
        assert_eq!(profile.submit_label(), "Update");
        profile.form.city = "Salem".into();
        match profile.begin_submit() {
            Some(SubmitPlan::UpdateAll(patches)) => {
                assert_eq!(patches.len(), 1);
                assert_eq!(patches[0].id, "a1");
                assert_eq!(patches[0].city.as_deref(), Some("Salem"));
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn test_invalid_submit_is_not_busy() {
        let mut profile = ProfileState::default();
        assert!(profile.begin_submit().is_none());
        assert!(!profile.is_busy());
        assert_eq!(profile.errors.street, Some(REQUIRED));
    }
}
