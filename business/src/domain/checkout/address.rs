use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;

pub const DEFAULT_STATE: &str = "Andhra Pradesh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    FullName,
    Phone,
    HouseNo,
    City,
    Pincode,
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressField::FullName => write!(f, "full_name"),
            AddressField::Phone => write!(f, "phone"),
            AddressField::HouseNo => write!(f, "house_no"),
            AddressField::City => write!(f, "city"),
            AddressField::Pincode => write!(f, "pincode"),
        }
    }
}

/// Delivery details typed on the first checkout step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressForm {
    pub full_name: String,
    /// Contact for guests; ignored for signed-in customers.
    pub email: String,
    pub phone: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub house_no: String,
    pub road_name: String,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            pincode: String::new(),
            city: String::new(),
            state: DEFAULT_STATE.to_string(),
            house_no: String::new(),
            road_name: String::new(),
        }
    }
}

impl AddressForm {
    pub fn missing_fields(&self) -> Vec<AddressField> {
        [
            (AddressField::FullName, &self.full_name),
            (AddressField::Phone, &self.phone),
            (AddressField::HouseNo, &self.house_no),
            (AddressField::City, &self.city),
            (AddressField::Pincode, &self.pincode),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Guests must leave an email; signed-in customers are reachable already.
    pub fn validate(&self, has_identity: bool) -> Result<(), CheckoutError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingRequiredFields(missing));
        }
        if !has_identity && self.email.trim().is_empty() {
            return Err(CheckoutError::EmailRequired);
        }
        Ok(())
    }

    /// Multi-line label written onto the order.
    pub fn shipping_address_text(&self) -> String {
        format!(
            "{}\n{}\n{}, {}\n{}, {} - {}",
            self.full_name.trim(),
            self.phone.trim(),
            self.house_no.trim(),
            self.road_name.trim(),
            self.city.trim(),
            self.state.trim(),
            self.pincode.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AddressForm {
        AddressForm {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            pincode: "530001".to_string(),
            city: "Visakhapatnam".to_string(),
            state: DEFAULT_STATE.to_string(),
            house_no: "12-4".to_string(),
            road_name: "Beach Road".to_string(),
        }
    }

    #[test]
    fn should_accept_complete_guest_address() {
        assert!(filled().validate(false).is_ok());
    }

    #[test]
    fn should_list_blank_required_fields() {
        let form = AddressForm {
            phone: "  ".to_string(),
            city: String::new(),
            ..filled()
        };

        let err = form.validate(true).unwrap_err();

        match err {
            CheckoutError::MissingRequiredFields(fields) => {
                assert_eq!(fields, vec![AddressField::Phone, AddressField::City]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn should_require_email_only_for_guests() {
        let form = AddressForm {
            email: String::new(),
            ..filled()
        };

        assert!(matches!(form.validate(false).unwrap_err(), CheckoutError::EmailRequired));
        assert!(form.validate(true).is_ok());
    }

    #[test]
    fn should_not_require_road_name() {
        let form = AddressForm {
            road_name: String::new(),
            ..filled()
        };
        assert!(form.validate(false).is_ok());
    }

    #[test]
    fn should_format_shipping_address() {
        assert_eq!(
            filled().shipping_address_text(),
            "Asha Rao\n9876543210\n12-4, Beach Road\nVisakhapatnam, Andhra Pradesh - 530001"
        );
    }
}
