use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::PaymentError;
use crate::domain::shared::value_objects::Money;

/// Flat fee a cash-on-delivery order must pay online before it is accepted.
pub const COD_CONFIRMATION_FEE_RUPEES: i64 = 59;

/// Shortest transaction reference the storefront accepts.
pub const MIN_REFERENCE_LEN: usize = 6;

pub fn cod_confirmation_fee() -> Money {
    Money::from_rupees(COD_CONFIRMATION_FEE_RUPEES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Upi,
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Upi => write!(f, "upi"),
            PaymentMethod::CashOnDelivery => write!(f, "cod"),
        }
    }
}

/// Where the customer says they paid from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpiApp {
    PhonePe,
    GPay,
    Paytm,
    ScanToPay,
}

impl UpiApp {
    pub const ALL: [UpiApp; 4] = [
        UpiApp::PhonePe,
        UpiApp::GPay,
        UpiApp::Paytm,
        UpiApp::ScanToPay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UpiApp::PhonePe => "PhonePe",
            UpiApp::GPay => "GPay",
            UpiApp::Paytm => "Paytm",
            UpiApp::ScanToPay => "Scan To Pay",
        }
    }

    /// Upper-cased label, as embedded in stored payment references.
    pub fn reference_tag(&self) -> String {
        self.label().to_uppercase()
    }
}

impl std::fmt::Display for UpiApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for UpiApp {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "phonepe" => Ok(UpiApp::PhonePe),
            "gpay" | "googlepay" => Ok(UpiApp::GPay),
            "paytm" => Ok(UpiApp::Paytm),
            "scantopay" | "qr" => Ok(UpiApp::ScanToPay),
            _ => Err(PaymentError::UnknownMethod),
        }
    }
}

/// Customer-typed transaction id (UTR). Only its length is checked; nothing
/// verifies that a payment with this id exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReference(String);

impl PaymentReference {
    pub fn parse(raw: &str) -> Result<Self, PaymentError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_REFERENCE_LEN {
            return Err(PaymentError::ReferenceTooShort);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The customer's claim that a payment was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub app: UpiApp,
    pub reference: PaymentReference,
}

impl PaymentConfirmation {
    pub fn new(app: UpiApp, reference: &str) -> Result<Self, PaymentError> {
        Ok(Self {
            app,
            reference: PaymentReference::parse(reference)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Full amount claimed paid over UPI.
    Paid,
    /// Cash on delivery with the confirmation fee claimed paid.
    CodFeePaid,
    /// Any value written by the back office that the storefront does not set.
    Other(String),
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::CodFeePaid => write!(f, "cod_fee_paid"),
            PaymentStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "paid" => PaymentStatus::Paid,
            "cod_fee_paid" => PaymentStatus::CodFeePaid,
            other => PaymentStatus::Other(other.to_string()),
        })
    }
}

/// Payment fields written onto an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPayment {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub reference: String,
}

impl OrderPayment {
    pub fn upi(confirmation: &PaymentConfirmation) -> Self {
        Self {
            method: PaymentMethod::Upi,
            status: PaymentStatus::Paid,
            reference: format!(
                "UPI:{}:{}",
                confirmation.app.reference_tag(),
                confirmation.reference
            ),
        }
    }

    pub fn cod_fee(confirmation: &PaymentConfirmation) -> Self {
        Self {
            method: PaymentMethod::CashOnDelivery,
            status: PaymentStatus::CodFeePaid,
            reference: format!(
                "COD:FEE_PAID:{}:{}",
                confirmation.app.reference_tag(),
                confirmation.reference
            ),
        }
    }
}

pub const MERCHANT_UPI_ID_KEY: &str = "merchant_upi_id";
pub const MERCHANT_NAME_KEY: &str = "merchant_name";
pub const MERCHANT_QR_URL_KEY: &str = "merchant_qr_url";

const DEFAULT_UPI_ID: &str = "merchant@paytm";
const DEFAULT_MERCHANT_NAME: &str = "Flipkart";

/// Payee details configured in the back office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantSettings {
    pub upi_id: String,
    pub merchant_name: String,
    pub qr_url: Option<String>,
}

impl Default for MerchantSettings {
    fn default() -> Self {
        Self {
            upi_id: DEFAULT_UPI_ID.to_string(),
            merchant_name: DEFAULT_MERCHANT_NAME.to_string(),
            qr_url: None,
        }
    }
}

impl MerchantSettings {
    /// Blank or missing values fall back to the defaults.
    pub fn from_settings(settings: &HashMap<String, String>) -> Self {
        let value = |key: &str| {
            settings
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };
        let defaults = Self::default();
        Self {
            upi_id: value(MERCHANT_UPI_ID_KEY).unwrap_or(defaults.upi_id),
            merchant_name: value(MERCHANT_NAME_KEY).unwrap_or(defaults.merchant_name),
            qr_url: value(MERCHANT_QR_URL_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_reference_of_six_characters() {
        let reference = PaymentReference::parse("  123456 ").unwrap();
        assert_eq!(reference.as_str(), "123456");
    }

    #[test]
    fn should_reject_short_reference() {
        let result = PaymentReference::parse("12345");
        assert!(matches!(result.unwrap_err(), PaymentError::ReferenceTooShort));

        let result = PaymentReference::parse("   12 45   ");
        assert!(matches!(result.unwrap_err(), PaymentError::ReferenceTooShort));
    }

    #[test]
    fn should_format_upi_payment_reference() {
        let confirmation = PaymentConfirmation::new(UpiApp::GPay, "123456789012").unwrap();

        let payment = OrderPayment::upi(&confirmation);

        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.reference, "UPI:GPAY:123456789012");
    }

    #[test]
    fn should_format_cod_fee_reference() {
        let confirmation = PaymentConfirmation::new(UpiApp::ScanToPay, "987654321").unwrap();

        let payment = OrderPayment::cod_fee(&confirmation);

        assert_eq!(payment.method, PaymentMethod::CashOnDelivery);
        assert_eq!(payment.status, PaymentStatus::CodFeePaid);
        assert_eq!(payment.reference, "COD:FEE_PAID:SCAN TO PAY:987654321");
    }

    #[test]
    fn should_parse_app_names_loosely() {
        assert_eq!("PhonePe".parse::<UpiApp>().unwrap(), UpiApp::PhonePe);
        assert_eq!("scan_to_pay".parse::<UpiApp>().unwrap(), UpiApp::ScanToPay);
        assert_eq!("Scan To Pay".parse::<UpiApp>().unwrap(), UpiApp::ScanToPay);
        assert!("bitcoin".parse::<UpiApp>().is_err());
    }

    #[test]
    fn should_keep_unknown_payment_status() {
        let status: PaymentStatus = "refunded".parse().unwrap();
        assert_eq!(status, PaymentStatus::Other("refunded".to_string()));
        assert_eq!(status.to_string(), "refunded");
    }

    #[test]
    fn should_fall_back_to_default_merchant_settings() {
        let mut raw = HashMap::new();
        raw.insert(MERCHANT_NAME_KEY.to_string(), "  ".to_string());
        raw.insert(MERCHANT_QR_URL_KEY.to_string(), "https://cdn/qr.png".to_string());

        let settings = MerchantSettings::from_settings(&raw);

        assert_eq!(settings.upi_id, "merchant@paytm");
        assert_eq!(settings.merchant_name, "Flipkart");
        assert_eq!(settings.qr_url.as_deref(), Some("https://cdn/qr.png"));
    }
}
