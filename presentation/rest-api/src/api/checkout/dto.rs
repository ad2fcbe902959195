use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::cart::model::Cart;
use business::domain::checkout::address::{AddressForm, DEFAULT_STATE};
use business::domain::checkout::flow::{CheckoutFlow, CheckoutStep};
use business::domain::payment::deep_link::{PaymentOptions, UpiAppLink};
use business::domain::payment::model::{PaymentMethod, UpiApp};
use business::domain::shared::value_objects::Money;

use crate::api::cart::dto::CartResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
pub enum CheckoutStepDto {
    #[oai(rename = "address")]
    Address,
    #[oai(rename = "summary")]
    Summary,
    #[oai(rename = "payment")]
    Payment,
    #[oai(rename = "completed")]
    Completed,
}

impl From<CheckoutStep> for CheckoutStepDto {
    fn from(step: CheckoutStep) -> Self {
        match step {
            CheckoutStep::Address => CheckoutStepDto::Address,
            CheckoutStep::Summary => CheckoutStepDto::Summary,
            CheckoutStep::Payment => CheckoutStepDto::Payment,
            CheckoutStep::Completed => CheckoutStepDto::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
pub enum PaymentMethodDto {
    #[oai(rename = "upi")]
    Upi,
    #[oai(rename = "cod")]
    CashOnDelivery,
}

impl From<PaymentMethod> for PaymentMethodDto {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Upi => PaymentMethodDto::Upi,
            PaymentMethod::CashOnDelivery => PaymentMethodDto::CashOnDelivery,
        }
    }
}

impl From<PaymentMethodDto> for PaymentMethod {
    fn from(dto: PaymentMethodDto) -> Self {
        match dto {
            PaymentMethodDto::Upi => PaymentMethod::Upi,
            PaymentMethodDto::CashOnDelivery => PaymentMethod::CashOnDelivery,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
pub enum UpiAppDto {
    #[oai(rename = "phonepe")]
    PhonePe,
    #[oai(rename = "gpay")]
    GPay,
    #[oai(rename = "paytm")]
    Paytm,
    #[oai(rename = "scan_to_pay")]
    ScanToPay,
}

impl From<UpiApp> for UpiAppDto {
    fn from(app: UpiApp) -> Self {
        match app {
            UpiApp::PhonePe => UpiAppDto::PhonePe,
            UpiApp::GPay => UpiAppDto::GPay,
            UpiApp::Paytm => UpiAppDto::Paytm,
            UpiApp::ScanToPay => UpiAppDto::ScanToPay,
        }
    }
}

impl From<UpiAppDto> for UpiApp {
    fn from(dto: UpiAppDto) -> Self {
        match dto {
            UpiAppDto::PhonePe => UpiApp::PhonePe,
            UpiAppDto::GPay => UpiApp::GPay,
            UpiAppDto::Paytm => UpiApp::Paytm,
            UpiAppDto::ScanToPay => UpiApp::ScanToPay,
        }
    }
}

fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

/// Delivery details. Email is required for guests only.
#[derive(Debug, Clone, Object)]
pub struct AddressRequest {
    #[oai(default)]
    pub full_name: String,
    #[oai(default)]
    pub email: String,
    #[oai(default)]
    pub phone: String,
    #[oai(default)]
    pub pincode: String,
    #[oai(default)]
    pub city: String,
    #[oai(default = "default_state")]
    pub state: String,
    #[oai(default)]
    pub house_no: String,
    #[oai(default)]
    pub road_name: String,
}

impl From<AddressRequest> for AddressForm {
    fn from(request: AddressRequest) -> Self {
        Self {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            pincode: request.pincode,
            city: request.city,
            state: request.state,
            house_no: request.house_no,
            road_name: request.road_name,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct AddressResponse {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub house_no: String,
    pub road_name: String,
}

impl From<&AddressForm> for AddressResponse {
    fn from(form: &AddressForm) -> Self {
        Self {
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            pincode: form.pincode.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            house_no: form.house_no.clone(),
            road_name: form.road_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SelectPaymentMethodRequest {
    pub method: PaymentMethodDto,
}

/// The customer's claim that a UPI payment was made.
#[derive(Debug, Clone, Object)]
pub struct PaymentConfirmationRequest {
    /// App the customer paid with
    pub app: UpiAppDto,
    /// UTR / transaction number, at least 6 characters
    pub reference: String,
}

#[derive(Debug, Clone, Object)]
pub struct CheckoutStateResponse {
    pub step: CheckoutStepDto,
    pub address: AddressResponse,
    pub payment_method: PaymentMethodDto,
    /// True while the cash-on-delivery fee step is shown
    pub cod_confirmation_open: bool,
    /// Set once the order was placed
    #[oai(skip_serializing_if_is_none)]
    pub order_id: Option<String>,
    pub cart: CartResponse,
}

impl CheckoutStateResponse {
    pub fn new(flow: &CheckoutFlow, cart: &Cart, authenticated: bool) -> Self {
        Self {
            step: flow.step().into(),
            address: flow.address().into(),
            payment_method: flow.payment_method().into(),
            cod_confirmation_open: flow.is_cod_confirmation_open(),
            order_id: flow.order_id().map(|id| id.to_string()),
            cart: CartResponse::new(cart, authenticated),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct UpiAppLinkResponse {
    pub app: UpiAppDto,
    pub label: String,
    pub deep_link: String,
    /// Page to open when the app is not installed
    pub fallback_url: String,
}

impl From<UpiAppLink> for UpiAppLinkResponse {
    fn from(link: UpiAppLink) -> Self {
        Self {
            app: link.app.into(),
            label: link.app.label().to_string(),
            deep_link: link.deep_link,
            fallback_url: link.fallback_url,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct PaymentOptionsResponse {
    pub amount: String,
    pub currency: String,
    pub merchant_name: String,
    pub upi_id: String,
    /// Plain `upi://pay` link any UPI app can open
    pub generic_link: String,
    #[oai(skip_serializing_if_is_none)]
    pub qr_url: Option<String>,
    pub apps: Vec<UpiAppLinkResponse>,
}

impl From<PaymentOptions> for PaymentOptionsResponse {
    fn from(options: PaymentOptions) -> Self {
        Self {
            amount: options.amount.to_string(),
            currency: Money::CURRENCY.to_string(),
            qr_url: options.qr_url().map(str::to_string),
            merchant_name: options.merchant.merchant_name,
            upi_id: options.merchant.upi_id,
            generic_link: options.generic_link,
            apps: options.app_links.into_iter().map(Into::into).collect(),
        }
    }
}
