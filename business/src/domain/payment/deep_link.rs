use url::form_urlencoded;

use super::model::{MerchantSettings, UpiApp};
use crate::domain::shared::value_objects::Money;

pub const TRANSACTION_NOTE: &str = "Payment for order";

const GENERIC_UPI_SCHEME: &str = "upi://pay";

impl UpiApp {
    /// App-specific payment URI scheme. Scan-to-pay has none.
    pub fn scheme(&self) -> Option<&'static str> {
        match self {
            UpiApp::PhonePe => Some("phonepe://pay"),
            UpiApp::GPay => Some("tez://upi/pay"),
            UpiApp::Paytm => Some("paytmmp://pay"),
            UpiApp::ScanToPay => None,
        }
    }

    /// Web page to open when the app is not installed.
    pub fn fallback_url(&self) -> Option<&'static str> {
        match self {
            UpiApp::PhonePe => Some("https://phon.pe/ru_all"),
            UpiApp::GPay => Some("https://pay.google.com"),
            UpiApp::Paytm => Some("https://paytm.com"),
            UpiApp::ScanToPay => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpiAppLink {
    pub app: UpiApp,
    pub deep_link: String,
    pub fallback_url: String,
}

/// What the payment step shows: where to pay, how much, and the static QR.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOptions {
    pub amount: Money,
    pub merchant: MerchantSettings,
    pub generic_link: String,
    pub app_links: Vec<UpiAppLink>,
}

impl PaymentOptions {
    pub fn build(merchant: MerchantSettings, amount: Money) -> Self {
        let generic_link = upi_link(GENERIC_UPI_SCHEME, &merchant, &amount);
        let app_links = UpiApp::ALL
            .iter()
            .filter_map(|app| app_link(*app, &merchant, &amount))
            .collect();
        Self {
            amount,
            merchant,
            generic_link,
            app_links,
        }
    }

    pub fn qr_url(&self) -> Option<&str> {
        self.merchant.qr_url.as_deref()
    }
}

pub fn app_link(app: UpiApp, merchant: &MerchantSettings, amount: &Money) -> Option<UpiAppLink> {
    let scheme = app.scheme()?;
    let fallback_url = app.fallback_url()?;
    Some(UpiAppLink {
        app,
        deep_link: upi_link(scheme, merchant, amount),
        fallback_url: fallback_url.to_string(),
    })
}

fn upi_link(scheme: &str, merchant: &MerchantSettings, amount: &Money) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("pa", &merchant.upi_id)
        .append_pair("pn", &merchant.merchant_name)
        .append_pair("am", &amount.to_string())
        .append_pair("cu", Money::CURRENCY)
        .append_pair("tn", TRANSACTION_NOTE)
        .finish();
    format!("{}?{}", scheme, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_generic_upi_link() {
        let options = PaymentOptions::build(MerchantSettings::default(), Money::from_rupees(1100));

        assert_eq!(
            options.generic_link,
            "upi://pay?pa=merchant%40paytm&pn=Flipkart&am=1100.00&cu=INR&tn=Payment+for+order"
        );
    }

    #[test]
    fn should_link_every_app_except_scan_to_pay() {
        let options = PaymentOptions::build(MerchantSettings::default(), Money::from_rupees(59));

        let apps: Vec<UpiApp> = options.app_links.iter().map(|l| l.app).collect();
        assert_eq!(apps, vec![UpiApp::PhonePe, UpiApp::GPay, UpiApp::Paytm]);

        let gpay = &options.app_links[1];
        assert!(gpay.deep_link.starts_with("tez://upi/pay?pa="));
        assert!(gpay.deep_link.contains("am=59.00"));
        assert_eq!(gpay.fallback_url, "https://pay.google.com");
    }

    #[test]
    fn should_encode_merchant_name() {
        let merchant = MerchantSettings {
            upi_id: "shop@ybl".to_string(),
            merchant_name: "Sharma & Sons".to_string(),
            qr_url: None,
        };

        let link = app_link(UpiApp::PhonePe, &merchant, &Money::from_rupees(10)).unwrap();

        assert!(link.deep_link.contains("pn=Sharma+%26+Sons"));
        assert!(app_link(UpiApp::ScanToPay, &merchant, &Money::from_rupees(10)).is_none());
    }
}
