use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::payment::deep_link::PaymentOptions;
use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::model::MerchantSettings;
use crate::domain::payment::repository::SettingsRepository;
use crate::domain::payment::use_cases::get_options::{
    GetPaymentOptionsParams, GetPaymentOptionsUseCase,
};

pub struct GetPaymentOptionsUseCaseImpl {
    pub settings_repository: Arc<dyn SettingsRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetPaymentOptionsUseCase for GetPaymentOptionsUseCaseImpl {
    async fn execute(
        &self,
        params: GetPaymentOptionsParams,
    ) -> Result<PaymentOptions, PaymentError> {
        let settings = self.settings_repository.get_all().await?;
        let merchant = MerchantSettings::from_settings(&settings);
        self.logger.debug(&format!(
            "Building payment options for {} to {}",
            params.amount, merchant.upi_id
        ));
        Ok(PaymentOptions::build(merchant, params.amount))
    }
}
