//! # Checkout Orchestrator
//!
//! Bridges one logical payment that spans two HTTP interactions: initiation,
//! and the shopper's return from a redirect or 3DS challenge. Between the two,
//! the gateway's continuation token is parked in a [`PaymentDataStore`] under
//! a freshly generated order reference.
//!
//! ```text
//! INITIATED ──(action.paymentData)──▶ AWAITING_REDIRECT ──(shopper returns)──▶ TERMINAL
//!     │                                                                   success|pending
//!     └──(no action)──▶ outcome left to the browser                       failed|error
//! ```

use crate::error::{PaymentError, PaymentResult};
use crate::gateway::BoxedPaymentGateway;
use crate::outcome::Outcome;
use crate::payment::{
    Amount, Channel, JsonObject, PaymentDetailsRequest, PaymentMethodsRequest,
    PaymentMethodsResponse, PaymentRequest, PaymentResponse,
};
use crate::store::{InMemoryPaymentDataStore, PaymentDataStore};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Path the gateway sends the shopper back to after authentication
pub const SHOPPER_REDIRECT_PATH: &str = "/api/handleShopperRedirect";

/// Payment parameters (fixed demo values, overridable via `config/checkout.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    /// ISO 4217 currency code
    pub currency: String,
    /// Amount in minor units
    pub amount: i64,
    /// How long a pending authentication is kept, in seconds
    pub redirect_ttl_secs: u64,
}

impl PaymentSettings {
    /// Parse from a TOML document
    pub fn from_toml(content: &str) -> PaymentResult<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| PaymentError::Configuration(format!("Invalid checkout settings: {}", e)))?;

        if settings.amount <= 0 {
            return Err(PaymentError::Configuration(
                "amount must be a positive number of minor units".to_string(),
            ));
        }
        if settings.currency.len() != 3 {
            return Err(PaymentError::Configuration(format!(
                "currency must be a 3-letter ISO code, got {:?}",
                settings.currency
            )));
        }
        if settings.redirect_ttl_secs == 0 {
            return Err(PaymentError::Configuration(
                "redirect_ttl_secs must be at least 1 second".to_string(),
            ));
        }

        Ok(settings)
    }

    pub fn amount(&self) -> Amount {
        Amount::new(self.currency.clone(), self.amount)
    }
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            amount: 1000,
            redirect_ttl_secs: InMemoryPaymentDataStore::DEFAULT_TTL_SECS,
        }
    }
}

/// Browser-supplied payment initiation
#[derive(Debug, Clone)]
pub struct InitiatePayment {
    pub payment_method: Value,
    pub browser_info: Option<Value>,
    pub shopper_ip: Option<String>,
}

/// What the shopper brought back from an out-of-band authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDetails {
    /// Redirect flow (`redirectResult` query parameter)
    RedirectResult(Option<String>),
    /// Classic 3DS1 form post
    ThreeDsOne { md: String, pa_res: String },
}

impl RedirectDetails {
    fn into_details(self) -> Option<JsonObject> {
        match self {
            RedirectDetails::RedirectResult(Some(result)) if !result.is_empty() => {
                let mut details = JsonObject::new();
                details.insert("redirectResult".to_string(), Value::String(result));
                Some(details)
            }
            RedirectDetails::RedirectResult(_) => None,
            RedirectDetails::ThreeDsOne { md, pa_res } => {
                let mut details = JsonObject::new();
                details.insert("MD".to_string(), Value::String(md));
                details.insert("PaRes".to_string(), Value::String(pa_res));
                Some(details)
            }
        }
    }
}

/// Checkout orchestrator
#[derive(Clone)]
pub struct CheckoutService {
    gateway: BoxedPaymentGateway,
    store: Arc<dyn PaymentDataStore>,
    merchant_account: String,
    base_url: String,
    settings: PaymentSettings,
}

impl CheckoutService {
    /// Create a new orchestrator.
    ///
    /// `base_url` is the externally reachable origin of this service and is
    /// used to build the return URL handed to the gateway.
    pub fn new(
        gateway: BoxedPaymentGateway,
        store: Arc<dyn PaymentDataStore>,
        merchant_account: impl Into<String>,
        base_url: impl Into<String>,
        settings: PaymentSettings,
    ) -> Self {
        Self {
            gateway,
            store,
            merchant_account: merchant_account.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            settings,
        }
    }

    pub fn store(&self) -> &Arc<dyn PaymentDataStore> {
        &self.store
    }

    pub fn provider_name(&self) -> &'static str {
        self.gateway.provider_name()
    }

    /// Return URL for an order reference
    pub fn return_url(&self, order_ref: &str) -> String {
        format!(
            "{}{}?orderRef={}",
            self.base_url, SHOPPER_REDIRECT_PATH, order_ref
        )
    }

    /// List the payment methods for web checkout on the merchant account.
    #[instrument(skip(self))]
    pub async fn payment_methods(&self) -> PaymentResult<PaymentMethodsResponse> {
        let request = PaymentMethodsRequest::web(&self.merchant_account);
        info!("Requesting payment methods: {:?}", request);
        self.gateway.payment_methods(&request).await
    }

    /// Submit a payment under a fresh order reference.
    ///
    /// When the gateway asks for a follow-up action, its continuation token is
    /// stored so the shopper's return can be matched to this payment.
    #[instrument(skip(self, initiation))]
    pub async fn initiate_payment(
        &self,
        initiation: InitiatePayment,
    ) -> PaymentResult<PaymentResponse> {
        let order_ref = Uuid::new_v4().to_string();

        let request = PaymentRequest {
            merchant_account: self.merchant_account.clone(),
            channel: Channel::Web,
            amount: self.settings.amount(),
            reference: order_ref.clone(),
            return_url: self.return_url(&order_ref),
            payment_method: initiation.payment_method,
            browser_info: initiation.browser_info,
            additional_data: HashMap::from([("allow3DS2".to_string(), "true".to_string())]),
            shopper_ip: initiation.shopper_ip,
        };

        info!(
            "Initiating payment: reference={}, amount={} {}",
            request.reference, request.amount.value, request.amount.currency
        );

        let response = self.gateway.payments(&request).await?;

        if let Some(token) = response.continuation_token() {
            debug!("Payment requires shopper action, storing payment data");
            self.store.put(&order_ref, token.to_string());
        }

        info!(
            "Payment initiated: reference={}, result_code={:?}",
            order_ref, response.result_code
        );

        Ok(response)
    }

    /// Forward drop-in additional details to the gateway unchanged.
    #[instrument(skip(self, request))]
    pub async fn submit_additional_details(
        &self,
        request: PaymentDetailsRequest,
    ) -> PaymentResult<PaymentResponse> {
        info!("Submitting additional payment details");
        self.gateway.payment_details(&request).await
    }

    /// Complete a payment after the shopper returns and map the result.
    ///
    /// A missing record yields a details call without `paymentData`; the
    /// gateway decides what that means.
    #[instrument(skip(self, details))]
    pub async fn handle_redirect(
        &self,
        order_ref: &str,
        details: RedirectDetails,
    ) -> PaymentResult<Outcome> {
        let payment_data = self.store.get(order_ref);
        if payment_data.is_none() {
            warn!("No pending payment data for order reference {}", order_ref);
        }

        let request = PaymentDetailsRequest {
            details: details.into_details(),
            ..Default::default()
        }
        .with_payment_data(payment_data);

        info!("Completing redirected payment: reference={}", order_ref);

        let response = self.gateway.payment_details(&request).await?;
        let outcome = Outcome::from_result_code(response.result_code.as_ref());

        info!(
            "Redirected payment finished: reference={}, result_code={:?}, outcome={}",
            order_ref, response.result_code, outcome
        );

        Ok(outcome)
    }
}
