//! # Adyen Checkout Client
//!
//! `PaymentGateway` implementation over the Adyen Checkout REST API.
//! Every call is a single JSON POST; failures are surfaced, never retried.

use crate::config::AdyenConfig;
use async_trait::async_trait;
use pay_core::{
    PaymentDetailsRequest, PaymentError, PaymentGateway, PaymentMethodsRequest,
    PaymentMethodsResponse, PaymentRequest, PaymentResponse, PaymentResult,
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "adyen";

/// Adyen Checkout API client
pub struct AdyenCheckoutClient {
    config: AdyenConfig,
    client: Client,
}

impl AdyenCheckoutClient {
    /// Create a new client
    pub fn new(config: AdyenConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = AdyenConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &AdyenConfig {
        &self.config
    }

    /// POST a JSON body to a Checkout endpoint and decode the answer
    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> PaymentResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-API-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Adyen API error: status={}, body={}", status, body);

            let message = match serde_json::from_str::<AdyenServiceError>(&body) {
                Ok(service_error) => service_error.describe(),
                Err(_) => format!("HTTP {}: {}", status, body),
            };

            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Adyen response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentGateway for AdyenCheckoutClient {
    #[instrument(skip(self, request))]
    async fn payment_methods(
        &self,
        request: &PaymentMethodsRequest,
    ) -> PaymentResult<PaymentMethodsResponse> {
        let response: PaymentMethodsResponse = self.post("paymentMethods", request).await?;
        info!(
            "Received {} payment methods from Adyen",
            response.methods().len()
        );
        Ok(response)
    }

    #[instrument(skip(self, request), fields(reference = %request.reference))]
    async fn payments(&self, request: &PaymentRequest) -> PaymentResult<PaymentResponse> {
        let response: PaymentResponse = self.post("payments", request).await?;
        info!(
            "Adyen payment: result_code={:?}, psp_reference={:?}",
            response.result_code, response.psp_reference
        );
        Ok(response)
    }

    #[instrument(skip(self, request))]
    async fn payment_details(
        &self,
        request: &PaymentDetailsRequest,
    ) -> PaymentResult<PaymentResponse> {
        let response: PaymentResponse = self.post("payments/details", request).await?;
        info!(
            "Adyen payment details: result_code={:?}, psp_reference={:?}",
            response.result_code, response.psp_reference
        );
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Adyen API Types
// =============================================================================

/// Error body returned with non-2xx answers
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdyenServiceError {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    psp_reference: Option<String>,
}

impl AdyenServiceError {
    fn describe(&self) -> String {
        let mut description = format!(
            "{} (errorCode={}, errorType={})",
            self.message.as_deref().unwrap_or("unknown error"),
            self.error_code.as_deref().unwrap_or("-"),
            self.error_type.as_deref().unwrap_or("-"),
        );
        if let Some(ref psp) = self.psp_reference {
            description.push_str(&format!(", pspReference={}", psp));
        }
        description
    }
}
