//! # Adyen Configuration
//!
//! Configuration management for the Adyen integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Checkout API version the client speaks
pub const API_VERSION: &str = "v68";

/// Test environment endpoint
pub const TEST_CHECKOUT_URL: &str = "https://checkout-test.adyen.com";

/// Adyen platform environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdyenEnvironment {
    Test,
    Live,
}

impl AdyenEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdyenEnvironment::Test => "test",
            AdyenEnvironment::Live => "live",
        }
    }
}

impl FromStr for AdyenEnvironment {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "test" => Ok(AdyenEnvironment::Test),
            "live" => Ok(AdyenEnvironment::Live),
            other => Err(PaymentError::Configuration(format!(
                "ADYEN_ENVIRONMENT must be test or live, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for AdyenEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adyen API configuration
#[derive(Clone)]
pub struct AdyenConfig {
    /// API key sent as `x-API-key`
    pub api_key: String,

    /// Merchant account payments are booked on
    pub merchant_account: String,

    /// Client key for the browser drop-in (test_... or live_...)
    pub client_key: String,

    /// Test or live platform
    pub environment: AdyenEnvironment,

    /// Checkout API base URL (for live prefixes and mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl AdyenConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `ADYEN_API_KEY`
    /// - `ADYEN_MERCHANT_ACCOUNT`
    /// - `ADYEN_CLIENT_KEY`
    ///
    /// Optional:
    /// - `ADYEN_ENVIRONMENT` (`test` or `live`, default `test`)
    /// - `ADYEN_CHECKOUT_URL` (required for `live`)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = required_var("ADYEN_API_KEY")?;
        let merchant_account = required_var("ADYEN_MERCHANT_ACCOUNT")?;
        let client_key = required_var("ADYEN_CLIENT_KEY")?;

        let environment = match env::var("ADYEN_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => AdyenEnvironment::Test,
        };

        let api_base_url = match (env::var("ADYEN_CHECKOUT_URL"), environment) {
            (Ok(url), _) if !url.is_empty() => url,
            (_, AdyenEnvironment::Test) => TEST_CHECKOUT_URL.to_string(),
            (_, AdyenEnvironment::Live) => {
                return Err(PaymentError::Configuration(
                    "ADYEN_CHECKOUT_URL must be set for the live environment".to_string(),
                ))
            }
        };

        let config = Self {
            api_key,
            merchant_account,
            client_key,
            environment,
            api_base_url,
            api_version: API_VERSION.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a test-environment config with explicit values
    pub fn new(
        api_key: impl Into<String>,
        merchant_account: impl Into<String>,
        client_key: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            merchant_account: merchant_account.into(),
            client_key: client_key.into(),
            environment: AdyenEnvironment::Test,
            api_base_url: TEST_CHECKOUT_URL.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }

    /// Check that the client key belongs to the configured environment
    pub fn validate(&self) -> Result<(), PaymentError> {
        let prefix = format!("{}_", self.environment.as_str());
        if !self.client_key.starts_with(&prefix) {
            return Err(PaymentError::Configuration(format!(
                "ADYEN_CLIENT_KEY must start with {} for the {} environment",
                prefix, self.environment
            )));
        }
        Ok(())
    }

    pub fn is_test_mode(&self) -> bool {
        self.environment == AdyenEnvironment::Test
    }

    /// Full URL of a Checkout API endpoint
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl fmt::Debug for AdyenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdyenConfig")
            .field("api_key", &"<redacted>")
            .field("merchant_account", &self.merchant_account)
            .field("client_key", &self.client_key)
            .field("environment", &self.environment)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn required_var(name: &str) -> Result<String, PaymentError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PaymentError::Configuration(format!("{} not set", name))),
    }
}
