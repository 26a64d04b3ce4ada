//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the checkout orchestrator, configuration and the drop-in client key.

use pay_adyen::{AdyenCheckoutClient, AdyenConfig};
use pay_core::{CheckoutService, InMemoryPaymentDataStore, PaymentDataStore, PaymentSettings};
use std::sync::Arc;
use std::time::Duration;

/// Interval between sweeps of expired pending authentications
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for callbacks
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout orchestrator
    pub checkout: CheckoutService,
    /// Public key embedded in the checkout page
    pub client_key: String,
    /// Payment amount and redirect TTL
    pub settings: PaymentSettings,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Adyen client
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let settings = load_payment_settings()?;

        let adyen_config = AdyenConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Adyen: {}", e))?;
        let client_key = adyen_config.client_key.clone();
        let merchant_account = adyen_config.merchant_account.clone();
        let gateway = AdyenCheckoutClient::new(adyen_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Adyen: {}", e))?;

        let store = Arc::new(InMemoryPaymentDataStore::new(settings.redirect_ttl_secs));
        let checkout = CheckoutService::new(
            Arc::new(gateway),
            store,
            merchant_account,
            &config.base_url,
            settings.clone(),
        );

        Ok(Self {
            checkout,
            client_key,
            settings,
            config,
        })
    }

    /// Assemble state from prebuilt parts (tests, alternative gateways)
    pub fn from_parts(
        checkout: CheckoutService,
        client_key: impl Into<String>,
        settings: PaymentSettings,
        config: AppConfig,
    ) -> Self {
        Self {
            checkout,
            client_key: client_key.into(),
            settings,
            config,
        }
    }

    /// Start a background task that purges expired pending authentications.
    pub fn start_store_cleanup(&self) {
        let store: Arc<dyn PaymentDataStore> = Arc::clone(self.checkout.store());

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PURGE_INTERVAL);
            loop {
                interval.tick().await;
                let purged = store.purge_expired();
                if purged > 0 {
                    tracing::info!(purged, remaining = store.len(), "purged expired pending authentications");
                }
            }
        });
    }
}

/// Load payment settings from config file
fn load_payment_settings() -> anyhow::Result<PaymentSettings> {
    let config_paths = [
        "config/checkout.toml",
        "../config/checkout.toml",
        "../../config/checkout.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings = PaymentSettings::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded checkout settings from {}: {} {}",
                path,
                settings.amount,
                settings.currency
            );
            return Ok(settings);
        }
    }

    tracing::warn!("No checkout settings found, using defaults");
    Ok(PaymentSettings::default())
}
