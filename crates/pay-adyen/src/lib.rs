//! # pay-adyen
//!
//! Adyen Checkout API client for adyen-checkout-rs.
//!
//! Implements `pay_core::PaymentGateway` with three calls:
//!
//! | Capability | Endpoint |
//! |------------|----------|
//! | `payment_methods` | `POST /v68/paymentMethods` |
//! | `payments` | `POST /v68/payments` |
//! | `payment_details` | `POST /v68/payments/details` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_adyen::AdyenCheckoutClient;
//! use pay_core::{PaymentGateway, PaymentMethodsRequest};
//!
//! // Reads ADYEN_API_KEY, ADYEN_MERCHANT_ACCOUNT, ADYEN_CLIENT_KEY
//! let client = AdyenCheckoutClient::from_env()?;
//!
//! let methods = client
//!     .payment_methods(&PaymentMethodsRequest::web(&client.config().merchant_account))
//!     .await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::AdyenCheckoutClient;
pub use config::{AdyenConfig, AdyenEnvironment, API_VERSION, TEST_CHECKOUT_URL};
