//! # pay-core
//!
//! Core types and traits for the adyen-checkout payment integration.
//!
//! This crate provides:
//! - `PaymentGateway` trait for payment processor clients
//! - Checkout wire types (`PaymentRequest`, `PaymentResponse`, `Action`, ...)
//! - `ResultCode` and the terminal `Outcome` mapping
//! - `PaymentDataStore` for correlating a payment with the shopper's return
//! - `CheckoutService`, the orchestrator tying it together
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CheckoutService, InMemoryPaymentDataStore, PaymentSettings, RedirectDetails};
//!
//! let checkout = CheckoutService::new(
//!     gateway,
//!     Arc::new(InMemoryPaymentDataStore::default()),
//!     "MyMerchantAccount",
//!     "http://localhost:8080",
//!     PaymentSettings::default(),
//! );
//!
//! // Browser submitted the drop-in state
//! let response = checkout.initiate_payment(initiation).await?;
//!
//! // Later, the shopper comes back from the issuer
//! let outcome = checkout
//!     .handle_redirect(&order_ref, RedirectDetails::RedirectResult(Some(result)))
//!     .await?;
//! // Redirect to outcome.redirect_path()
//! ```

pub mod checkout;
pub mod error;
pub mod gateway;
pub mod outcome;
pub mod payment;
pub mod store;

// Re-exports for convenience
pub use checkout::{
    CheckoutService, InitiatePayment, PaymentSettings, RedirectDetails, SHOPPER_REDIRECT_PATH,
};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use outcome::{Outcome, ResultCode};
pub use payment::{
    Action, Amount, Channel, JsonObject, PaymentDetailsRequest, PaymentMethodsRequest,
    PaymentMethodsResponse, PaymentRequest, PaymentResponse,
};
pub use store::{InMemoryPaymentDataStore, PaymentDataStore, PendingAuthentication};
