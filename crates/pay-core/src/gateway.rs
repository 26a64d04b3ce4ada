//! # Payment Gateway Trait
//!
//! The capabilities the checkout flow consumes from a payment processor.
//! The Adyen client in `pay-adyen` is the production implementation; tests
//! plug in scripted gateways.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentGateway (trait)                   │
//! │  ├── payment_methods()                                      │
//! │  ├── payments()                                             │
//! │  ├── payment_details()                                      │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │ AdyenCheckout │
//!                    │    Client     │
//!                    └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::payment::{
    PaymentDetailsRequest, PaymentMethodsRequest, PaymentMethodsResponse, PaymentRequest,
    PaymentResponse,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Black-box client to a payment processor's checkout API.
///
/// Implementations must not retry; failures are reported to the caller as-is.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// List the payment methods available for a merchant and channel.
    async fn payment_methods(
        &self,
        request: &PaymentMethodsRequest,
    ) -> PaymentResult<PaymentMethodsResponse>;

    /// Submit a payment.
    async fn payments(&self, request: &PaymentRequest) -> PaymentResult<PaymentResponse>;

    /// Continue a payment after a redirect or 3DS challenge.
    async fn payment_details(
        &self,
        request: &PaymentDetailsRequest,
    ) -> PaymentResult<PaymentResponse>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
