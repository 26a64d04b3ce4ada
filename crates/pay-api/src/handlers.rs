//! # Request Handlers
//!
//! Axum request handlers for the checkout API.
//! JSON endpoints relay gateway responses verbatim; the shopper-redirect
//! endpoints answer with a `302` to the outcome page.

use crate::state::AppState;
use axum::{
    extract::{ConnectInfo, FromRequestParts, Query, State},
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use pay_core::{
    InitiatePayment, Outcome, PaymentDetailsRequest, PaymentError, PaymentMethodsResponse,
    PaymentResponse, RedirectDetails,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::net::SocketAddr;
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Initiate payment request (drop-in `state.data`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    /// Shopper-selected payment method
    pub payment_method: Value,
    /// Browser fingerprint for 3DS2
    #[serde(default)]
    pub browser_info: Option<Value>,
}

/// Query of the redirect-flow return
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResultQuery {
    #[serde(default)]
    pub redirect_result: Option<String>,
    pub order_ref: String,
}

/// Query carrying the order reference
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRefQuery {
    pub order_ref: String,
}

/// Form posted back by a 3DS1 issuer page
#[derive(Debug, Deserialize)]
pub struct ThreeDsOneForm {
    #[serde(rename = "MD")]
    pub md: String,
    #[serde(rename = "PaRes")]
    pub pa_res: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Gateway failures are not translated: every one is an unhandled `500`.
fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    let mut response = ErrorResponse::new("Internal Server Error", status.as_u16());
    if err.is_gateway_failure() {
        response = response.with_details(err.to_string());
    }
    (status, Json(response))
}

/// Peer address of the inbound connection, when the server was started with
/// connect info.
#[derive(Debug, Clone)]
pub struct ShopperIp(pub Option<String>);

impl<S> FromRequestParts<S> for ShopperIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        Ok(ShopperIp(ip))
    }
}

fn redirect_to(outcome: Outcome) -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, outcome.redirect_path())])
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "adyen-checkout",
        "provider": state.checkout.provider_name(),
        "pending_authentications": state.checkout.store().len(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `POST /api/getPaymentMethods`
#[instrument(skip(state))]
pub async fn get_payment_methods(
    State(state): State<AppState>,
) -> Result<Json<PaymentMethodsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let response = state.checkout.payment_methods().await.map_err(|e| {
        error!("Failed to fetch payment methods: {}", e);
        payment_error_to_response(e)
    })?;

    Ok(Json(response))
}

/// `POST /api/initiatePayment`
#[instrument(skip(state, request))]
pub async fn initiate_payment(
    State(state): State<AppState>,
    shopper_ip: ShopperIp,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<Json<PaymentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let initiation = InitiatePayment {
        payment_method: request.payment_method,
        browser_info: request.browser_info,
        shopper_ip: shopper_ip.0,
    };

    let response = state.checkout.initiate_payment(initiation).await.map_err(|e| {
        error!("Failed to initiate payment: {}", e);
        payment_error_to_response(e)
    })?;

    Ok(Json(response))
}

/// `POST /api/submitAdditionalDetails`
#[instrument(skip(state, request))]
pub async fn submit_additional_details(
    State(state): State<AppState>,
    Json(request): Json<PaymentDetailsRequest>,
) -> Result<Json<PaymentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let response = state
        .checkout
        .submit_additional_details(request)
        .await
        .map_err(|e| {
            error!("Failed to submit additional details: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(response))
}

/// `GET /api/handShopperRedirect?redirectResult=&orderRef=`
#[instrument(skip(state, query), fields(order_ref = %query.order_ref))]
pub async fn handle_redirect_result(
    State(state): State<AppState>,
    Query(query): Query<RedirectResultQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let outcome = state
        .checkout
        .handle_redirect(
            &query.order_ref,
            RedirectDetails::RedirectResult(query.redirect_result),
        )
        .await
        .map_err(|e| {
            error!("Failed to complete redirect: {}", e);
            payment_error_to_response(e)
        })?;

    info!("Redirecting shopper to {}", outcome.redirect_path());
    Ok(redirect_to(outcome))
}

/// `POST /api/handleShopperRedirect?orderRef=` with form `MD`, `PaRes`
#[instrument(skip(state, query, form), fields(order_ref = %query.order_ref))]
pub async fn handle_three_ds_one_redirect(
    State(state): State<AppState>,
    Query(query): Query<OrderRefQuery>,
    Form(form): Form<ThreeDsOneForm>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let details = RedirectDetails::ThreeDsOne {
        md: form.md,
        pa_res: form.pa_res,
    };

    let outcome = state
        .checkout
        .handle_redirect(&query.order_ref, details)
        .await
        .map_err(|e| {
            error!("Failed to complete 3DS1 redirect: {}", e);
            payment_error_to_response(e)
        })?;

    info!("Redirecting shopper to {}", outcome.redirect_path());
    Ok(redirect_to(outcome))
}
