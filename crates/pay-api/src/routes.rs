//! # Routes
//!
//! Axum router configuration for the checkout API and pages.

use crate::handlers;
use crate::pages;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use pay_core::Outcome;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - API:
///   - POST /api/getPaymentMethods - Payment methods for the merchant
///   - POST /api/initiatePayment - Start a payment
///   - POST /api/submitAdditionalDetails - Drop-in additional details
///   - GET  /api/handShopperRedirect - Return from a redirect flow
///   - POST /api/handleShopperRedirect - Return from a 3DS1 form post
///
/// - Pages:
///   - GET /, /checkout, /result/{type}
///   - GET /result{suffix} - Targets of the shopper-redirect 302s
///   - GET /js/adyenImplementation.js
///
/// - GET /health
pub fn create_router(state: AppState) -> Router {
    // Drop-in calls are same-origin; open CORS only outside production
    let cors = if state.config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        .route("/getPaymentMethods", post(handlers::get_payment_methods))
        .route("/initiatePayment", post(handlers::initiate_payment))
        .route(
            "/submitAdditionalDetails",
            post(handlers::submit_additional_details),
        )
        .route("/handShopperRedirect", get(handlers::handle_redirect_result))
        .route(
            "/handleShopperRedirect",
            post(handlers::handle_three_ds_one_redirect),
        );

    let mut page_routes = Router::new()
        .route("/", get(pages::preview))
        .route("/checkout", get(pages::checkout))
        .route("/result/{type}", get(pages::result))
        .route("/js/adyenImplementation.js", get(pages::dropin_script));

    for outcome in [
        Outcome::Success,
        Outcome::Pending,
        Outcome::Failed,
        Outcome::Error,
    ] {
        page_routes = page_routes.route(
            &outcome.redirect_path(),
            get(move || async move { pages::render_result(outcome.suffix()) }),
        );
    }

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .merge(page_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
