//! # pay-api
//!
//! HTTP API layer for adyen-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints proxying the checkout flow to Adyen
//! - Shopper-redirect handlers that finish 3DS/redirect payments
//! - Server-rendered checkout pages
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/getPaymentMethods` | List payment methods |
//! | POST | `/api/initiatePayment` | Start a payment |
//! | POST | `/api/submitAdditionalDetails` | Submit 3DS2 / drop-in details |
//! | GET | `/api/handShopperRedirect` | Redirect-flow return (`redirectResult`, `orderRef`) |
//! | POST | `/api/handleShopperRedirect` | 3DS1 form return (`MD`, `PaRes`, `orderRef`) |
//! | GET | `/`, `/checkout`, `/result/{type}` | Pages |

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
