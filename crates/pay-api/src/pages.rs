//! # Checkout Pages
//!
//! Server-rendered HTML for the preview, checkout and result pages, plus the
//! drop-in bootstrap script.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
};

/// Adyen Web drop-in release loaded from the CDN
const ADYEN_WEB_VERSION: &str = "5.53.0";

const DROPIN_SCRIPT: &str = include_str!("../static/adyenImplementation.js");

const STYLE: &str = "font-family: system-ui; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; background: linear-gradient(135deg, #0abf53 0%, #00112c 100%);";
const CARD_STYLE: &str = "background: white; padding: 60px; border-radius: 16px; text-align: center; min-width: 360px;";

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Number of minor-unit digits for an ISO 4217 currency
fn currency_exponent(currency: &str) -> u32 {
    match currency {
        "CVE" | "DJF" | "GNF" | "IDR" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX" | "VND"
        | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Minor units rendered in major units, e.g. `1000 EUR` as `10.00`
fn format_minor_units(value: i64, currency: &str) -> String {
    let exponent = currency_exponent(currency);
    if exponent == 0 {
        return value.to_string();
    }
    let scale = 10_u64.pow(exponent);
    let sign = if value < 0 { "-" } else { "" };
    let value = value.unsigned_abs();
    format!(
        "{sign}{}.{:0width$}",
        value / scale,
        value % scale,
        width = exponent as usize
    )
}

/// Result page copy for a `/result/{type}` value
fn result_copy(kind: &str) -> (&'static str, &'static str, &'static str) {
    match kind {
        "success" => ("✅", "Payment Successful!", "Your order has been placed."),
        "pending" => (
            "⏳",
            "Payment Pending",
            "We will let you know as soon as the payment is confirmed.",
        ),
        "failed" => ("❌", "Payment Failed", "The payment was refused. No charges were made."),
        _ => ("⚠️", "Something Went Wrong", "An error occurred while processing the payment."),
    }
}

/// `GET /`
pub async fn preview(State(state): State<AppState>) -> impl IntoResponse {
    let amount = &state.settings;
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Checkout Demo</title></head>
<body style="{STYLE}">
    <div style="{CARD_STYLE}">
        <div style="font-size: 60px;">🛒</div>
        <h1>Your Cart</h1>
        <p>Demo item: <strong>{price} {currency}</strong></p>
        <a href="/checkout" style="display: inline-block; padding: 12px 32px; background: #0abf53; color: white; border-radius: 8px; text-decoration: none;">Checkout</a>
    </div>
</body>
</html>
"#,
        price = format_minor_units(amount.amount, &amount.currency),
        currency = escape_html(&amount.currency),
    ))
}

/// `GET /checkout`
pub async fn checkout(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Checkout</title>
    <link rel="stylesheet" href="https://checkoutshopper-{environment}.adyen.com/checkoutshopper/sdk/{version}/adyen.css">
</head>
<body style="{STYLE}">
    <div style="{CARD_STYLE}">
        <h1>Checkout</h1>
        <div id="dropin"></div>
        <span id="clientKey" hidden>{client_key}</span>
        <span id="environment" hidden>{environment}</span>
        <span id="amount" data-value="{amount}" data-currency="{currency}" hidden></span>
    </div>
    <script src="https://checkoutshopper-{environment}.adyen.com/checkoutshopper/sdk/{version}/adyen.js"></script>
    <script src="/js/adyenImplementation.js"></script>
</body>
</html>
"#,
        environment = client_key_environment(&state.client_key),
        version = ADYEN_WEB_VERSION,
        client_key = escape_html(&state.client_key),
        amount = state.settings.amount,
        currency = escape_html(&state.settings.currency),
    ))
}

/// `GET /result/{type}`
pub async fn result(Path(kind): Path<String>) -> impl IntoResponse {
    render_result(&kind)
}

/// Result page for an outcome suffix
pub fn render_result(kind: &str) -> Html<String> {
    let (icon, title, message) = result_copy(kind);
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body style="{STYLE}">
    <div style="{CARD_STYLE}">
        <div style="font-size: 60px;">{icon}</div>
        <h1>{title}</h1>
        <p style="color: #666;">{message}</p>
        <a href="/">Return to shop</a>
    </div>
</body>
</html>
"#
    ))
}

/// `GET /js/adyenImplementation.js`
pub async fn dropin_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DROPIN_SCRIPT,
    )
}

/// `test` or `live`, from the client key prefix
fn client_key_environment(client_key: &str) -> &'static str {
    if client_key.starts_with("live_") {
        "live"
    } else {
        "test"
    }
}
