//! # Adyen Checkout RS
//!
//! Demo web checkout backed by Adyen.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ADYEN_API_KEY=AQE...
//! export ADYEN_MERCHANT_ACCOUNT=MyMerchantAccountECOM
//! export ADYEN_CLIENT_KEY=test_...
//!
//! # Run the server
//! adyen-checkout
//! ```

use pay_api::{routes, state::AppState};
use std::net::SocketAddr;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.checkout.provider_name());
    info!(
        "Demo amount: {} {} (minor units)",
        state.settings.amount, state.settings.currency
    );

    state.start_store_cleanup();

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Adyen checkout starting on http://{}", addr);

    if !is_prod {
        info!("🛒 Shop: http://{}/", addr);
        info!("💳 Checkout: http://{}/checkout", addr);
        info!("↩️  Shopper redirect: http://{}/api/handShopperRedirect", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  💳 Adyen Checkout RS 💳
  ━━━━━━━━━━━━━━━━━━━━━━━
  Drop-in demo checkout
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
