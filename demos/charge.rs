//! Example mobile top-up flow.
//!
//! Registers a direct charge for an operator parsed from the command line
//! and prints the resulting payment session.
//!
//! Run with:
//! ```bash
//! cargo run --example charge -- MTN
//! ```

use novinpay_rs::types::DirectChargeRequest;
use novinpay_rs::{NovinpayClient, NovinpayConfig, Operator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Operator comes from untrusted input on purpose: anything outside
    // MCI/MTN/RTL fails here, before any gateway traffic.
    let operator: Operator = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "MCI".to_string())
        .parse()?;

    let base_url = std::env::var("NOVINPAY_BASE_URL")
        .unwrap_or_else(|_| "https://pna.shaparak.ir".to_string());
    let terminal = std::env::var("NOVINPAY_TERMINAL").unwrap_or_else(|_| "12345678".to_string());
    let username = std::env::var("NOVINPAY_USERNAME").unwrap_or_else(|_| "demo".to_string());
    let password = std::env::var("NOVINPAY_PASSWORD").unwrap_or_else(|_| "demo".to_string());

    println!("📱 NovinPay charge example ({operator})");

    let client = NovinpayClient::new(NovinpayConfig::new(base_url, terminal, username, password))?;

    let session = client
        .direct_charge(&DirectChargeRequest {
            invoice: "INV-CHG-001".to_string(),
            invoice_date: "2024-01-15".to_string(),
            amount: 50_000,
            callback_url: "https://shop.example/callback".to_string(),
            mobile: "09120000000".to_string(),
            operator,
            description: None,
        })
        .await?;

    println!("✅ Charge session opened: {}", session.url);

    Ok(())
}
