//! Example purchase flow.
//!
//! Opens a payment session against a NovinPay terminal and prints the
//! gateway page the payer should be redirected to.
//!
//! Run with:
//! ```bash
//! cargo run --example purchase
//! ```
//!
//! Environment variables:
//! - NOVINPAY_BASE_URL: gateway origin
//! - NOVINPAY_TERMINAL: terminal number
//! - NOVINPAY_USERNAME / NOVINPAY_PASSWORD: merchant credentials

use novinpay_rs::types::PurchaseRequest;
use novinpay_rs::{NovinpayClient, NovinpayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let base_url = std::env::var("NOVINPAY_BASE_URL")
        .unwrap_or_else(|_| "https://pna.shaparak.ir".to_string());
    let terminal = std::env::var("NOVINPAY_TERMINAL").unwrap_or_else(|_| {
        println!("⚠️  No NOVINPAY_TERMINAL set, using a placeholder terminal");
        "12345678".to_string()
    });
    let username = std::env::var("NOVINPAY_USERNAME").unwrap_or_else(|_| "demo".to_string());
    let password = std::env::var("NOVINPAY_PASSWORD").unwrap_or_else(|_| "demo".to_string());

    println!("💳 NovinPay purchase example");
    println!("   Gateway:  {}", base_url);
    println!("   Terminal: {}", terminal);
    println!();

    let client = NovinpayClient::new(NovinpayConfig::new(base_url, terminal, username, password))?;

    println!("📡 Registering purchase...");
    let session = client
        .purchase(&PurchaseRequest {
            invoice: "INV-001".to_string(),
            invoice_date: "2024-01-15".to_string(),
            amount: 100_000,
            callback_url: "https://shop.example/callback".to_string(),
            mobile: "09120000000".to_string(),
            description: Some("example order".to_string()),
            payer_name: None,
            payer_mail: None,
        })
        .await?;

    println!("✅ Session opened");
    println!("   urlId: {}", session.url_id);
    println!("   redirect the payer to: {}", session.url);
    println!();
    println!("After the payer returns to the callback URL, confirm with the");
    println!("invoice/urlId pair (see the `confirm` method).");

    Ok(())
}
