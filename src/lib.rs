//! # novinpay-rs
//!
//! A Rust client for the NovinPay payment gateway, covering the full
//! operation surface: purchase, multi-account purchase, bill payment,
//! direct/PIN/internet mobile charges, confirmation, both verification
//! calls and reversal, all as typed asynchronous calls over HTTPS.
//!
//! ## Features
//!
//! - **Typed operations**: every gateway call takes and returns plain Rust
//!   structs; the wire envelope never leaks except where the gateway's
//!   contract returns it whole
//! - **Token caching**: bearer tokens from the credential exchange are
//!   cached until their expiry and refreshed on demand, with concurrent
//!   refreshes coalesced into a single in-flight exchange
//! - **Closed operator set**: mobile-charge operators are an exhaustive
//!   enum; unknown operators are rejected before any network traffic
//! - **Tagged errors**: transport, authentication and gateway failures are
//!   distinct variants carrying the operation name and the gateway's
//!   result code
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use novinpay_rs::{NovinpayClient, NovinpayConfig};
//! use novinpay_rs::types::{PurchaseRequest, TransactionReference};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NovinpayConfig::new(
//!     "https://pna.shaparak.ir",
//!     "12345678",
//!     "merchant-user",
//!     "merchant-pass",
//! );
//! let client = NovinpayClient::new(config)?;
//!
//! // Open a payment session and send the payer to the gateway page.
//! let session = client
//!     .purchase(&PurchaseRequest {
//!         invoice: "INV-001".to_string(),
//!         invoice_date: "2024-01-15".to_string(),
//!         amount: 100_000,
//!         callback_url: "https://shop.example/callback".to_string(),
//!         mobile: "09120000000".to_string(),
//!         description: Some("order 1".to_string()),
//!         payer_name: None,
//!         payer_mail: None,
//!     })
//!     .await?;
//!
//! // After the payer returns to the callback URL, confirm the settlement.
//! let record = client
//!     .confirm(&TransactionReference {
//!         invoice: "INV-001".to_string(),
//!         url_id: session.url_id,
//!     })
//!     .await?;
//!
//! println!("settled, bank reference {}", record.reference_number);
//! # Ok(())
//! # }
//! ```
//!
//! ## Gateway contract
//!
//! Every endpoint answers the uniform envelope
//! `{ resultCode, resultMsg, data }`; `resultCode == 0` is the sole
//! success discriminator. Authenticated calls carry an
//! `Authorization: Bearer` header obtained from `/token/getToken`, and all
//! calls run under a uniform 15-second deadline.
//!
//! The client is a stateless translator between caller intent and the wire
//! contract: it does not persist transactions, retry failures, or
//! reconcile state. Callers track in-flight payments through the
//! `invoice`/`urlId` pair returned by the purchase-family calls.
//!
//! ## Logging
//!
//! The crate is silent by default. Enabling the `tracing` cargo feature
//! emits debug-level events around token refresh and dispatch.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod auth;
pub mod client;
pub mod errors;
pub mod services;
pub mod types;

// Re-export commonly used items
pub use client::{NovinpayClient, NovinpayConfig};
pub use errors::{NovinpayError, Result};
pub use services::Operator;
pub use types::{
    BillPaymentRequest, ConfirmResponse, DirectChargeRequest, Envelope, InternetChargeRequest,
    MultiAccountPurchaseRequest, PinChargeRequest, PurchaseRequest, PurchaseResponse,
    TransactionReference, VerifyResponse,
};
