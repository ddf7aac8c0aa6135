//! Core type definitions for the NovinPay wire contract.
//!
//! This module contains the uniform response envelope, the per-operation
//! request value objects, and the payloads the gateway returns for the
//! purchase and transaction-lifecycle calls.

use serde::{Deserialize, Serialize};

use crate::errors::{NovinpayError, Result};
use crate::services::Operator;

/// The uniform response shape every gateway endpoint answers with.
///
/// `resultCode == 0` is the sole success discriminator; any other value is a
/// failure regardless of what `resultMsg` says. The payload type `T` varies
/// by operation (structured object, bare string, or absent).
///
/// # Examples
///
/// ```
/// use novinpay_rs::types::{Envelope, PurchaseResponse};
///
/// let raw = r#"{"resultCode":0,"resultMsg":"ok","data":{"urlId":"U1","url":"https://gw/pay/U1"}}"#;
/// let envelope: Envelope<PurchaseResponse> = serde_json::from_str(raw).unwrap();
/// assert!(envelope.is_success());
/// assert_eq!(envelope.data.unwrap().url_id, "U1");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Envelope<T> {
    /// Gateway result code; `0` means success
    #[serde(rename = "resultCode")]
    pub result_code: i64,

    /// Human-readable result message
    #[serde(rename = "resultMsg", default)]
    pub result_msg: String,

    /// Operation-specific payload, absent on most failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Returns `true` when the envelope's result code signals success.
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }

    /// Fails with [`NovinpayError::Gateway`] unless the result code is zero.
    pub(crate) fn checked(self, operation: &'static str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NovinpayError::Gateway {
                operation,
                code: self.result_code,
                message: self.result_msg,
            })
        }
    }

    /// Unwraps the payload of a successful envelope.
    pub(crate) fn into_data(self, operation: &'static str) -> Result<T> {
        self.checked(operation)?
            .data
            .ok_or(NovinpayError::MissingData(operation))
    }
}

/// Response of the credential exchange at `/token/getToken`.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    /// Gateway result code; `0` means the exchange succeeded
    #[serde(rename = "resultCode")]
    pub result_code: i64,

    /// Result message, typically only meaningful on failure
    #[serde(rename = "resultMsg", default)]
    pub result_msg: String,

    /// The bearer token, present on success
    pub token: Option<String>,

    /// Token lifetime in seconds, when the gateway reports one
    pub expiry: Option<i64>,
}

/// A standard purchase request.
///
/// # Examples
///
/// ```
/// use novinpay_rs::types::PurchaseRequest;
///
/// let request = PurchaseRequest {
///     invoice: "INV-001".to_string(),
///     invoice_date: "2024-01-15".to_string(),
///     amount: 100_000,
///     callback_url: "https://shop.example/callback".to_string(),
///     mobile: "09120000000".to_string(),
///     description: None,
///     payer_name: None,
///     payer_mail: None,
/// };
/// assert_eq!(request.amount, 100_000);
/// ```
#[derive(Serialize, Debug, Clone)]
pub struct PurchaseRequest {
    /// Merchant-side invoice identifier
    pub invoice: String,

    /// Invoice date as the gateway expects it (e.g. `2024-01-15`)
    #[serde(rename = "invoiceDate")]
    pub invoice_date: String,

    /// Amount in Rials
    pub amount: u64,

    /// URL the payer is redirected to after the gateway page
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,

    /// Payer mobile number
    pub mobile: String,

    /// Optional free-form description shown on the gateway page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional payer display name
    #[serde(rename = "payerName", skip_serializing_if = "Option::is_none")]
    pub payer_name: Option<String>,

    /// Optional payer e-mail address
    #[serde(rename = "payerMail", skip_serializing_if = "Option::is_none")]
    pub payer_mail: Option<String>,
}

/// A purchase split across several settlement accounts.
///
/// `shared_value[i]` is the share (in Rials) settled into `sheba[i]`; the
/// gateway expects both lists in matching order.
#[derive(Serialize, Debug, Clone)]
pub struct MultiAccountPurchaseRequest {
    /// Merchant-side invoice identifier
    pub invoice: String,

    /// Invoice date as the gateway expects it
    #[serde(rename = "invoiceDate")]
    pub invoice_date: String,

    /// Total amount in Rials
    pub amount: u64,

    /// URL the payer is redirected to after the gateway page
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,

    /// Payer mobile number
    pub mobile: String,

    /// Per-account share amounts, in Rials
    #[serde(rename = "sharedValue")]
    pub shared_value: Vec<u64>,

    /// SHEBA account identifiers receiving the shares
    pub sheba: Vec<String>,

    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A utility-bill payment request.
#[derive(Serialize, Debug, Clone)]
pub struct BillPaymentRequest {
    /// Merchant-side invoice identifier
    pub invoice: String,

    /// Invoice date as the gateway expects it
    #[serde(rename = "invoiceDate")]
    pub invoice_date: String,

    /// Bill amount in Rials
    pub amount: u64,

    /// URL the payer is redirected to after the gateway page
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,

    /// Payer mobile number
    pub mobile: String,

    /// Bill identifier printed on the bill
    #[serde(rename = "billId")]
    pub bill_id: String,

    /// Payment identifier printed on the bill
    #[serde(rename = "paymentId")]
    pub payment_id: String,
}

/// A direct mobile top-up request.
#[derive(Serialize, Debug, Clone)]
pub struct DirectChargeRequest {
    /// Merchant-side invoice identifier
    pub invoice: String,

    /// Invoice date as the gateway expects it
    #[serde(rename = "invoiceDate")]
    pub invoice_date: String,

    /// Charge amount in Rials
    pub amount: u64,

    /// URL the payer is redirected to after the gateway page
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,

    /// Number being charged
    pub mobile: String,

    /// Target mobile operator
    pub operator: Operator,

    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A PIN (voucher) charge request.
#[derive(Serialize, Debug, Clone)]
pub struct PinChargeRequest {
    /// Merchant-side invoice identifier
    pub invoice: String,

    /// Invoice date as the gateway expects it
    #[serde(rename = "invoiceDate")]
    pub invoice_date: String,

    /// Face value of each PIN, in Rials
    pub amount: u64,

    /// URL the payer is redirected to after the gateway page
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,

    /// Payer mobile number
    pub mobile: String,

    /// Target mobile operator
    pub operator: Operator,

    /// Number of PINs requested
    pub count: u32,
}

/// An internet-package purchase request.
#[derive(Serialize, Debug, Clone)]
pub struct InternetChargeRequest {
    /// Merchant-side invoice identifier
    pub invoice: String,

    /// Invoice date as the gateway expects it
    #[serde(rename = "invoiceDate")]
    pub invoice_date: String,

    /// Package price in Rials
    pub amount: u64,

    /// URL the payer is redirected to after the gateway page
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,

    /// Number the package is activated on
    pub mobile: String,

    /// Target mobile operator
    pub operator: Operator,

    /// Operator-defined package code
    #[serde(rename = "productCode")]
    pub product_code: String,
}

/// Identifies an existing gateway transaction for
/// confirm/verify/reverse calls.
#[derive(Serialize, Debug, Clone)]
pub struct TransactionReference {
    /// Merchant-side invoice identifier used at purchase time
    pub invoice: String,

    /// Gateway session identifier returned by the purchase-family call
    #[serde(rename = "urlId")]
    pub url_id: String,
}

/// Payload returned by every purchase-family operation.
///
/// The caller redirects the payer to `url` and keeps `url_id` (paired with
/// the invoice) to drive confirm/verify/reverse later.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PurchaseResponse {
    /// Gateway session identifier for this payment attempt
    #[serde(rename = "urlId")]
    pub url_id: String,

    /// Gateway payment page the payer must be redirected to
    pub url: String,
}

/// Detailed settlement record returned by `confirm`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConfirmResponse {
    /// Merchant-side invoice identifier
    pub invoice: String,

    /// Bank reference number of the settled transaction
    #[serde(rename = "referenceNumber")]
    pub reference_number: String,

    /// Gateway tracking identifier
    #[serde(rename = "trackId")]
    pub track_id: String,

    /// Masked PAN of the paying card (e.g. `6219...1234`)
    #[serde(rename = "maskedCardNumber")]
    pub masked_card_number: String,

    /// Hash of the paying card number
    #[serde(rename = "hashedCardNumber")]
    pub hashed_card_number: String,

    /// Date the payment request was registered
    #[serde(rename = "requestDate")]
    pub request_date: String,

    /// Settled amount in Rials
    pub amount: u64,
}

/// Detailed record returned by `verify_payment`.
///
/// Same field set as [`ConfirmResponse`]; the gateway exposes it on a
/// separate path for post-settlement inquiry.
pub type VerifyResponse = ConfirmResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success_discriminator() {
        let envelope: Envelope<PurchaseResponse> = serde_json::from_value(json!({
            "resultCode": 0,
            "resultMsg": "ok",
            "data": {"urlId": "U1", "url": "https://gw/pay/U1"}
        }))
        .unwrap();
        assert!(envelope.is_success());

        let data = envelope.into_data("purchase").unwrap();
        assert_eq!(data.url_id, "U1");
        assert_eq!(data.url, "https://gw/pay/U1");
    }

    #[test]
    fn test_envelope_failure_carries_code_and_message() {
        let envelope: Envelope<PurchaseResponse> = serde_json::from_value(json!({
            "resultCode": 2,
            "resultMsg": "insufficient funds"
        }))
        .unwrap();

        let err = envelope.into_data("purchase").unwrap_err();
        match err {
            NovinpayError::Gateway {
                operation,
                code,
                message,
            } => {
                assert_eq!(operation, "purchase");
                assert_eq!(code, 2);
                assert_eq!(message, "insufficient funds");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_envelope_success_without_payload() {
        let envelope: Envelope<PurchaseResponse> =
            serde_json::from_value(json!({"resultCode": 0, "resultMsg": "ok"})).unwrap();
        let err = envelope.into_data("purchase").unwrap_err();
        assert!(matches!(err, NovinpayError::MissingData("purchase")));
    }

    #[test]
    fn test_envelope_missing_result_msg_defaults_empty() {
        let envelope: Envelope<PurchaseResponse> =
            serde_json::from_value(json!({"resultCode": 5})).unwrap();
        assert_eq!(envelope.result_msg, "");
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_purchase_request_wire_names() {
        let request = PurchaseRequest {
            invoice: "INV-001".to_string(),
            invoice_date: "2024-01-15".to_string(),
            amount: 100_000,
            callback_url: "https://shop.example/callback".to_string(),
            mobile: "09120000000".to_string(),
            description: None,
            payer_name: Some("Sara".to_string()),
            payer_mail: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["invoiceDate"], "2024-01-15");
        assert_eq!(value["callbackUrl"], "https://shop.example/callback");
        assert_eq!(value["payerName"], "Sara");
        // skipped optionals must not appear on the wire
        assert!(value.get("description").is_none());
        assert!(value.get("payerMail").is_none());
    }

    #[test]
    fn test_multi_account_request_wire_names() {
        let request = MultiAccountPurchaseRequest {
            invoice: "INV-002".to_string(),
            invoice_date: "2024-01-15".to_string(),
            amount: 300_000,
            callback_url: "https://shop.example/callback".to_string(),
            mobile: "09120000000".to_string(),
            shared_value: vec![100_000, 200_000],
            sheba: vec!["IR820540102680020817909002".to_string(); 2],
            description: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["sharedValue"], json!([100_000, 200_000]));
        assert_eq!(value["sheba"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_confirm_response_round_trip() {
        let raw = json!({
            "invoice": "INV-001",
            "referenceNumber": "R1",
            "trackId": "T1",
            "maskedCardNumber": "6219...1234",
            "hashedCardNumber": "h",
            "requestDate": "2024-01-15",
            "amount": 100_000
        });

        let parsed: ConfirmResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.reference_number, "R1");
        assert_eq!(parsed.masked_card_number, "6219...1234");
        assert_eq!(parsed.amount, 100_000);
    }
}
