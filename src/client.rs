//! The NovinPay client: configuration, request dispatch and the typed
//! gateway operations.
//!
//! Every operation follows the same shape: obtain a bearer token from the
//! per-client [`TokenCache`], merge the caller's fields with the terminal
//! and product constants, POST the result, and map the response envelope to
//! a payload or an error.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::TokenCache;
use crate::errors::Result;
use crate::services::Service;
use crate::types::{
    BillPaymentRequest, ConfirmResponse, DirectChargeRequest, Envelope, InternetChargeRequest,
    MultiAccountPurchaseRequest, PinChargeRequest, PurchaseRequest, PurchaseResponse,
    TransactionReference, VerifyResponse,
};

/// Uniform deadline for every outbound call, token exchange included.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Construction-time configuration for a [`NovinpayClient`].
///
/// # Examples
///
/// ```
/// use novinpay_rs::NovinpayConfig;
///
/// let config = NovinpayConfig::new(
///     "https://pna.shaparak.ir",
///     "12345678",
///     "merchant-user",
///     "merchant-pass",
/// );
/// assert_eq!(config.terminal_id, "12345678");
/// ```
#[derive(Clone, Debug)]
pub struct NovinpayConfig {
    /// Gateway origin, scheme and host (e.g. `https://pna.shaparak.ir`)
    pub base_url: String,

    /// Terminal number issued by the gateway operator
    pub terminal_id: String,

    /// Merchant username for the credential exchange
    pub username: String,

    /// Merchant password for the credential exchange
    pub password: String,
}

impl NovinpayConfig {
    /// Creates a new configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Gateway origin, e.g. `https://pna.shaparak.ir`
    /// * `terminal_id` - Terminal number issued by the gateway operator
    /// * `username` - Merchant username
    /// * `password` - Merchant password
    pub fn new(
        base_url: impl Into<String>,
        terminal_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            terminal_id: terminal_id.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body wrapper merging the fixed operation constants with the caller's
/// request fields.
#[derive(Serialize)]
struct GatewayRequest<'a, T: Serialize> {
    #[serde(rename = "terminalNumber")]
    terminal_number: &'a str,

    #[serde(rename = "serviceCode", skip_serializing_if = "Option::is_none")]
    service_code: Option<u32>,

    #[serde(rename = "serviceType", skip_serializing_if = "Option::is_none")]
    service_type: Option<&'static str>,

    #[serde(flatten)]
    fields: &'a T,
}

/// Asynchronous client for the NovinPay payment gateway.
///
/// One instance owns the configuration, a shared HTTP connection pool and
/// the bearer-token cache; it is `Send + Sync` and meant to be shared by
/// reference across tasks. The only mutable state is the token slot, so
/// concurrent operations never interfere beyond coalescing their token
/// refresh.
///
/// # Examples
///
/// ```no_run
/// use novinpay_rs::{NovinpayClient, NovinpayConfig, types::PurchaseRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NovinpayConfig::new(
///     "https://pna.shaparak.ir",
///     "12345678",
///     "merchant-user",
///     "merchant-pass",
/// );
/// let client = NovinpayClient::new(config)?;
///
/// let session = client
///     .purchase(&PurchaseRequest {
///         invoice: "INV-001".to_string(),
///         invoice_date: "2024-01-15".to_string(),
///         amount: 100_000,
///         callback_url: "https://shop.example/callback".to_string(),
///         mobile: "09120000000".to_string(),
///         description: None,
///         payer_name: None,
///         payer_mail: None,
///     })
///     .await?;
///
/// println!("redirect payer to {}", session.url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct NovinpayClient {
    config: NovinpayConfig,
    base: Url,
    http: Client,
    tokens: TokenCache,
}

impl NovinpayClient {
    /// Creates a client from a configuration.
    ///
    /// Fails if the configured base URL does not parse.
    pub fn new(config: NovinpayConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        Ok(Self {
            config,
            base,
            http: Client::new(),
            tokens: TokenCache::new(),
        })
    }

    /// Replaces the HTTP client, keeping configuration and token cache.
    ///
    /// The 15-second request deadline is applied per request, so it also
    /// covers clients supplied here.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Registers a standard purchase and opens a payment session.
    ///
    /// On success the gateway returns the payment page `url` and the
    /// session's `urlId`; keep the latter together with the invoice to
    /// drive [`confirm`](Self::confirm), the verify calls and
    /// [`reverse`](Self::reverse).
    pub async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse> {
        self.call(Service::PURCHASE, request).await
    }

    /// Registers a purchase whose settlement is split across several SHEBA
    /// accounts.
    pub async fn multi_account_purchase(
        &self,
        request: &MultiAccountPurchaseRequest,
    ) -> Result<PurchaseResponse> {
        self.call(Service::MULTI_ACCOUNT_PURCHASE, request).await
    }

    /// Registers a utility-bill payment.
    pub async fn bill_payment(&self, request: &BillPaymentRequest) -> Result<PurchaseResponse> {
        self.call(Service::BILL_PAYMENT, request).await
    }

    /// Registers a direct mobile top-up for the request's operator.
    pub async fn direct_charge(&self, request: &DirectChargeRequest) -> Result<PurchaseResponse> {
        self.call(Service::direct_charge(request.operator), request)
            .await
    }

    /// Registers a PIN (voucher) charge purchase.
    pub async fn pin_charge(&self, request: &PinChargeRequest) -> Result<PurchaseResponse> {
        self.call(Service::pin_charge(request.operator), request)
            .await
    }

    /// Registers an internet-package purchase.
    pub async fn internet_charge(
        &self,
        request: &InternetChargeRequest,
    ) -> Result<PurchaseResponse> {
        self.call(Service::internet_charge(request.operator), request)
            .await
    }

    /// Confirms a settled transaction and returns its settlement record.
    ///
    /// The gateway requires confirmation after the payer returns to the
    /// callback URL; an unconfirmed transaction is eventually reversed on
    /// the gateway side.
    pub async fn confirm(&self, reference: &TransactionReference) -> Result<ConfirmResponse> {
        self.call(Service::CONFIRM, reference).await
    }

    /// Verifies a transaction, returning the gateway's plain envelope.
    ///
    /// The gateway exposes two verification calls with different response
    /// detail; this is the simple one. See
    /// [`verify_payment`](Self::verify_payment) for the detailed record.
    pub async fn verify_transaction(
        &self,
        reference: &TransactionReference,
    ) -> Result<Envelope<Value>> {
        let service = Service::VERIFY_TRANSACTION;
        self.dispatch(service, reference).await?.checked(service.name)
    }

    /// Verifies a transaction, returning the detailed settlement record
    /// inside its envelope.
    pub async fn verify_payment(
        &self,
        reference: &TransactionReference,
    ) -> Result<Envelope<VerifyResponse>> {
        let service = Service::VERIFY_PAYMENT;
        self.dispatch(service, reference).await?.checked(service.name)
    }

    /// Reverses a transaction.
    ///
    /// The reverse envelope carries no data payload; success is the zero
    /// result code, and failures surface through
    /// [`NovinpayError::Gateway`](crate::NovinpayError::Gateway) as usual.
    pub async fn reverse(&self, reference: &TransactionReference) -> Result<()> {
        let service = Service::REVERSE;
        self.dispatch::<_, Value>(service, reference)
            .await?
            .checked(service.name)?;
        Ok(())
    }

    /// Dispatches an operation and unwraps its data payload.
    async fn call<T, R>(&self, service: Service, fields: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        self.dispatch(service, fields).await?.into_data(service.name)
    }

    /// Issues one authenticated gateway call and parses the envelope.
    async fn dispatch<T, R>(&self, service: Service, fields: &T) -> Result<Envelope<R>>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let token = self
            .tokens
            .obtain(&self.http, &self.base, &self.config)
            .await?;

        let url = self.base.join(service.path)?;
        let body = GatewayRequest {
            terminal_number: &self.config.terminal_id,
            service_code: service.code,
            service_type: service.service_type,
            fields,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(operation = service.name, path = service.path, "dispatching");

        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let envelope: Envelope<R> = serde_json::from_str(&text)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            operation = service.name,
            result_code = envelope.result_code,
            "envelope received"
        );

        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NovinpayError;
    use serde_json::json;

    fn test_config() -> NovinpayConfig {
        NovinpayConfig::new("https://gw.test", "12345678", "user", "pass")
    }

    #[test]
    fn test_config_creation() {
        let config = test_config();
        assert_eq!(config.base_url, "https://gw.test");
        assert_eq!(config.terminal_id, "12345678");
        assert_eq!(config.username, "user");
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let config = NovinpayConfig::new("not a url", "1", "u", "p");
        let err = NovinpayClient::new(config).unwrap_err();
        assert!(matches!(err, NovinpayError::UrlParse(_)));
    }

    #[test]
    fn test_client_builder() {
        let client = NovinpayClient::new(test_config())
            .unwrap()
            .with_http_client(Client::new());
        assert_eq!(client.base.as_str(), "https://gw.test/");
    }

    #[test]
    fn test_gateway_request_merges_constants_and_fields() {
        let reference = TransactionReference {
            invoice: "INV-001".to_string(),
            url_id: "U1".to_string(),
        };
        let service = Service::direct_charge(crate::services::Operator::Mtn);
        let body = GatewayRequest {
            terminal_number: "12345678",
            service_code: service.code,
            service_type: service.service_type,
            fields: &reference,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "terminalNumber": "12345678",
                "serviceCode": 2,
                "serviceType": "CHARGE",
                "invoice": "INV-001",
                "urlId": "U1",
            })
        );
    }

    #[test]
    fn test_gateway_request_omits_absent_constants() {
        let reference = TransactionReference {
            invoice: "INV-001".to_string(),
            url_id: "U1".to_string(),
        };
        let body = GatewayRequest {
            terminal_number: "12345678",
            service_code: Service::CONFIRM.code,
            service_type: Service::CONFIRM.service_type,
            fields: &reference,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("serviceCode").is_none());
        assert!(value.get("serviceType").is_none());
    }
}
