//! Bearer-token acquisition and caching.
//!
//! The gateway hands out short-lived bearer tokens from a dedicated
//! credential-exchange endpoint; every other call carries one. This module
//! owns the cached token and decides when a fresh exchange is needed, so a
//! burst of concurrent operations costs at most one authentication round
//! trip.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::Mutex;
use url::Url;

use crate::client::{NovinpayConfig, REQUEST_TIMEOUT};
use crate::errors::{NovinpayError, Result};
use crate::services::TOKEN_PATH;
use crate::types::TokenResponse;

/// Fallback token lifetime when the exchange response carries no `expiry`.
const DEFAULT_TOKEN_TTL_SECS: i64 = 300;

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// A token together with the instant it stops being usable.
#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Builds a cache entry from a successful exchange.
    ///
    /// `expiry` is the gateway-reported lifetime in seconds; absent, the
    /// entry lives [`DEFAULT_TOKEN_TTL_SECS`] from issuance.
    fn from_exchange(value: String, expiry: Option<i64>, issued_at: DateTime<Utc>) -> Self {
        let ttl = expiry.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        CachedToken {
            value,
            expires_at: issued_at + Duration::seconds(ttl),
        }
    }

    // Strictly before: a token is already stale at its expiry instant.
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Per-client token cache with single-flight refresh.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub(crate) fn new() -> Self {
        TokenCache::default()
    }

    /// Returns a bearer token that is valid right now.
    ///
    /// A cached token whose expiry lies in the future is returned without
    /// network access. Otherwise the configured credentials are exchanged at
    /// the token endpoint and the result cached. The slot lock is held
    /// across the exchange, so concurrent callers that race an expired
    /// cache all await the same in-flight request instead of issuing their
    /// own.
    ///
    /// A failed exchange leaves the previous cache state untouched.
    pub(crate) async fn obtain(
        &self,
        http: &Client,
        base: &Url,
        config: &NovinpayConfig,
    ) -> Result<String> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.is_valid_at(Utc::now()) {
                return Ok(cached.value.clone());
            }
        }

        let fresh = exchange(http, base, config).await?;
        let value = fresh.value.clone();
        *slot = Some(fresh);
        Ok(value)
    }
}

/// One credential exchange against `/token/getToken`.
async fn exchange(http: &Client, base: &Url, config: &NovinpayConfig) -> Result<CachedToken> {
    let url = base.join(TOKEN_PATH)?;
    let body = TokenRequest {
        username: &config.username,
        password: &config.password,
    };

    let response = http
        .post(url)
        .timeout(REQUEST_TIMEOUT)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;
    let text = response.text().await?;
    let parsed: TokenResponse = serde_json::from_str(&text)?;

    if parsed.result_code != 0 {
        return Err(NovinpayError::Authentication {
            code: parsed.result_code,
            message: parsed.result_msg,
        });
    }

    let value = parsed.token.ok_or_else(|| NovinpayError::Authentication {
        code: parsed.result_code,
        message: "exchange succeeded without a token".to_string(),
    })?;

    #[cfg(feature = "tracing")]
    tracing::debug!(expiry = ?parsed.expiry, "bearer token refreshed");

    Ok(CachedToken::from_exchange(value, parsed.expiry, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_expiry_is_honored() {
        let issued = Utc::now();
        let token = CachedToken::from_exchange("tok".to_string(), Some(3600), issued);
        assert_eq!(token.expires_at, issued + Duration::seconds(3600));
    }

    #[test]
    fn test_missing_expiry_falls_back_to_five_minutes() {
        let issued = Utc::now();
        let token = CachedToken::from_exchange("tok".to_string(), None, issued);

        assert_eq!(token.expires_at, issued + Duration::seconds(300));
        assert!(token.is_valid_at(issued + Duration::seconds(299)));
        // stale exactly at the expiry instant, not one tick later
        assert!(!token.is_valid_at(issued + Duration::seconds(300)));
        assert!(!token.is_valid_at(issued + Duration::seconds(301)));
    }

    #[test]
    fn test_freshly_issued_token_is_valid() {
        let issued = Utc::now();
        let token = CachedToken::from_exchange("tok".to_string(), None, issued);
        assert!(token.is_valid_at(issued));
    }
}
