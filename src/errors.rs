//! Error types for the novinpay-rs library.
//!
//! This module defines all error types that can occur while talking to the
//! NovinPay gateway.

use thiserror::Error;

/// Main error type for gateway operations.
#[derive(Error, Debug)]
pub enum NovinpayError {
    /// Error during HTTP request/response handling.
    ///
    /// Timeouts surface here as well; use [`reqwest::Error::is_timeout`] on
    /// the source to distinguish an expired 15-second deadline from other
    /// transport failures.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a body that is not a valid envelope
    #[error("invalid gateway response: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing the configured base URL or joining an operation path
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The authentication endpoint was reachable but refused the credential
    /// exchange, or answered success without a token.
    #[error("authentication failed ({code}): {message}")]
    Authentication {
        /// Result code reported by the authentication endpoint
        code: i64,
        /// Result message reported by the authentication endpoint
        message: String,
    },

    /// An operation endpoint answered with a non-zero result code.
    ///
    /// Carries the operation name and the envelope fields so callers can
    /// branch on gateway-specific codes without string inspection.
    #[error("gateway rejected `{operation}` ({code}): {message}")]
    Gateway {
        /// Name of the operation that was rejected
        operation: &'static str,
        /// The envelope's `resultCode`
        code: i64,
        /// The envelope's `resultMsg`
        message: String,
    },

    /// A mobile operator outside the supported set (MCI, MTN, RTL)
    #[error("unknown mobile operator: {0}")]
    InvalidOperator(String),

    /// The gateway reported success but the envelope carried no payload
    #[error("operation `{0}` succeeded without a data payload")]
    MissingData(&'static str),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, NovinpayError>;

impl NovinpayError {
    /// Returns the gateway result code, if this error carries one.
    pub fn result_code(&self) -> Option<i64> {
        match self {
            NovinpayError::Authentication { code, .. } => Some(*code),
            NovinpayError::Gateway { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NovinpayError::Gateway {
            operation: "purchase",
            code: 2,
            message: "insufficient funds".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "gateway rejected `purchase` (2): insufficient funds"
        );
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: NovinpayError = json_err.into();
        assert!(matches!(err, NovinpayError::Json(_)));
    }

    #[test]
    fn test_result_code_accessor() {
        let err = NovinpayError::Authentication {
            code: 12,
            message: "bad credentials".to_string(),
        };
        assert_eq!(err.result_code(), Some(12));

        let err = NovinpayError::InvalidOperator("XYZ".to_string());
        assert_eq!(err.result_code(), None);
    }
}
