//! Per-product wire constants for the NovinPay gateway.
//!
//! Every gateway operation is the same POST shape specialized by a target
//! path, a numeric service code and a service-type label. This module holds
//! those tables, plus the closed set of mobile operators the charge
//! products accept.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::NovinpayError;

/// Path of the credential exchange endpoint.
pub(crate) const TOKEN_PATH: &str = "/token/getToken";

const PURCHASE_PATH: &str = "/api/payment/purchase";
const PRE_TRANSACTION_PATH: &str = "/api/payment/pre-transaction";

/// Mobile operators the gateway can charge.
///
/// The set is closed; anything else is rejected with
/// [`NovinpayError::InvalidOperator`] before a request is built, rather than
/// reaching the gateway with an unset service code.
///
/// # Examples
///
/// ```
/// use novinpay_rs::Operator;
///
/// let operator: Operator = "MTN".parse().unwrap();
/// assert_eq!(operator, Operator::Mtn);
/// assert!("XYZ".parse::<Operator>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Hamrahe Aval (IR-MCI)
    Mci,
    /// Irancell
    Mtn,
    /// Rightel
    Rtl,
}

impl Operator {
    /// Wire label of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Mci => "MCI",
            Operator::Mtn => "MTN",
            Operator::Rtl => "RTL",
        }
    }

    fn direct_charge_code(self) -> u32 {
        match self {
            Operator::Mci => 1,
            Operator::Mtn => 2,
            Operator::Rtl => 3,
        }
    }

    fn pin_charge_code(self) -> u32 {
        match self {
            Operator::Mci => 5,
            Operator::Mtn => 6,
            Operator::Rtl => 7,
        }
    }

    // Internet packages share the direct-charge code range.
    fn internet_charge_code(self) -> u32 {
        self.direct_charge_code()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = NovinpayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MCI" => Ok(Operator::Mci),
            "MTN" => Ok(Operator::Mtn),
            "RTL" => Ok(Operator::Rtl),
            other => Err(NovinpayError::InvalidOperator(other.to_string())),
        }
    }
}

/// Fixed constants of one gateway operation: where it posts and which
/// product it names. Confirm/verify/reverse carry no product constants.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Service {
    pub name: &'static str,
    pub path: &'static str,
    pub code: Option<u32>,
    pub service_type: Option<&'static str>,
}

impl Service {
    pub(crate) const PURCHASE: Service = Service {
        name: "purchase",
        path: PURCHASE_PATH,
        code: Some(8),
        service_type: Some("PURCHASE"),
    };

    pub(crate) const MULTI_ACCOUNT_PURCHASE: Service = Service {
        name: "multi_account_purchase",
        path: PURCHASE_PATH,
        code: Some(9),
        service_type: Some("MULTIACCPURCHASE"),
    };

    pub(crate) const BILL_PAYMENT: Service = Service {
        name: "bill_payment",
        path: PRE_TRANSACTION_PATH,
        code: Some(4),
        service_type: Some("BILL"),
    };

    pub(crate) const CONFIRM: Service = Service {
        name: "confirm",
        path: "/api/payment/confirm-transactions",
        code: None,
        service_type: None,
    };

    pub(crate) const VERIFY_TRANSACTION: Service = Service {
        name: "verify_transaction",
        path: "/api/payment/verify-transactions",
        code: None,
        service_type: None,
    };

    pub(crate) const VERIFY_PAYMENT: Service = Service {
        name: "verify_payment",
        path: "/api/payment/verify-payment",
        code: None,
        service_type: None,
    };

    pub(crate) const REVERSE: Service = Service {
        name: "reverse",
        path: "/api/payment/reverse-transactions",
        code: None,
        service_type: None,
    };

    pub(crate) fn direct_charge(operator: Operator) -> Service {
        Service {
            name: "direct_charge",
            path: PRE_TRANSACTION_PATH,
            code: Some(operator.direct_charge_code()),
            service_type: Some("CHARGE"),
        }
    }

    pub(crate) fn pin_charge(operator: Operator) -> Service {
        Service {
            name: "pin_charge",
            path: PRE_TRANSACTION_PATH,
            code: Some(operator.pin_charge_code()),
            service_type: Some("PINCHARGE"),
        }
    }

    pub(crate) fn internet_charge(operator: Operator) -> Service {
        Service {
            name: "internet_charge",
            path: PRE_TRANSACTION_PATH,
            code: Some(operator.internet_charge_code()),
            service_type: Some("INTERNET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parsing() {
        assert_eq!("MCI".parse::<Operator>().unwrap(), Operator::Mci);
        assert_eq!("MTN".parse::<Operator>().unwrap(), Operator::Mtn);
        assert_eq!("RTL".parse::<Operator>().unwrap(), Operator::Rtl);

        let err = "XYZ".parse::<Operator>().unwrap_err();
        assert!(matches!(err, NovinpayError::InvalidOperator(ref v) if v == "XYZ"));
        // case matters on the wire
        assert!("mci".parse::<Operator>().is_err());
    }

    #[test]
    fn test_operator_serde_labels() {
        assert_eq!(serde_json::to_string(&Operator::Rtl).unwrap(), "\"RTL\"");
        let parsed: Operator = serde_json::from_str("\"MCI\"").unwrap();
        assert_eq!(parsed, Operator::Mci);
        assert!(serde_json::from_str::<Operator>("\"VODAFONE\"").is_err());
    }

    #[test]
    fn test_charge_code_tables() {
        assert_eq!(Service::direct_charge(Operator::Mci).code, Some(1));
        assert_eq!(Service::direct_charge(Operator::Mtn).code, Some(2));
        assert_eq!(Service::direct_charge(Operator::Rtl).code, Some(3));

        assert_eq!(Service::pin_charge(Operator::Mci).code, Some(5));
        assert_eq!(Service::pin_charge(Operator::Mtn).code, Some(6));
        assert_eq!(Service::pin_charge(Operator::Rtl).code, Some(7));

        // internet packages reuse the direct-charge range
        assert_eq!(Service::internet_charge(Operator::Mtn).code, Some(2));
    }

    #[test]
    fn test_fixed_service_constants() {
        assert_eq!(Service::PURCHASE.code, Some(8));
        assert_eq!(Service::MULTI_ACCOUNT_PURCHASE.code, Some(9));
        assert_eq!(Service::BILL_PAYMENT.code, Some(4));
        assert_eq!(Service::PURCHASE.path, Service::MULTI_ACCOUNT_PURCHASE.path);
        assert!(Service::CONFIRM.code.is_none());
        assert!(Service::REVERSE.service_type.is_none());
    }
}
