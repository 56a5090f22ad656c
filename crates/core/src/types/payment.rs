//! Payment method selection.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown payment method.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct PaymentMethodError(String);

/// The fixed set of payment methods offered at checkout.
///
/// A selection is recorded on the order; actually charging the customer
/// happens out of band (cash on delivery, or a manual provider flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    PayPal,
    Stripe,
    CashOnDelivery,
    GPay,
}

impl PaymentMethod {
    /// All methods, in the order they are shown on the payment screen.
    pub const ALL: [Self; 4] = [Self::PayPal, Self::Stripe, Self::CashOnDelivery, Self::GPay];

    /// Stable string form used in forms and database columns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PayPal => "PayPal",
            Self::Stripe => "Stripe",
            Self::CashOnDelivery => "CashOnDelivery",
            Self::GPay => "GPay",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PayPal" => Ok(Self::PayPal),
            "Stripe" => Ok(Self::Stripe),
            "CashOnDelivery" => Ok(Self::CashOnDelivery),
            "GPay" => Ok(Self::GPay),
            other => Err(PaymentMethodError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_methods() {
        for method in PaymentMethod::ALL {
            let parsed: PaymentMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn test_unknown_method() {
        assert!("Bitcoin".parse::<PaymentMethod>().is_err());
    }
}
