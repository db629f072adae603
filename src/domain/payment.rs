use super::currency::Currency;
use super::customer::CustomerId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned payment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub u64);

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The caller-supplied part of a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub currency: Currency,
    /// Opaque payment-source token, e.g. a tokenized card reference.
    pub source: String,
    pub description: String,
}

impl PaymentRequest {
    pub fn new(
        amount: Decimal,
        currency: Currency,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency,
            source: source.into(),
            description: description.into(),
        }
    }

    /// Stamps the owning customer. The id stays empty until the store assigns one.
    pub fn into_payment(self, customer_id: CustomerId) -> Payment {
        Payment {
            id: None,
            customer_id,
            amount: self.amount,
            currency: self.currency,
            source: self.source,
            description: self.description,
        }
    }
}

/// A persisted payment. Written once per successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Option<PaymentId>,
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub currency: Currency,
    pub source: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_into_payment_copies_request_fields() {
        let customer_id = CustomerId::generate();
        let payment = PaymentRequest::new(dec!(100.00), Currency::Usd, "card123xx", "Donation")
            .into_payment(customer_id);

        assert_eq!(payment.id, None);
        assert_eq!(payment.customer_id, customer_id);
        assert_eq!(payment.amount, dec!(100.00));
        assert_eq!(payment.currency, Currency::Usd);
        assert_eq!(payment.source, "card123xx");
        assert_eq!(payment.description, "Donation");
    }
}
