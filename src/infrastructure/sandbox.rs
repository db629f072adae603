use crate::domain::charge::CardCharge;
use crate::domain::currency::Currency;
use crate::domain::ports::CardCharger;
use crate::error::ChargerError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Test token that is always declined, following the usual card-network
/// sandbox convention.
pub const DECLINED_SOURCE: &str = "tok_chargeDeclined";

/// A local card charger that never leaves the process.
///
/// Every source is debited except the ones on the decline list.
#[derive(Debug, Clone)]
pub struct SandboxCardCharger {
    declined: HashSet<String>,
}

impl SandboxCardCharger {
    pub fn new() -> Self {
        Self {
            declined: HashSet::from([DECLINED_SOURCE.to_string()]),
        }
    }

    /// Adds `source` to the decline list.
    pub fn decline(mut self, source: impl Into<String>) -> Self {
        self.declined.insert(source.into());
        self
    }
}

impl Default for SandboxCardCharger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardCharger for SandboxCardCharger {
    async fn charge_card(
        &self,
        source: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<CardCharge, ChargerError> {
        if source.trim().is_empty() {
            return Err(ChargerError::InvalidSource(source.to_string()));
        }

        if self.declined.contains(source) {
            debug!(source, %amount, %currency, "sandbox declined charge");
            return Ok(CardCharge::declined());
        }

        let reference = format!("ch_{}", Uuid::new_v4().simple());
        debug!(source, %amount, %currency, description, reference = %reference, "sandbox debited card");
        Ok(CardCharge::debited(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_debits_regular_sources() {
        let charger = SandboxCardCharger::new();
        let charge = charger
            .charge_card("card123xx", dec!(100.00), Currency::Usd, "Donation")
            .await
            .unwrap();

        assert!(charge.debited);
        assert!(charge.reference.unwrap().starts_with("ch_"));
    }

    #[tokio::test]
    async fn test_declines_listed_sources() {
        let charger = SandboxCardCharger::new().decline("card_stolen");

        for source in [DECLINED_SOURCE, "card_stolen"] {
            let charge = charger
                .charge_card(source, dec!(1.00), Currency::Gbp, "Coffee")
                .await
                .unwrap();
            assert_eq!(charge, CardCharge::declined());
        }
    }

    #[tokio::test]
    async fn test_blank_source_is_an_error() {
        let charger = SandboxCardCharger::new();
        let result = charger
            .charge_card("  ", dec!(1.00), Currency::Usd, "Coffee")
            .await;

        assert!(matches!(result, Err(ChargerError::InvalidSource(_))));
    }
}
