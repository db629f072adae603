/// Result of a card charge as reported by the charger.
///
/// Only `debited` decides whether a payment gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCharge {
    pub debited: bool,
    /// Charger-side reference for the attempt, when one was issued.
    pub reference: Option<String>,
}

impl CardCharge {
    pub fn debited(reference: impl Into<String>) -> Self {
        Self {
            debited: true,
            reference: Some(reference.into()),
        }
    }

    pub fn declined() -> Self {
        Self {
            debited: false,
            reference: None,
        }
    }
}
