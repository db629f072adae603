use crate::domain::currency::Currency;
use crate::domain::customer::CustomerId;
use thiserror::Error;

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// Failures surfaced to the caller of a workflow.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("phone number [{0}] is taken")]
    PhoneNumberTaken(String),
    #[error("customer with id [{0}] not found")]
    CustomerNotFound(CustomerId),
    #[error("currency [{0}] not supported")]
    CurrencyNotSupported(Currency),
    #[error("card not debited for customer [{0}]")]
    CardNotDebited(CustomerId),
    #[error("persistence rejected: {0}")]
    Persistence(#[from] StoreError),
    #[error("card charger failed: {0}")]
    Charger(#[from] ChargerError),
    /// A row that parsed as `kind` but lacks a column that kind needs.
    #[error("invalid request: {reason}")]
    InvalidRequest { kind: &'static str, reason: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Stable snake_case identifier for adapters that map errors to statuses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PhoneNumberTaken(_) => "phone_number_taken",
            Self::CustomerNotFound(_) => "customer_not_found",
            Self::CurrencyNotSupported(_) => "currency_not_supported",
            Self::CardNotDebited(_) => "card_not_debited",
            Self::Persistence(_) => "persistence_rejected",
            Self::Charger(_) => "charger_failed",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Csv(_) => "csv_error",
            Self::Io(_) => "io_error",
        }
    }

    /// The request type an error was raised for, when it is known before dispatch.
    pub fn request_kind(&self) -> Option<&'static str> {
        match self {
            Self::InvalidRequest { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Rejections raised by a storage backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for StoreError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Failures of the card charger at its call boundary.
///
/// A declined card is not an error here: it is reported through
/// [`CardCharge::debited`](crate::domain::charge::CardCharge).
#[derive(Error, Debug)]
pub enum ChargerError {
    #[error("invalid card source: {0:?}")]
    InvalidSource(String),
    #[error("payment network unavailable: {0}")]
    Unavailable(String),
}
