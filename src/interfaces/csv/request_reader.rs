use crate::domain::currency::Currency;
use crate::domain::customer::{CustomerId, NewCustomer};
use crate::domain::payment::PaymentRequest;
use crate::error::{Result, ServiceError};
use crate::interfaces::batch::Request;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use uuid::Uuid;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RequestType {
    Register,
    Charge,
}

/// One CSV row. Columns that do not apply to the row's type are left empty.
#[derive(Debug, Deserialize)]
struct RequestRecord {
    r#type: RequestType,
    #[serde(default)]
    customer: Option<Uuid>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    currency: Option<Currency>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

fn required<T>(value: Option<T>, column: &str, kind: &'static str) -> Result<T> {
    value.ok_or_else(|| ServiceError::InvalidRequest {
        kind,
        reason: format!("{kind} requires a {column}"),
    })
}

impl TryFrom<RequestRecord> for Request {
    type Error = ServiceError;

    fn try_from(record: RequestRecord) -> Result<Self> {
        match record.r#type {
            RequestType::Register => {
                let mut customer = NewCustomer::new(
                    required(record.name, "name", "register")?,
                    required(record.phone, "phone", "register")?,
                );
                customer.id = record.customer.map(CustomerId::from);
                Ok(Request::Register(customer))
            }
            RequestType::Charge => {
                let customer_id = required(record.customer, "customer", "charge")?;
                let payment = PaymentRequest::new(
                    required(record.amount, "amount", "charge")?,
                    required(record.currency, "currency", "charge")?,
                    required(record.source, "source", "charge")?,
                    record.description.unwrap_or_default(),
                );
                Ok(Request::Charge {
                    customer_id: customer_id.into(),
                    payment,
                })
            }
        }
    }
}

/// Reads registration and charge requests from a CSV source.
///
/// Expected header: `type, customer, name, phone, amount, currency, source, description`.
/// Whitespace is trimmed and short rows are accepted.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts requests.
    pub fn requests(self) -> impl Iterator<Item = Result<Request>> {
        self.reader
            .into_deserialize::<RequestRecord>()
            .map(|result| result.map_err(ServiceError::from).and_then(Request::try_from))
    }
}
