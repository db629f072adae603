use crate::application::payments::PaymentProcessor;
use crate::application::registrar::{CustomerRegistrar, Registration};
use crate::domain::customer::{CustomerId, NewCustomer};
use crate::domain::payment::PaymentRequest;
use crate::error::Result;
use serde::Serialize;
use tracing::warn;

/// A request addressed to one of the two workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Register(NewCustomer),
    Charge {
        customer_id: CustomerId,
        payment: PaymentRequest,
    },
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Register(_) => "register",
            Request::Charge { .. } => "charge",
        }
    }
}

/// The reported result of a single request.
///
/// `status` is `created`, `already_registered`, `updated`, `charged`, or an
/// error code; `detail` holds the resulting id or the error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// 1-based index of the data row, not counting the header.
    pub row: usize,
    pub r#type: &'static str,
    pub status: &'static str,
    pub detail: String,
}

/// Routes requests to the registrar or the payment processor and turns
/// every result, including failures, into an [`Outcome`].
pub struct BatchProcessor {
    registrar: CustomerRegistrar,
    payments: PaymentProcessor,
}

impl BatchProcessor {
    pub fn new(registrar: CustomerRegistrar, payments: PaymentProcessor) -> Self {
        Self {
            registrar,
            payments,
        }
    }

    async fn dispatch(&self, request: Request) -> Result<(&'static str, String)> {
        match request {
            Request::Register(customer) => match self.registrar.register(customer).await? {
                Registration::Created(id) => Ok(("created", id.to_string())),
                Registration::AlreadyRegistered(id) => Ok(("already_registered", id.to_string())),
                Registration::Updated(id) => Ok(("updated", id.to_string())),
            },
            Request::Charge {
                customer_id,
                payment,
            } => {
                let payment_id = self.payments.charge_card(customer_id, payment).await?;
                Ok(("charged", payment_id.to_string()))
            }
        }
    }

    /// Processes requests one after another, numbering them from 1.
    pub async fn run<I>(&self, requests: I) -> Vec<Outcome>
    where
        I: IntoIterator<Item = Result<Request>>,
    {
        let mut outcomes = Vec::new();
        for (index, request) in requests.into_iter().enumerate() {
            let row = index + 1;
            let (r#type, result) = match request {
                Ok(request) => (request.kind(), self.dispatch(request).await),
                Err(err) => (err.request_kind().unwrap_or("unknown"), Err(err)),
            };

            let (status, detail) = match result {
                Ok(done) => done,
                Err(err) => {
                    warn!(row, code = err.code(), error = %err, "request failed");
                    (err.code(), err.to_string())
                }
            };

            outcomes.push(Outcome {
                row,
                r#type,
                status,
                detail,
            });
        }
        outcomes
    }
}
