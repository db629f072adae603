#![allow(dead_code)]

use customer_payments::application::payments::PaymentProcessor;
use customer_payments::application::registrar::CustomerRegistrar;
use customer_payments::domain::currency::AcceptedCurrencies;
use customer_payments::infrastructure::in_memory::{InMemoryCustomerStore, InMemoryPaymentStore};
use customer_payments::infrastructure::sandbox::SandboxCardCharger;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const HEADER: &str = "type, customer, name, phone, amount, currency, source, description";

/// Both workflows wired to shared in-memory stores and the sandbox charger.
pub struct Services {
    pub customers: Arc<InMemoryCustomerStore>,
    pub payments: Arc<InMemoryPaymentStore>,
    pub registrar: CustomerRegistrar,
    pub processor: PaymentProcessor,
}

pub fn services() -> Services {
    let customers = Arc::new(InMemoryCustomerStore::new());
    let payments = Arc::new(InMemoryPaymentStore::new());
    Services {
        registrar: CustomerRegistrar::new(customers.clone()),
        processor: PaymentProcessor::new(
            customers.clone(),
            payments.clone(),
            Arc::new(SandboxCardCharger::new()),
            AcceptedCurrencies::default(),
        ),
        customers,
        payments,
    }
}

/// Writes a request CSV with the standard header followed by `rows`.
pub fn requests_csv<S: AsRef<str>>(rows: &[S]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{}", row.as_ref()).unwrap();
    }
    file
}
