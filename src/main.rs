use clap::Parser;
use customer_payments::application::payments::PaymentProcessor;
use customer_payments::application::registrar::CustomerRegistrar;
use customer_payments::config::Settings;
use customer_payments::domain::ports::{CustomerStoreRef, PaymentStoreRef};
use customer_payments::infrastructure::in_memory::{InMemoryCustomerStore, InMemoryPaymentStore};
use customer_payments::interfaces::batch::BatchProcessor;
use customer_payments::interfaces::csv::outcome_writer::OutcomeWriter;
use customer_payments::interfaces::csv::request_reader::RequestReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

fn in_memory_stores() -> (CustomerStoreRef, PaymentStoreRef) {
    (
        Arc::new(InMemoryCustomerStore::new()),
        Arc::new(InMemoryPaymentStore::new()),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<&Path>) -> Result<(CustomerStoreRef, PaymentStoreRef)> {
    use customer_payments::infrastructure::rocksdb::RocksDBStore;

    let Some(db_path) = db_path else {
        return Ok(in_memory_stores());
    };
    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    info!(path = %db_path.display(), "using RocksDB storage");

    // One RocksDB instance serves both ports
    let customers: CustomerStoreRef = Arc::new(store.clone());
    let payments: PaymentStoreRef = Arc::new(store);
    Ok((customers, payments))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<&Path>) -> Result<(CustomerStoreRef, PaymentStoreRef)> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(in_memory_stores())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::parse();

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .with_writer(io::stderr)
        .init();

    let (customers, payments) = open_stores(settings.db_path.as_deref())?;
    let batch = BatchProcessor::new(
        CustomerRegistrar::new(customers.clone()),
        PaymentProcessor::new(
            customers,
            payments,
            Arc::new(settings.card_charger()),
            settings.accepted_currencies(),
        ),
    );

    let file = File::open(&settings.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    let outcomes = batch.run(reader.requests()).await;
    info!(requests = outcomes.len(), "batch processed");

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    writer.write_outcomes(outcomes).into_diagnostic()?;

    Ok(())
}
