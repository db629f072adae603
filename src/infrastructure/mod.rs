//! Adapters implementing the domain ports.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod sandbox;

use crate::domain::customer::Customer;
use crate::domain::payment::PaymentId;
use crate::error::StoreError;

/// Not-null/not-empty checks shared by every customer store backend.
pub(crate) fn check_customer_columns(customer: &Customer) -> Result<(), StoreError> {
    if customer.name.trim().is_empty() {
        return Err(StoreError::ConstraintViolation(
            "customer name must not be empty".to_string(),
        ));
    }
    if customer.phone_number.trim().is_empty() {
        return Err(StoreError::ConstraintViolation(
            "customer phone number must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn phone_number_taken(phone_number: &str) -> StoreError {
    StoreError::ConstraintViolation(format!("phone number [{phone_number}] already exists"))
}

/// The id following `last`, or a rejection once the id space is used up.
pub(crate) fn next_payment_id(last: u64) -> Result<PaymentId, StoreError> {
    last.checked_add(1).map(PaymentId).ok_or_else(|| {
        StoreError::ConstraintViolation(format!("payment id space exhausted after [{last}]"))
    })
}
