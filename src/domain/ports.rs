use super::charge::CardCharge;
use super::currency::Currency;
use super::customer::{Customer, CustomerId};
use super::payment::{Payment, PaymentId};
use crate::error::{ChargerError, StoreError};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_phone_number(&self, phone_number: &str)
    -> Result<Option<Customer>, StoreError>;
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;
    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, StoreError>;
    /// Inserts or updates. Rejects empty names or phone numbers and a phone
    /// number already held by another customer.
    async fn save(&self, customer: Customer) -> Result<(), StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists the payment and returns its id, assigning one if it has none.
    async fn save(&self, payment: Payment) -> Result<PaymentId, StoreError>;
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardCharger: Send + Sync {
    async fn charge_card(
        &self,
        source: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<CardCharge, ChargerError>;
}

pub type CustomerStoreRef = Arc<dyn CustomerStore>;
pub type PaymentStoreRef = Arc<dyn PaymentStore>;
pub type CardChargerRef = Arc<dyn CardCharger>;
