use super::{check_customer_columns, next_payment_id, phone_number_taken};
use crate::domain::customer::{Customer, CustomerId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::{CustomerStore, PaymentStore};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CustomerTable {
    by_id: HashMap<CustomerId, Customer>,
    by_phone: HashMap<String, CustomerId>,
}

/// A thread-safe in-memory store for customers.
///
/// Keeps a phone-number index next to the records and enforces the same
/// constraints a relational table would: non-empty columns and a unique
/// phone number. Constraint checks and writes happen under one write lock.
#[derive(Default, Clone)]
pub struct InMemoryCustomerStore {
    table: Arc<RwLock<CustomerTable>>,
}

impl InMemoryCustomerStore {
    /// Creates a new, empty in-memory customer store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Customer>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .by_phone
            .get(phone_number)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let table = self.table.read().await;
        Ok(table.by_id.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, StoreError> {
        let table = self.table.read().await;
        Ok(table.by_id.contains_key(&id))
    }

    async fn save(&self, customer: Customer) -> Result<(), StoreError> {
        check_customer_columns(&customer)?;

        let mut table = self.table.write().await;
        if let Some(owner) = table.by_phone.get(&customer.phone_number)
            && *owner != customer.id
        {
            return Err(phone_number_taken(&customer.phone_number));
        }

        let stale_phone = table
            .by_id
            .get(&customer.id)
            .map(|previous| previous.phone_number.clone())
            .filter(|phone| *phone != customer.phone_number);
        if let Some(stale_phone) = stale_phone {
            table.by_phone.remove(&stale_phone);
        }

        table
            .by_phone
            .insert(customer.phone_number.clone(), customer.id);
        table.by_id.insert(customer.id, customer);
        Ok(())
    }
}

#[derive(Default)]
struct PaymentTable {
    rows: BTreeMap<PaymentId, Payment>,
    last_id: u64,
}

/// A thread-safe in-memory store for payments.
///
/// Ids are assigned sequentially starting at 1.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    table: Arc<RwLock<PaymentTable>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payments.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn save(&self, mut payment: Payment) -> Result<PaymentId, StoreError> {
        let mut table = self.table.write().await;
        let id = match payment.id {
            Some(id) => {
                table.last_id = table.last_id.max(id.0);
                id
            }
            None => {
                let id = next_payment_id(table.last_id)?;
                table.last_id = id.0;
                id
            }
        };
        payment.id = Some(id);
        table.rows.insert(id, payment);
        Ok(id)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }
}
