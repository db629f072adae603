use super::{check_customer_columns, next_payment_id, phone_number_taken};
use crate::domain::customer::{Customer, CustomerId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::{CustomerStore, PaymentStore};
use crate::error::StoreError;
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for customer records, keyed by customer id.
pub const CF_CUSTOMERS: &str = "customers";
/// Column Family mapping phone numbers to customer ids.
pub const CF_CUSTOMER_PHONES: &str = "customer_phones";
/// Column Family for payments, keyed by big-endian payment id.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent store implementation using RocksDB.
///
/// Serves as both `CustomerStore` and `PaymentStore`, with one Column Family
/// per table plus a phone-number index. Writes are serialized through a
/// mutex so the uniqueness check and the batch that follows it cannot
/// interleave with another writer.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_CUSTOMERS, CF_CUSTOMER_PHONES, CF_PAYMENTS]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StoreError> {
        self.db.cf_handle(name).ok_or_else(|| {
            StoreError::Backend(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        cf_name: &str,
        key: &[u8],
    ) -> Result<Option<T>, StoreError> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(&cf, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn last_payment_id(&self) -> Result<u64, StoreError> {
        let cf = self.cf(CF_PAYMENTS)?;
        let Some(item) = self.db.iterator_cf(&cf, IteratorMode::End).next() else {
            return Ok(0);
        };
        let (key, _value) = item?;
        let bytes: [u8; 8] = key.as_ref().try_into().map_err(|_| {
            StoreError::Backend(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "malformed payment key",
            )))
        })?;
        Ok(u64::from_be_bytes(bytes))
    }
}

#[async_trait]
impl CustomerStore for RocksDBStore {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Customer>, StoreError> {
        let phones = self.cf(CF_CUSTOMER_PHONES)?;
        match self.db.get_cf(&phones, phone_number.as_bytes())? {
            Some(id) => self.get_json(CF_CUSTOMERS, &id),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        self.get_json(CF_CUSTOMERS, id.as_uuid().as_bytes())
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, StoreError> {
        let cf = self.cf(CF_CUSTOMERS)?;
        // Just check if the key exists without retrieving the value
        let result = self.db.get_pinned_cf(&cf, id.as_uuid().as_bytes())?;
        Ok(result.is_some())
    }

    async fn save(&self, customer: Customer) -> Result<(), StoreError> {
        check_customer_columns(&customer)?;
        let _guard = self.write_lock.lock().await;

        let customers = self.cf(CF_CUSTOMERS)?;
        let phones = self.cf(CF_CUSTOMER_PHONES)?;
        let key = customer.id.as_uuid().as_bytes().as_slice();

        if let Some(owner) = self.db.get_cf(&phones, customer.phone_number.as_bytes())?
            && owner.as_slice() != key
        {
            return Err(phone_number_taken(&customer.phone_number));
        }

        let mut batch = WriteBatch::default();
        let previous: Option<Customer> = self.get_json(CF_CUSTOMERS, key)?;
        if let Some(previous) = previous
            && previous.phone_number != customer.phone_number
        {
            batch.delete_cf(&phones, previous.phone_number.as_bytes());
        }
        batch.put_cf(&phones, customer.phone_number.as_bytes(), key);
        batch.put_cf(&customers, key, serde_json::to_vec(&customer)?);
        self.db.write(batch)?;

        Ok(())
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn save(&self, mut payment: Payment) -> Result<PaymentId, StoreError> {
        let _guard = self.write_lock.lock().await;

        let id = match payment.id {
            Some(id) => id,
            None => next_payment_id(self.last_payment_id()?)?,
        };
        payment.id = Some(id);

        let cf = self.cf(CF_PAYMENTS)?;
        self.db
            .put_cf(&cf, id.0.to_be_bytes(), serde_json::to_vec(&payment)?)?;

        Ok(id)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, StoreError> {
        self.get_json(CF_PAYMENTS, &id.0.to_be_bytes())
    }
}
