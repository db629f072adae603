use crate::domain::customer::{CustomerId, NewCustomer};
use crate::domain::ports::CustomerStoreRef;
use crate::error::{Result, ServiceError};
use tracing::{debug, info, warn};

/// What a successful registration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new customer record was written.
    Created(CustomerId),
    /// The phone number already belonged to a customer with the same name.
    AlreadyRegistered(CustomerId),
    /// The supplied id belonged to a customer on another phone number, whose
    /// record was overwritten by the request.
    Updated(CustomerId),
}

impl Registration {
    pub fn customer_id(&self) -> CustomerId {
        match self {
            Registration::Created(id)
            | Registration::AlreadyRegistered(id)
            | Registration::Updated(id) => *id,
        }
    }
}

/// Registers customers, keeping phone numbers unique.
pub struct CustomerRegistrar {
    customers: CustomerStoreRef,
}

impl CustomerRegistrar {
    pub fn new(customers: CustomerStoreRef) -> Self {
        Self { customers }
    }

    /// Registers `request`, or succeeds without writing when its phone number
    /// is already held by a customer with exactly the same name.
    ///
    /// A supplied id that already exists under another phone number is still
    /// saved (insert-or-update), but reported as [`Registration::Updated`].
    ///
    /// # Errors
    ///
    /// * [`ServiceError::PhoneNumberTaken`] when the phone number belongs to a
    ///   customer with a different name.
    /// * [`ServiceError::Persistence`] when the store rejects the write.
    pub async fn register(&self, request: NewCustomer) -> Result<Registration> {
        if let Some(existing) = self
            .customers
            .find_by_phone_number(&request.phone_number)
            .await?
        {
            if existing.name == request.name {
                debug!(customer_id = %existing.id, "customer already registered");
                return Ok(Registration::AlreadyRegistered(existing.id));
            }
            return Err(ServiceError::PhoneNumberTaken(request.phone_number));
        }

        let overwrites = match request.id {
            Some(id) => self.customers.exists_by_id(id).await?,
            None => false,
        };

        let customer = request.into_customer();
        let id = customer.id;
        self.customers.save(customer).await?;

        if overwrites {
            warn!(customer_id = %id, "registration overwrote an existing customer");
            return Ok(Registration::Updated(id));
        }
        info!(customer_id = %id, "customer registered");
        Ok(Registration::Created(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::Customer;
    use crate::domain::ports::MockCustomerStore;
    use crate::error::StoreError;
    use mockall::predicate::eq;
    use std::sync::Arc;

    const PHONE: &str = "000099";

    #[tokio::test]
    async fn test_saves_new_customer_with_supplied_id() {
        let id = CustomerId::generate();
        let mut store = MockCustomerStore::new();
        store
            .expect_find_by_phone_number()
            .with(eq(PHONE))
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_exists_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(false));
        store
            .expect_save()
            .with(eq(Customer::new(id, "Joseph", PHONE)))
            .times(1)
            .returning(|_| Ok(()));

        let registrar = CustomerRegistrar::new(Arc::new(store));
        let outcome = registrar
            .register(NewCustomer::new("Joseph", PHONE).with_id(id))
            .await
            .unwrap();

        assert_eq!(outcome, Registration::Created(id));
    }

    #[tokio::test]
    async fn test_generates_id_when_missing() {
        let mut store = MockCustomerStore::new();
        store.expect_find_by_phone_number().returning(|_| Ok(None));
        store.expect_exists_by_id().never();
        store
            .expect_save()
            .withf(|customer| customer.name == "Joseph" && customer.phone_number == PHONE)
            .times(1)
            .returning(|_| Ok(()));

        let registrar = CustomerRegistrar::new(Arc::new(store));
        let outcome = registrar
            .register(NewCustomer::new("Joseph", PHONE))
            .await
            .unwrap();

        assert!(matches!(outcome, Registration::Created(_)));
        assert!(!outcome.customer_id().as_uuid().is_nil());
    }

    #[tokio::test]
    async fn test_existing_id_on_new_phone_reports_update() {
        let id = CustomerId::generate();
        let mut store = MockCustomerStore::new();
        store.expect_find_by_phone_number().returning(|_| Ok(None));
        store
            .expect_exists_by_id()
            .with(eq(id))
            .returning(|_| Ok(true));
        store
            .expect_save()
            .with(eq(Customer::new(id, "Mallory", "555")))
            .times(1)
            .returning(|_| Ok(()));

        let registrar = CustomerRegistrar::new(Arc::new(store));
        let outcome = registrar
            .register(NewCustomer::new("Mallory", "555").with_id(id))
            .await
            .unwrap();

        assert_eq!(outcome, Registration::Updated(id));
    }

    #[tokio::test]
    async fn test_same_name_is_idempotent() {
        let id = CustomerId::generate();
        let mut store = MockCustomerStore::new();
        store
            .expect_find_by_phone_number()
            .returning(move |_| Ok(Some(Customer::new(id, "Joseph", PHONE))));
        store.expect_save().never();

        let registrar = CustomerRegistrar::new(Arc::new(store));
        let outcome = registrar
            .register(NewCustomer::new("Joseph", PHONE).with_id(id))
            .await
            .unwrap();

        assert_eq!(outcome, Registration::AlreadyRegistered(id));
    }

    #[tokio::test]
    async fn test_different_name_is_rejected() {
        let mut store = MockCustomerStore::new();
        store.expect_find_by_phone_number().returning(|_| {
            Ok(Some(Customer::new(CustomerId::generate(), "Joseph", PHONE)))
        });
        store.expect_save().never();

        let registrar = CustomerRegistrar::new(Arc::new(store));
        let err = registrar
            .register(NewCustomer::new("Shirley", PHONE))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::PhoneNumberTaken(ref phone) if phone == PHONE));
        assert_eq!(err.to_string(), "phone number [000099] is taken");
    }

    #[tokio::test]
    async fn test_name_comparison_is_case_sensitive() {
        let mut store = MockCustomerStore::new();
        store.expect_find_by_phone_number().returning(|_| {
            Ok(Some(Customer::new(CustomerId::generate(), "Joseph", PHONE)))
        });
        store.expect_save().never();

        let registrar = CustomerRegistrar::new(Arc::new(store));
        let result = registrar.register(NewCustomer::new("joseph", PHONE)).await;

        assert!(matches!(result, Err(ServiceError::PhoneNumberTaken(_))));
    }

    #[tokio::test]
    async fn test_store_rejection_propagates_unchanged() {
        let mut store = MockCustomerStore::new();
        store.expect_find_by_phone_number().returning(|_| Ok(None));
        store.expect_save().returning(|_| {
            Err(StoreError::ConstraintViolation(
                "phone number [000099] already exists".into(),
            ))
        });

        let registrar = CustomerRegistrar::new(Arc::new(store));
        let result = registrar.register(NewCustomer::new("Joseph", PHONE)).await;

        assert!(matches!(
            result,
            Err(ServiceError::Persistence(StoreError::ConstraintViolation(_)))
        ));
    }
}
