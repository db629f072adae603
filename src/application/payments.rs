use crate::domain::currency::AcceptedCurrencies;
use crate::domain::customer::CustomerId;
use crate::domain::payment::{PaymentId, PaymentRequest};
use crate::domain::ports::{CardChargerRef, CustomerStoreRef, PaymentStoreRef};
use crate::error::{Result, ServiceError};
use tracing::{debug, info};

/// Charges a customer's card and records the payment.
///
/// Validation and the charge happen before anything is written, so a
/// payment is only persisted after the charger reports a debit.
pub struct PaymentProcessor {
    customers: CustomerStoreRef,
    payments: PaymentStoreRef,
    charger: CardChargerRef,
    accepted_currencies: AcceptedCurrencies,
}

impl PaymentProcessor {
    /// Creates a new `PaymentProcessor`.
    ///
    /// # Arguments
    ///
    /// * `customers` - Used for the customer existence check.
    /// * `payments` - Receives the payment after a successful charge.
    /// * `charger` - The card-charging collaborator.
    /// * `accepted_currencies` - Currencies that may be charged.
    pub fn new(
        customers: CustomerStoreRef,
        payments: PaymentStoreRef,
        charger: CardChargerRef,
        accepted_currencies: AcceptedCurrencies,
    ) -> Self {
        Self {
            customers,
            payments,
            charger,
            accepted_currencies,
        }
    }

    /// Charges `request` to `customer_id` and returns the stored payment id.
    ///
    /// Checks run in order and stop at the first failure: customer
    /// existence, currency support, the charge itself. Nothing is retried.
    pub async fn charge_card(
        &self,
        customer_id: CustomerId,
        request: PaymentRequest,
    ) -> Result<PaymentId> {
        if !self.customers.exists_by_id(customer_id).await? {
            return Err(ServiceError::CustomerNotFound(customer_id));
        }

        if !self.accepted_currencies.contains(request.currency) {
            return Err(ServiceError::CurrencyNotSupported(request.currency));
        }

        debug!(%customer_id, amount = %request.amount, currency = %request.currency, "charging card");
        let charge = self
            .charger
            .charge_card(
                &request.source,
                request.amount,
                request.currency,
                &request.description,
            )
            .await?;

        if !charge.debited {
            return Err(ServiceError::CardNotDebited(customer_id));
        }

        let payment_id = self.payments.save(request.into_payment(customer_id)).await?;

        info!(
            %customer_id,
            %payment_id,
            reference = charge.reference.as_deref().unwrap_or_default(),
            "payment recorded"
        );
        Ok(payment_id)
    }
}
