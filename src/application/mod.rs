//! Application layer holding the two request workflows.
//!
//! `CustomerRegistrar` and `PaymentProcessor` are independent of each other.
//! Each one runs its checks sequentially against the ports in
//! [`crate::domain::ports`] and writes only after every check has passed.

pub mod payments;
pub mod registrar;
