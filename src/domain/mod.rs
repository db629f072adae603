//! Domain types and the ports the workflows depend on.

pub mod charge;
pub mod currency;
pub mod customer;
pub mod payment;
pub mod ports;
