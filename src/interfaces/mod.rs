//! Thin adapters translating external input into workflow calls.

pub mod batch;
pub mod csv;
