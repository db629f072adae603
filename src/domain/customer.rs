use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Globally unique customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for CustomerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone_number: String,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// A registration request. The identifier is optional and only generated
/// when the phone number is not registered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub id: Option<CustomerId>,
    pub name: String,
    pub phone_number: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }

    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Builds the record to persist, keeping a caller-supplied id.
    pub fn into_customer(self) -> Customer {
        Customer {
            id: self.id.unwrap_or_else(CustomerId::generate),
            name: self.name,
            phone_number: self.phone_number,
        }
    }
}
