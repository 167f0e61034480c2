//! In-memory registry implementation.

use super::{Registration, Snapshot};
use crate::error::RegistryError;

/// In-memory registration registry.
///
/// Holds pending and delivered records in insertion order. A record lives in
/// exactly one of the two lists; delivered records are never removed.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pending: Vec<Registration>,
    delivered: Vec<Registration>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail if the identity number is already pending or delivered.
    pub fn check_available(&self, identity_number: &str) -> Result<(), RegistryError> {
        if self.find_pending(identity_number).is_some() {
            return Err(RegistryError::AlreadyRegistered(identity_number.to_string()));
        }
        if self.is_delivered(identity_number) {
            return Err(RegistryError::AlreadyDelivered(identity_number.to_string()));
        }
        Ok(())
    }

    /// Append a record to the pending list and return the updated list.
    pub fn create(&mut self, record: Registration) -> Result<&[Registration], RegistryError> {
        self.check_available(&record.identity_number)?;
        self.pending.push(record);
        Ok(&self.pending)
    }

    /// Get a pending record by identity number.
    pub fn find_pending(&self, identity_number: &str) -> Option<&Registration> {
        self.pending
            .iter()
            .find(|r| r.identity_number == identity_number)
    }

    /// Replace the email of a pending record in place.
    pub fn update_email(
        &mut self,
        identity_number: &str,
        email: String,
    ) -> Result<&Registration, RegistryError> {
        let record = self
            .pending
            .iter_mut()
            .find(|r| r.identity_number == identity_number)
            .ok_or_else(|| RegistryError::NotFound(identity_number.to_string()))?;

        record.email = email;
        Ok(record)
    }

    /// Move a pending record to the delivered list and return it.
    pub fn deliver(&mut self, identity_number: &str) -> Result<Registration, RegistryError> {
        let index = self
            .pending
            .iter()
            .position(|r| r.identity_number == identity_number)
            .ok_or_else(|| RegistryError::NotFound(identity_number.to_string()))?;

        let record = self.pending.remove(index);
        self.delivered.push(record.clone());
        Ok(record)
    }

    /// Copy both lists.
    pub fn list_all(&self) -> Snapshot {
        Snapshot {
            pending: self.pending.clone(),
            delivered: self.delivered.clone(),
        }
    }

    pub fn pending(&self) -> &[Registration] {
        &self.pending
    }

    pub fn delivered(&self) -> &[Registration] {
        &self.delivered
    }

    /// Check if an identity number has already been delivered.
    pub fn is_delivered(&self, identity_number: &str) -> bool {
        self.delivered
            .iter()
            .any(|r| r.identity_number == identity_number)
    }

    /// Get the number of pending records.
    pub fn count_pending(&self) -> usize {
        self.pending.len()
    }

    /// Get the number of delivered records.
    pub fn count_delivered(&self) -> usize {
        self.delivered.len()
    }
}
