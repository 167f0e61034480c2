//! Ticket Registry - in-memory registration service.
//!
//! Accepts registration records keyed by a 10-digit identity number (cédula):
//! - Validates every incoming record field by field, reporting the first failure
//! - Keeps pending registrations and delivered ones in separate ordered lists
//! - Supports lookup, email updates and delivery (archive) by identity number

pub mod api;
pub mod config;
pub mod error;
pub mod registry;

pub use config::Config;
pub use error::RegistryError;
pub use registry::{Registration, Registry, Snapshot};
