//! Relay DNS Application Layer
//!
//! Ports (traits) the infrastructure adapters implement, plus the use case
//! that drives the cache-or-forward decision for every incoming question.
pub mod ports;
pub mod use_cases;

pub use use_cases::HandleDnsQueryUseCase;
