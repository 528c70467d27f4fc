//! Relay DNS Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, TransportKind};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordType};
pub use errors::DomainError;
