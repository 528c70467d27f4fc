//! Relay DNS Infrastructure Layer
//!
//! Adapters behind the application ports: the in-memory resolution cache,
//! the upstream forwarder with its UDP/TCP transports, and the
//! hickory-server request handler.
pub mod dns;
