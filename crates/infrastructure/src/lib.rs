//! Ferrous Relay Infrastructure Layer
//!
//! UDP plumbing behind the application ports: upstream exchange, health
//! probing and the client-facing listener.
pub mod dns;
