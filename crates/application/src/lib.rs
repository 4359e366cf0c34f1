//! Ferrous Relay Application Layer
//!
//! Upstream selection core: the shared registry of ranked resolvers, the
//! ranking pass that reorders it, the forwarder that walks it for every
//! client query, and the IPv6 answer filter applied to every reply.
pub mod ports;
pub mod services;
pub mod use_cases;
