//! Session Store Adapters.
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - `InMemorySessionStore` - TTL-enforcing in-memory store

mod in_memory;

pub use in_memory::InMemorySessionStore;
