//! Session layer adapters.

mod in_memory;

pub use in_memory::{InMemorySessionRegistry, SessionState};
