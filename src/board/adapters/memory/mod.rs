//! In-memory adapters for board ports.

mod backend;

pub use backend::InMemoryProjectBackend;
