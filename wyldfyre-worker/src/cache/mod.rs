//! Versioned cache store.
//!
//! One namespace per cache generation; the [`CacheStore`] guarantees that
//! after activation only the current generation survives.

mod memory;
mod store;
mod traits;

pub use memory::MemoryCacheBackend;
pub use store::CacheStore;
pub use traits::{CacheBackend, CacheStats};
