// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod memory;
pub mod storage;

pub use clock::{FixedClock, SystemClock};
pub use memory::MemoryStorage;
pub use storage::LocalStorage;
