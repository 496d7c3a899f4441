//! Timing and score persistence shared by both games

pub mod dashboard;
mod store;
mod timer;

pub use dashboard::{Dashboard, keys, read_number};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use timer::{Stopwatch, TICK_PERIOD, Ticker};
