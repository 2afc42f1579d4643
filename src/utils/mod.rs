// Shared utilities

pub mod constants;
pub mod storage;
pub mod timer;

pub use constants::*;
pub use storage::{BrowserStorage, KeyValueStorage, MemoryStorage};
pub use timer::{BrowserScheduler, Scheduler, TimerHandle};
