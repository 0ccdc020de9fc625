//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod led;

pub use led::led_task;
