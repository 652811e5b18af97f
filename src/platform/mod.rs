//! Platform abstraction layer
//!
//! Host-independent input handling. The browser glue in `main.rs` feeds raw
//! key and touch events through here.

pub mod input;

pub use input::{Intent, Trigger, apply, handle};
