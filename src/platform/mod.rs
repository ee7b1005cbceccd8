//! Platform abstraction layer
//!
//! Turns raw per-frame device state into simulation input. The windowing
//! backend polls the mouse and keyboard; everything here is plain data so
//! any backend (or a test) can drive it.

pub mod input;

pub use input::{EdgeTrigger, InputSampler, RawInput};
