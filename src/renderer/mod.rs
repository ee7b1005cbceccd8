//! Rendering contract
//!
//! Builds a backend-agnostic list of primitives from a snapshot. Any
//! immediate-mode backend can walk the list and draw it in order.

pub mod shapes;

pub use shapes::{Color, Shape, frame_shapes};
