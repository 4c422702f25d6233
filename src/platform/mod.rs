//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame timing (throttling display callbacks to the simulation rate)
//! - Input (pointer, touch and keyboard folded into one steering axis)

pub mod input;
pub mod time;

pub use input::{InputAggregator, InputProvider, Key, sanitize_axis};
pub use time::{FrameClock, FrameStep};
