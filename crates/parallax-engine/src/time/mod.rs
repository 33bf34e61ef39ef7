//! Frame timing.
//!
//! One `FrameClock` drives the render loop; `tick()` is called once per
//! presented frame to obtain a `FrameTime`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
