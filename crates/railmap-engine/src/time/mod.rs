//! Time subsystem.
//!
//! Frame timing and fixed-period schedules, decoupled from the runtime:
//! - one `FrameClock` per window, `tick()` once per presented frame
//! - `Interval` for work that runs every N seconds (snapshot polling)

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime, Interval};
