//! railmap engine crate.
//!
//! Platform + GPU runtime, world/map coordinates, and the persistent overlay
//! scene that map layers draw into.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
