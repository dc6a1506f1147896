//! Scene types.
//!
//! Two layers live here:
//! - the per-frame draw stream (`DrawList` of `DrawCmd`s) with deterministic
//!   ordering (z-index + insertion order), consumed by `render`
//! - persistent overlay surfaces (`Surface` of `Slot`s of `Primitive`s) that are
//!   mutated in place across updates, plus `PathAnimator` to glide between states

mod animator;
mod cmd;
mod list;
mod primitive;
mod surface;
mod z_index;

pub mod shapes;

pub use animator::PathAnimator;
pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use primitive::{Path, Primitive, PrimitiveId, Style, Transition};
pub use surface::{Slot, Surface};
pub use z_index::ZIndex;
