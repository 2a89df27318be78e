// extensions/mod.rs
//
// Interpolation building blocks shared by flights and the settle pulse.
// Decoupled from the animation state machines that use them.

pub mod easing;
pub mod tween;

pub use easing::{arc, ease, lerp, Easing};
pub use tween::{Tween, TweenLoop};
