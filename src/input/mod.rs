//! Input distillation
//!
//! Turns raw keyboard, mouse and gamepad snapshots into one immutable
//! [`InputIntent`] per frame. Depends on nothing else in the crate.

pub mod devices;
pub mod distill;
pub mod intent;

pub use devices::{DeviceSnapshot, GamepadState, Key, KeyboardState, MouseState, PadButton};
pub use distill::{DistillerState, InputDistiller, distill};
pub use intent::InputIntent;
