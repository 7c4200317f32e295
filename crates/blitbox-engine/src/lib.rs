//! Blitbox engine crate.
//!
//! This crate owns the platform + GPU runtime pieces of the reproduction
//! harness: asset loading, shader validation, the device/surface layer, the
//! render state and the window runtime.

pub mod assets;
pub mod device;
pub mod shader;
pub mod window;

pub mod core;
pub mod logging;
pub mod render;
pub mod time;
