//! GPU rendering subsystem.
//!
//! `RenderState` is the output of the resource initializer: every pipeline
//! and buffer the frame renderer touches, created exactly once. The frame
//! renderer issues two passes per frame: the scene pass into the fixed
//! offscreen target, then the present pass onto the window surface.
//!
//! Convention:
//! - scene geometry is in pixel coordinates (top-left origin, +Y down);
//! - the scene vertex stage converts to NDC using the uScreen uniform.

mod ctx;
mod geometry;
mod offscreen;
mod state;
mod viewport;

pub use ctx::{RenderCtx, RenderTarget};
pub use offscreen::{validate_extent, OffscreenTarget, TargetError, COLOR_FORMAT, DEPTH_FORMAT};
pub use state::RenderState;
pub use viewport::Viewport;
