//! Shader validation.
//!
//! Shader sources are parsed and validated with naga before any GPU module
//! is created, so a broken stage surfaces as a named diagnostic instead of a
//! device error mid-initialization.

mod compile;

pub use compile::{compile, require_global, CompiledShader, ShaderError};
