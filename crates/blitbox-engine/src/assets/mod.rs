//! Asset loading.
//!
//! The harness consumes five files from the process working directory: four
//! WGSL shader stages and one binary vertex blob. Everything is read once at
//! startup; a missing or malformed file fails the whole load before any GPU
//! object is created.

mod bundle;
mod io;
mod mesh;

pub use bundle::{
    SceneAssets, DISPLAY_VERT, FILL_FRAG, FRAMEBUFFER_FRAG, FRAMEBUFFER_VERT, SHADING_CIRCLE,
};
pub use io::{read_binary, read_text};
pub use mesh::{CircleMesh, MeshError, VERTEX_STRIDE};

use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a usable asset from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{path}`: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshError,
    },
}
