//! Static scene geometry and vertex layouts.

use bytemuck::{Pod, Zeroable};

use crate::assets;

// ── scene vertex (clear quad + box) ───────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct SceneVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl SceneVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── circle mesh layout ────────────────────────────────────────────────────

/// Layout of the `shading_circle.bin` records: packed f32x3 position
/// followed by unorm8x4 color, 16 bytes per vertex. The blob is uploaded
/// as-is; this layout is how the GPU reads it.
const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Unorm8x4];

pub fn mesh_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: assets::VERTEX_STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_ATTRS,
    }
}

// ── present vertex (fullscreen quad) ──────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PresentVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl PresentVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PresentVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── static buffers ────────────────────────────────────────────────────────

/// Fullscreen background fill, drawn as a 4-index triangle strip. The
/// per-vertex colors produce the gradient the clear pass paints.
pub const CLEAR_VERTICES: [SceneVertex; 4] = [
    SceneVertex {
        pos: [0.0, 0.0],
        uv: [128.0, 0.0],
        color: [1.0, 0.0, 0.0, 1.0],
    },
    SceneVertex {
        pos: [0.0, 544.0],
        uv: [128.0, 128.0],
        color: [0.0, 0.0, 0.0, 1.0],
    },
    SceneVertex {
        pos: [960.0, 0.0],
        uv: [0.0, 0.0],
        color: [0.0, 0.0, 0.0, 1.0],
    },
    SceneVertex {
        pos: [960.0, 544.0],
        uv: [0.0, 128.0],
        color: [0.0, 0.0, 0.0, 1.0],
    },
];

/// The decorative box, a small tilted quad near the lower-right.
pub const BOX_VERTICES: [SceneVertex; 4] = [
    SceneVertex {
        pos: [835.40411, 418.42172],
        uv: [128.0, 0.0],
        color: [0.45882, 0.45882, 0.75088, 1.0],
    },
    SceneVertex {
        pos: [914.32806, 436.64276],
        uv: [128.0, 128.0],
        color: [0.45882, 0.45882, 0.75088, 1.0],
    },
    SceneVertex {
        pos: [822.13202, 475.90955],
        uv: [0.0, 0.0],
        color: [0.45882, 0.45882, 0.75088, 1.0],
    },
    SceneVertex {
        pos: [901.05597, 494.13058],
        uv: [0.0, 128.0],
        color: [0.45882, 0.45882, 0.75088, 1.0],
    },
];

/// Shared strip indices for the clear quad and the box.
pub const STRIP_INDICES: [u32; 4] = [0, 1, 2, 3];

/// Two triangles covering the surface in NDC; uv flips Y so the offscreen
/// image lands upright.
pub const PRESENT_VERTICES: [PresentVertex; 6] = [
    PresentVertex {
        pos: [-1.0, 1.0],
        uv: [0.0, 0.0],
    },
    PresentVertex {
        pos: [-1.0, -1.0],
        uv: [0.0, 1.0],
    },
    PresentVertex {
        pos: [1.0, -1.0],
        uv: [1.0, 1.0],
    },
    PresentVertex {
        pos: [-1.0, 1.0],
        uv: [0.0, 0.0],
    },
    PresentVertex {
        pos: [1.0, -1.0],
        uv: [1.0, 1.0],
    },
    PresentVertex {
        pos: [1.0, 1.0],
        uv: [1.0, 0.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_vertex_stride_is_32_bytes() {
        assert_eq!(std::mem::size_of::<SceneVertex>(), 32);
        assert_eq!(SceneVertex::layout().array_stride, 32);
    }

    #[test]
    fn mesh_layout_matches_the_blob_stride() {
        assert_eq!(mesh_layout().array_stride, 16);
        // color sits right after the three position floats
        assert_eq!(MESH_ATTRS[1].offset, 12);
    }

    #[test]
    fn present_quad_covers_all_four_corners() {
        for corner in [[-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]] {
            assert!(PRESENT_VERTICES.iter().any(|v| v.pos == corner));
        }
        assert_eq!(PRESENT_VERTICES.len(), 6);
    }

    #[test]
    fn strip_indices_are_a_single_quad() {
        assert_eq!(STRIP_INDICES, [0, 1, 2, 3]);
    }
}
