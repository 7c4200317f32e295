use thiserror::Error;

/// Byte size of one interleaved vertex record: three packed f32 position
/// components followed by four unorm8 color channels.
pub const VERTEX_STRIDE: usize = 16;

/// Malformed circle-mesh blob.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("mesh blob is empty")]
    Empty,

    #[error("mesh blob length {len} is not a multiple of the {stride}-byte vertex stride")]
    Stride { len: usize, stride: usize },

    #[error("{count} vertices exceed the 16-bit index range")]
    TooManyVertices { count: usize },
}

/// The shading-circle vertex blob, validated but otherwise uploaded verbatim.
///
/// The vertex count is derived from the blob length; the draw call's index
/// range follows the actual file contents rather than a fixed constant.
#[derive(Debug, Clone)]
pub struct CircleMesh {
    bytes: Vec<u8>,
}

impl CircleMesh {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MeshError> {
        if bytes.is_empty() {
            return Err(MeshError::Empty);
        }
        if bytes.len() % VERTEX_STRIDE != 0 {
            return Err(MeshError::Stride {
                len: bytes.len(),
                stride: VERTEX_STRIDE,
            });
        }

        let count = bytes.len() / VERTEX_STRIDE;
        if count > usize::from(u16::MAX) + 1 {
            return Err(MeshError::TooManyVertices { count });
        }

        Ok(Self { bytes })
    }

    /// Raw interleaved vertex bytes, ready for a GPU buffer upload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn vertex_count(&self) -> usize {
        self.bytes.len() / VERTEX_STRIDE
    }

    /// Sequential strip indices covering every record in the blob.
    pub fn indices(&self) -> Vec<u16> {
        (0..self.vertex_count() as u32).map(|i| i as u16).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_blob_is_rejected() {
        assert!(matches!(CircleMesh::from_bytes(vec![]), Err(MeshError::Empty)));
    }

    #[test]
    fn misaligned_length_is_rejected() {
        let err = CircleMesh::from_bytes(vec![0u8; VERTEX_STRIDE + 3]).unwrap_err();
        assert!(matches!(err, MeshError::Stride { len: 19, stride: 16 }));
    }

    #[test]
    fn vertex_count_derives_from_length() {
        let mesh = CircleMesh::from_bytes(vec![0u8; VERTEX_STRIDE * 480]).unwrap();
        assert_eq!(mesh.vertex_count(), 480);
        assert_eq!(mesh.bytes().len(), 7680);
    }

    #[test]
    fn indices_are_sequential() {
        let mesh = CircleMesh::from_bytes(vec![0u8; VERTEX_STRIDE * 5]).unwrap();
        assert_eq!(mesh.indices(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn oversized_blob_is_rejected() {
        let bytes = vec![0u8; VERTEX_STRIDE * (usize::from(u16::MAX) + 2)];
        assert!(matches!(
            CircleMesh::from_bytes(bytes),
            Err(MeshError::TooManyVertices { .. })
        ));
    }
}
