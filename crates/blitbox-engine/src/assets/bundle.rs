use std::path::Path;

use super::{io, AssetError, CircleMesh};

pub const DISPLAY_VERT: &str = "display.vert.wgsl";
pub const FILL_FRAG: &str = "fill.frag.wgsl";
pub const FRAMEBUFFER_VERT: &str = "framebuffer_render.vert.wgsl";
pub const FRAMEBUFFER_FRAG: &str = "framebuffer_render.frag.wgsl";
pub const SHADING_CIRCLE: &str = "shading_circle.bin";

/// Everything the resource initializer consumes from disk.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub display_vert: String,
    pub fill_frag: String,
    pub framebuffer_vert: String,
    pub framebuffer_frag: String,
    pub circle: CircleMesh,
}

impl SceneAssets {
    /// Loads the five expected asset files from `dir`.
    ///
    /// Fails on the first missing or malformed file, before any GPU call.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let display_vert = io::read_text(&dir.join(DISPLAY_VERT))?;
        let fill_frag = io::read_text(&dir.join(FILL_FRAG))?;
        let framebuffer_vert = io::read_text(&dir.join(FRAMEBUFFER_VERT))?;
        let framebuffer_frag = io::read_text(&dir.join(FRAMEBUFFER_FRAG))?;

        let circle_path = dir.join(SHADING_CIRCLE);
        let circle = CircleMesh::from_bytes(io::read_binary(&circle_path)?).map_err(|source| {
            AssetError::Mesh {
                path: circle_path,
                source,
            }
        })?;

        Ok(Self {
            display_vert,
            fill_frag,
            framebuffer_vert,
            framebuffer_frag,
            circle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// The shipped assets live at the workspace root.
    fn asset_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    #[test]
    fn shipped_assets_load() {
        let assets = SceneAssets::load(&asset_dir()).unwrap();
        assert_eq!(assets.circle.vertex_count(), 480);
        assert!(assets.display_vert.contains("vs_fill"));
        assert!(assets.framebuffer_frag.contains("uTexture"));
    }

    #[test]
    fn missing_directory_fails() {
        let err = SceneAssets::load(Path::new("/definitely/not/here")).unwrap_err();
        assert!(err.to_string().contains(DISPLAY_VERT));
    }

    #[test]
    fn any_single_missing_asset_fails_load() {
        let all = [
            DISPLAY_VERT,
            FILL_FRAG,
            FRAMEBUFFER_VERT,
            FRAMEBUFFER_FRAG,
            SHADING_CIRCLE,
        ];

        for omitted in all {
            let dir = std::env::temp_dir()
                .join(format!("blitbox-bundle-{}-{omitted}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();

            for name in all {
                if name == omitted {
                    continue;
                }
                if name == SHADING_CIRCLE {
                    // one valid 16-byte record
                    std::fs::write(dir.join(name), [0u8; 16]).unwrap();
                } else {
                    std::fs::write(dir.join(name), "// placeholder\n").unwrap();
                }
            }

            let err = SceneAssets::load(&dir).unwrap_err();
            assert!(
                err.to_string().contains(omitted),
                "load without `{omitted}` reported: {err}"
            );

            std::fs::remove_dir_all(&dir).ok();
        }
    }
}
