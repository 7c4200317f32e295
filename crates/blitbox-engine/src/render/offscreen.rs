use thiserror::Error;

/// Color format of the offscreen target, sampled by the present pass.
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Depth/stencil format attached alongside the color target. The scene
/// never depth-tests, but the attachment is part of the target's contract.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Conservative dimension cap; matches wgpu's default 2D texture limit.
const MAX_DIMENSION: u32 = 8192;

/// Offscreen target creation failure. Both variants are fatal to
/// initialization; the render loop never runs against a bad target.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("offscreen target extent {width}x{height} is not renderable")]
    BadExtent { width: u32, height: u32 },

    #[error(
        "offscreen target is incomplete: got {got_width}x{got_height}, requested {width}x{height}"
    )]
    Incomplete {
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },
}

/// Validates a requested offscreen extent before any texture is created.
pub fn validate_extent(width: u32, height: u32) -> Result<(), TargetError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(TargetError::BadExtent { width, height });
    }
    Ok(())
}

/// Fixed-resolution color + depth/stencil render target.
///
/// Created once during initialization; the extent never changes afterwards,
/// regardless of window resizes.
pub struct OffscreenTarget {
    pub color_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
}

impl OffscreenTarget {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Result<Self, TargetError> {
        validate_extent(width, height)?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("blitbox offscreen color"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("blitbox offscreen depth"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        // Completeness check: the created attachments must match the
        // requested extent exactly.
        if color.width() != width
            || color.height() != height
            || depth.width() != width
            || depth.height() != height
        {
            return Err(TargetError::Incomplete {
                width,
                height,
                got_width: color.width(),
                got_height: color.height(),
            });
        }

        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            color_view,
            depth_view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_extent_is_accepted() {
        validate_extent(960, 544).unwrap();
    }

    #[test]
    fn zero_width_is_incomplete() {
        assert!(matches!(
            validate_extent(0, 544),
            Err(TargetError::BadExtent { width: 0, .. })
        ));
    }

    #[test]
    fn zero_height_is_incomplete() {
        assert!(validate_extent(960, 0).is_err());
    }

    #[test]
    fn oversized_extent_is_rejected() {
        assert!(validate_extent(9000, 544).is_err());
    }
}
