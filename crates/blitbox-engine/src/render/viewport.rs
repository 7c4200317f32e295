use winit::dpi::PhysicalSize;

/// Viewport size in physical pixels.
///
/// This is the value fed to the fill shader's uScreen uniform each frame. It
/// tracks the window's drawable size and is independent of the offscreen
/// target, whose extent is fixed at creation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_physical(size: PhysicalSize<u32>) -> Self {
        Self {
            width: size.width as f32,
            height: size.height as f32,
        }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_physical_preserves_dimensions() {
        let vp = Viewport::from_physical(PhysicalSize::new(960, 544));
        assert_eq!(vp, Viewport::new(960.0, 544.0));
        assert!(vp.is_valid());
    }

    #[test]
    fn zero_size_is_recorded_but_invalid() {
        let vp = Viewport::from_physical(PhysicalSize::new(0, 544));
        assert_eq!(vp.width, 0.0);
        assert_eq!(vp.height, 544.0);
        assert!(!vp.is_valid());
    }
}
