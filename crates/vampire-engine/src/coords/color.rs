/// Opaque RGB color, channels in `[0, 1]`.
///
/// Values are written to the render target as-is; the game requests a
/// non-sRGB surface so they are not re-encoded.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRgb {
    /// Creates a color, clamping each channel into `[0, 1]`.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// RGBA with alpha forced to 1, the layout the rect shader expects.
    #[inline]
    pub fn to_rgba_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_channels() {
        let c = ColorRgb::new(-0.5, 0.35, 1.5);
        assert_eq!(c, ColorRgb { r: 0.0, g: 0.35, b: 1.0 });
    }

    #[test]
    fn rgba_array_is_opaque() {
        assert_eq!(ColorRgb::new(0.2, 0.35, 0.8).to_rgba_array(), [0.2, 0.35, 0.8, 1.0]);
    }
}
