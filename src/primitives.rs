//! Primitive types shared between the anchor logic and the render seam.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red component (0 - 255)
    pub r: u8,
    /// Green component (0 - 255)
    pub g: u8,
    /// Blue component (0 - 255)
    pub b: u8,
    /// Alpha component (0 - 255)
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the visible fallback for unexpected states.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to a normalized `[0.0, 1.0]` component array for GPU upload.
    pub fn to_linear(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }

    /// Create from a normalized component array.
    pub fn from_linear(components: [f32; 4]) -> Self {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: quantize(components[0]),
            g: quantize(components[1]),
            b: quantize(components[2]),
            a: quantize(components[3]),
        }
    }
}

/// Per-frame color-correction coefficients applied to placed objects.
///
/// The first three components are color scaling factors; the last is the
/// average pixel intensity in gamma space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorCorrection(pub [f32; 4]);

impl ColorCorrection {
    /// Identity correction used whenever no valid estimate is available.
    pub const NEUTRAL: Self = Self([1.0, 1.0, 1.0, 1.0]);
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
