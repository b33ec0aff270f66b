use crate::FoveEye;

/// A camera output rectangle in normalized screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FoveViewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FoveViewport {
    pub const FULL: FoveViewport = FoveViewport { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };
    pub const LEFT_HALF: FoveViewport = FoveViewport { x: 0.0, y: 0.0, width: 0.5, height: 1.0 };
    pub const RIGHT_HALF: FoveViewport = FoveViewport { x: 0.5, y: 0.0, width: 0.5, height: 1.0 };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: x,
            y: y,
            width: width,
            height: height,
        }
    }

    /// The half of the screen an eye is shown in.
    pub fn half_for(eye: FoveEye) -> FoveViewport {
        match eye {
            FoveEye::Left => FoveViewport::LEFT_HALF,
            FoveEye::Right => FoveViewport::RIGHT_HALF,
        }
    }
}

impl Default for FoveViewport {
    fn default() -> FoveViewport {
        FoveViewport::FULL
    }
}

/// A rectangle on screen measured in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FovePixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FovePixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x: x,
            y: y,
            width: width,
            height: height,
        }
    }

    /// The half of a `screen_width` x `screen_height` screen an eye is
    /// composited into.
    pub fn half_for(eye: FoveEye, screen_width: u32, screen_height: u32) -> FovePixelRect {
        let half = screen_width / 2;
        match eye {
            FoveEye::Left => FovePixelRect::new(0, 0, half, screen_height),
            FoveEye::Right => FovePixelRect::new(half, 0, half, screen_height),
        }
    }
}
