use crate::FoveEye;
use euclid::default::{Point3D, Vector3D};

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FoveRay {
    pub origin: Point3D<f32>,
    pub direction: Vector3D<f32>,
}

impl Default for FoveRay {
    // The default ray is degenerate: origin and direction are both zero.
    fn default() -> FoveRay {
        FoveRay {
            origin: Point3D::origin(),
            direction: Vector3D::zero(),
        }
    }
}

impl FoveRay {
    pub fn new(origin: Point3D<f32>, direction: Vector3D<f32>) -> FoveRay {
        FoveRay {
            origin: origin,
            direction: direction,
        }
    }

    /// Returns the point `distance` units along the ray.
    /// The direction is normalized first, a zero direction yields the origin.
    pub fn point_at(&self, distance: f32) -> Point3D<f32> {
        if self.direction.square_length() == 0.0 {
            return self.origin;
        }
        self.origin + self.direction.normalize() * distance
    }

    /// A ray whose origin equals its direction has never been written by a
    /// camera projection and must not be cast.
    pub fn is_degenerate(&self) -> bool {
        self.origin.to_vector() == self.direction
    }

    /// Whether every component of the ray is a finite number.
    pub fn is_finite(&self) -> bool {
        let o = self.origin;
        let d = self.direction;
        [o.x, o.y, o.z, d.x, d.y, d.z].iter().all(|c| c.is_finite())
    }
}

/// The gaze rays of both eyes, derived from the same pose.
///
/// These rays are overwritten each frame, so they should not be kept
/// across frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FoveEyeRays {
    pub left: FoveRay,
    pub right: FoveRay,
}

impl FoveEyeRays {
    pub fn new(left: FoveRay, right: FoveRay) -> FoveEyeRays {
        FoveEyeRays {
            left: left,
            right: right,
        }
    }

    pub fn get(&self, eye: FoveEye) -> FoveRay {
        match eye {
            FoveEye::Left => self.left,
            FoveEye::Right => self.right,
        }
    }
}

/// Result of a successful collider raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoveRaycastHit {
    pub point: Point3D<f32>,
    pub distance: f32,
}
