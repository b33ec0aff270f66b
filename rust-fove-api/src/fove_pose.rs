use crate::FoveEye;
use euclid::default::{Point2D, Rotation3D, Vector3D};

// The FovePose struct represents the headset's state for a single frame.
// It is produced at most once per tick and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FovePose {
    // Time at which the pose source was sampled, in milliseconds.
    pub timestamp: f64,

    // Orientation of the head as a unit quaternion.
    pub orientation: Rotation3D<f32>,

    // Position of the head. Position tracking is not implemented by any
    // pose source yet, so this is always the zero vector.
    pub position: Vector3D<f32>,

    // Gaze point of the left eye in normalized viewport space ([0, 1]²).
    pub left_eye_point: Point2D<f32>,

    // Gaze point of the right eye in normalized viewport space.
    pub right_eye_point: Point2D<f32>,
}

impl Default for FovePose {
    fn default() -> FovePose {
        FovePose {
            timestamp: 0.0,
            orientation: Rotation3D::identity(),
            position: Vector3D::zero(),
            left_eye_point: Point2D::new(0.5, 0.5),
            right_eye_point: Point2D::new(0.5, 0.5),
        }
    }
}

impl FovePose {
    pub fn eye_point(&self, eye: FoveEye) -> Point2D<f32> {
        match eye {
            FoveEye::Left => self.left_eye_point,
            FoveEye::Right => self.right_eye_point,
        }
    }
}
