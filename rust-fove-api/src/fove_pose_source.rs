use euclid::default::{Point2D, Rotation3D, Vector3D};

/// The FovePoseSource trait forms the base of all head and eye tracking
/// backends, emulated or device backed.
///
/// `update` advances the backend from its raw input; every other method is
/// a pure read of the state left by the last `update`.
pub trait FovePoseSource {
    /// Advances internal state from raw input.
    fn update(&mut self);

    /// Head orientation.
    fn rotation(&self) -> Rotation3D<f32>;

    /// Head position. No backend tracks position yet, implementations
    /// return the zero vector.
    fn position(&self) -> Vector3D<f32> {
        Vector3D::zero()
    }

    /// Normalized viewport point the left eye is looking at.
    fn left_eye_point(&self) -> Point2D<f32>;

    /// Normalized viewport point the right eye is looking at.
    fn right_eye_point(&self) -> Point2D<f32>;
}
