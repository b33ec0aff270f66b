//! Gaze queries on top of the session's per-tick eye rays.
//!
//! Rays are read through the frame cache, so every query in one tick sees
//! the same pose. Only the left eye takes part in hit testing.

use crate::session::FoveSession;
use euclid::default::Point3D;
use rust_fove_api::{FoveCollider, FoveError, FoveEye, FoveEyeRays, FoveRay, FoveResult};

/// Maximum distance a gaze ray is cast.
pub const MAX_GAZE_DISTANCE: f32 = 1000.0;

/// Default distance of the gaze cursor in front of the eye.
pub const CURSOR_DISTANCE: f32 = 10.0;

pub fn eye_rays(session: &mut FoveSession) -> FoveResult<FoveEyeRays> {
    session.eye_rays()
}

pub fn eye_ray(session: &mut FoveSession, eye: FoveEye) -> FoveResult<FoveRay> {
    session.eye_rays().map(|rays| rays.get(eye))
}

/// Whether the user is looking at `collider`.
///
/// Casts the left eye ray only, up to `MAX_GAZE_DISTANCE`. Before the rig
/// exists, or while the ray is still degenerate or not finite, nothing is
/// looked at.
pub fn is_looking_at(session: &mut FoveSession, collider: &dyn FoveCollider) -> bool {
    let ray = match eye_ray(session, FoveEye::Left) {
        Ok(ray) => ray,
        Err(FoveError::NotReady) => return false,
        Err(e) => {
            warn!("Gaze ray unavailable: {}", e);
            return false;
        }
    };
    if ray.is_degenerate() || !ray.is_finite() {
        return false;
    }
    collider.raycast(&ray, MAX_GAZE_DISTANCE).is_some()
}

/// Projects a world point into the normalized viewport of one eye camera.
/// The z component is the depth in front of the camera.
///
/// Uses the eye camera's current transform and does not sample the pose.
/// Returns the origin before the rig exists.
pub fn viewport_position(session: &FoveSession, point: Point3D<f32>, eye: FoveEye) -> Point3D<f32> {
    match session.eye_camera(eye) {
        Some(eye_camera) => eye_camera.camera().world_to_viewport_point(point),
        None => Point3D::origin(),
    }
}

/// `viewport_position` for a raw eye index (0 left, 1 right). Any other
/// index yields the origin.
pub fn viewport_position_for_index(session: &FoveSession, point: Point3D<f32>, index: u32) -> Point3D<f32> {
    match FoveEye::from_index(index) {
        Some(eye) => viewport_position(session, point, eye),
        None => Point3D::origin(),
    }
}

/// The point `distance` units along the left eye ray, where a 3D gaze
/// cursor is drawn.
pub fn gaze_point(session: &mut FoveSession, distance: f32) -> FoveResult<Point3D<f32>> {
    eye_ray(session, FoveEye::Left).map(|ray| ray.point_at(distance))
}
