use crate::{FoveRay, FoveRaycastHit};

/// A host collider that can be tested against a single ray.
pub trait FoveCollider {
    /// Returns the closest hit along `ray` no further than `max_distance`.
    fn raycast(&self, ray: &FoveRay, max_distance: f32) -> Option<FoveRaycastHit>;
}
