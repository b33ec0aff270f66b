use euclid::default::{Box3D, Point3D};
use rust_fove_api::{FoveCollider, FoveRay, FoveRaycastHit};

pub struct SphereCollider {
    pub center: Point3D<f32>,
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(center: Point3D<f32>, radius: f32) -> SphereCollider {
        SphereCollider {
            center: center,
            radius: radius,
        }
    }
}

impl FoveCollider for SphereCollider {
    fn raycast(&self, ray: &FoveRay, max_distance: f32) -> Option<FoveRaycastHit> {
        if !ray.is_finite() || ray.direction.square_length() == 0.0 {
            return None;
        }
        let direction = ray.direction.normalize();
        let to_center = self.center - ray.origin;
        let along = to_center.dot(direction);
        let closest_sq = to_center.square_length() - along * along;
        let radius_sq = self.radius * self.radius;
        if closest_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - closest_sq).sqrt();
        // Rays starting inside the sphere hit its far side.
        let distance = if along - half_chord >= 0.0 { along - half_chord } else { along + half_chord };
        if distance < 0.0 || distance > max_distance {
            return None;
        }
        Some(FoveRaycastHit {
            point: ray.origin + direction * distance,
            distance: distance,
        })
    }
}

/// Axis aligned box collider.
pub struct BoxCollider {
    pub bounds: Box3D<f32>,
}

impl BoxCollider {
    pub fn new(min: Point3D<f32>, max: Point3D<f32>) -> BoxCollider {
        BoxCollider {
            bounds: Box3D::new(min, max),
        }
    }
}

impl FoveCollider for BoxCollider {
    // Slab test.
    fn raycast(&self, ray: &FoveRay, max_distance: f32) -> Option<FoveRaycastHit> {
        if !ray.is_finite() || ray.direction.square_length() == 0.0 {
            return None;
        }
        let direction = ray.direction.normalize();
        let origin = [ray.origin.x, ray.origin.y, ray.origin.z];
        let dir = [direction.x, direction.y, direction.z];
        let min = [self.bounds.min.x, self.bounds.min.y, self.bounds.min.z];
        let max = [self.bounds.max.x, self.bounds.max.y, self.bounds.max.z];

        let mut near = 0.0f32;
        let mut far = max_distance;
        for axis in 0..3 {
            if dir[axis] == 0.0 {
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[axis];
            let mut t0 = (min[axis] - origin[axis]) * inv;
            let mut t1 = (max[axis] - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            near = near.max(t0);
            far = far.min(t1);
            if near > far {
                return None;
            }
        }
        Some(FoveRaycastHit {
            point: ray.origin + direction * near,
            distance: near,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::default::Vector3D;

    fn forward_ray() -> FoveRay {
        FoveRay::new(Point3D::origin(), Vector3D::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn sphere_hit_and_miss() {
        let sphere = SphereCollider::new(Point3D::new(0.0, 0.0, 10.0), 1.0);
        let hit = sphere.raycast(&forward_ray(), 1000.0).unwrap();
        assert_eq!(hit.distance, 9.0);
        assert!(sphere.raycast(&forward_ray(), 5.0).is_none());

        let aside = SphereCollider::new(Point3D::new(3.0, 0.0, 10.0), 1.0);
        assert!(aside.raycast(&forward_ray(), 1000.0).is_none());

        let behind = SphereCollider::new(Point3D::new(0.0, 0.0, -10.0), 1.0);
        assert!(behind.raycast(&forward_ray(), 1000.0).is_none());
    }

    #[test]
    fn box_hit_and_miss() {
        let bounds = BoxCollider::new(Point3D::new(-1.0, -1.0, 4.0), Point3D::new(1.0, 1.0, 6.0));
        let hit = bounds.raycast(&forward_ray(), 1000.0).unwrap();
        assert_eq!(hit.distance, 4.0);
        assert_eq!(hit.point, Point3D::new(0.0, 0.0, 4.0));

        let ray = FoveRay::new(Point3D::new(2.0, 0.0, 0.0), Vector3D::new(0.0, 0.0, 1.0));
        assert!(bounds.raycast(&ray, 1000.0).is_none());
    }

    #[test]
    fn non_finite_rays_never_hit() {
        let nan_direction = FoveRay::new(Point3D::origin(), Vector3D::new(std::f32::NAN, std::f32::NAN, std::f32::NAN));
        let nan_origin = FoveRay::new(Point3D::new(std::f32::NAN, 0.0, 0.0), Vector3D::new(0.0, 0.0, 1.0));
        let sphere = SphereCollider::new(Point3D::new(0.0, 0.0, -500.0), 1.0);
        let bounds = BoxCollider::new(Point3D::new(100.0, 100.0, 100.0), Point3D::new(101.0, 101.0, 101.0));
        for ray in &[nan_direction, nan_origin] {
            assert!(sphere.raycast(ray, 1000.0).is_none());
            assert!(bounds.raycast(ray, 1000.0).is_none());
        }
    }
}
