use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::SeqCst;

static OBJECT_ID_COUNTER: AtomicU32 = AtomicU32::new(1);

// Generates a unique identifier for any host-side GPU object.
// Zero is never handed out.
pub fn new_id() -> u32 {
    OBJECT_ID_COUNTER.fetch_add(1, SeqCst)
}

// Returns the current time in milliseconds
pub fn timestamp() -> f64 {
    let timespec = time::get_time();
    timespec.sec as f64 * 1000.0 + (timespec.nsec as f64 * 1e-6)
}

// Component-wise comparison with a tolerance, for float vectors coming out
// of rotations and projections.
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_non_zero() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn timestamp_is_monotonic_enough() {
        let a = timestamp();
        let b = timestamp();
        assert!(b >= a);
    }
}
