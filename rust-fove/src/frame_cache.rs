use crate::rig::FoveEyes;
use rust_fove_api::utils;
use rust_fove_api::{FoveError, FoveEyeRays, FovePose, FovePoseSource, FoveResult, FoveRigAnchor};

/// Everything known about the headset for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FoveFrame {
    /// Tick the frame was computed in.
    pub tick: u64,

    pub pose: FovePose,

    /// `Err(FoveError::NotReady)` while the eye cameras do not exist yet.
    pub eye_rays: FoveResult<FoveEyeRays>,
}

/// Memoizes one pose sample per tick.
///
/// Sensor data changes quickly enough that reading it several times in one
/// frame would let different consumers see different poses. The first
/// `sample` of a tick queries the pose source, applies the head pose to the
/// rig anchor and derives the eye rays; every later call in the same tick
/// returns that frame. `begin_frame` starts the next tick.
///
/// Sampling is lazy: a tick in which nobody calls `sample` never queries the
/// source, so input the source accumulates per `update` is applied late.
pub struct FrameCache {
    source: Box<dyn FovePoseSource>,
    frame: Option<FoveFrame>,
    tick: u64,
    source_queries: u64,
}

impl FrameCache {
    pub fn new(source: Box<dyn FovePoseSource>) -> FrameCache {
        FrameCache {
            source: source,
            frame: None,
            tick: 0,
            source_queries: 0,
        }
    }

    /// Drops the memoized frame so the next `sample` queries the source.
    pub fn begin_frame(&mut self) {
        self.frame = None;
        self.tick += 1;
    }

    /// Whether this tick's frame has already been computed.
    pub fn is_fresh(&self) -> bool {
        self.frame.is_some()
    }

    /// The frame of the current tick if it was already computed.
    pub fn current(&self) -> Option<&FoveFrame> {
        self.frame.as_ref()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// How many times the pose source was queried since creation.
    pub fn source_queries(&self) -> u64 {
        self.source_queries
    }

    pub fn sample(&mut self, anchor: &mut dyn FoveRigAnchor, eyes: Option<&FoveEyes>) -> &FoveFrame {
        let tick = self.tick;
        let source = &mut self.source;
        let source_queries = &mut self.source_queries;
        self.frame.get_or_insert_with(|| {
            *source_queries += 1;
            FrameCache::compute(tick, &mut **source, anchor, eyes)
        })
    }

    fn compute(tick: u64,
               source: &mut dyn FovePoseSource,
               anchor: &mut dyn FoveRigAnchor,
               eyes: Option<&FoveEyes>) -> FoveFrame {
        source.update();

        // Position tracking is not implemented, position stays zero.
        let pose = FovePose {
            timestamp: utils::timestamp(),
            orientation: source.rotation(),
            position: source.position(),
            left_eye_point: source.left_eye_point(),
            right_eye_point: source.right_eye_point(),
        };
        anchor.set_local_pose(pose.position, pose.orientation);

        // Rays go through the eye cameras, which only now follow the new
        // anchor pose.
        let eye_rays = match eyes {
            Some(eyes) => {
                let left = eyes.left.camera().viewport_point_to_ray(pose.left_eye_point);
                let right = eyes.right.camera().viewport_point_to_ray(pose.right_eye_point);
                Ok(FoveEyeRays::new(left, right))
            }
            None => Err(FoveError::NotReady),
        };

        FoveFrame {
            tick: tick,
            pose: pose,
            eye_rays: eye_rays,
        }
    }
}
