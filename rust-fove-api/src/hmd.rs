use euclid::default::{Point2D, Rotation3D};

/// Messages a device driver (or a test harness) sends to the placeholder
/// HMD pose source. Applied on the source's next `update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoveHmdControlMsg {
    SetOrientation(Rotation3D<f32>),
    SetGaze(Point2D<f32>, Point2D<f32>),
    ResetPose,
}
