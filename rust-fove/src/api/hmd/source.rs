use euclid::default::{Point2D, Rotation3D};
use rust_fove_api::{FoveHmdControlMsg, FovePoseSource};
use std::sync::mpsc::{channel, Receiver, Sender};

// Placeholder for a device backed pose source.
//
// There is no headset runtime behind it: a driver thread (or a test) pushes
// FoveHmdControlMsg values through the remote sender and `update` latches
// everything received since the previous update. Position is not reported,
// matching the emulated source.
pub struct FoveHmdSource {
    receiver: Receiver<FoveHmdControlMsg>,
    orientation: Rotation3D<f32>,
    left_eye_point: Point2D<f32>,
    right_eye_point: Point2D<f32>,
}

impl FoveHmdSource {
    pub fn new_with_remote() -> (FoveHmdSource, Sender<FoveHmdControlMsg>) {
        let (send, rcv) = channel();
        let source = FoveHmdSource {
            receiver: rcv,
            orientation: Rotation3D::identity(),
            left_eye_point: Point2D::new(0.5, 0.5),
            right_eye_point: Point2D::new(0.5, 0.5),
        };
        (source, send)
    }

    fn handle_msg(&mut self, msg: FoveHmdControlMsg) {
        match msg {
            FoveHmdControlMsg::SetOrientation(orientation) => {
                self.orientation = orientation;
            }
            FoveHmdControlMsg::SetGaze(left, right) => {
                self.left_eye_point = left;
                self.right_eye_point = right;
            }
            FoveHmdControlMsg::ResetPose => {
                self.orientation = Rotation3D::identity();
                self.left_eye_point = Point2D::new(0.5, 0.5);
                self.right_eye_point = Point2D::new(0.5, 0.5);
            }
        }
    }
}

impl FovePoseSource for FoveHmdSource {
    fn update(&mut self) {
        while let Ok(msg) = self.receiver.try_recv() {
            self.handle_msg(msg);
        }
    }

    fn rotation(&self) -> Rotation3D<f32> {
        self.orientation
    }

    fn left_eye_point(&self) -> Point2D<f32> {
        self.left_eye_point
    }

    fn right_eye_point(&self) -> Point2D<f32> {
        self.right_eye_point
    }
}
