use euclid::default::{Point2D, Rotation3D};
use euclid::Angle;
use rust_fove_api::{FoveButton, FoveInput, FovePoseSource};
use std::rc::Rc;

// Pose source driven by the mouse, used when no headset is attached.
//
// Dragging with the secondary button held turns the head: one pixel of
// pointer travel is one degree of yaw (x) or pitch (y). The gaze of both
// eyes follows the pointer inside whichever half of the screen it is in.
//
// Drag deltas accumulate per `update`. The frame cache only updates the
// source on ticks that read pose data, so a drag spanning unread ticks is
// applied in one step on the next read.
pub struct EmulatedMouseSource {
    input: Rc<dyn FoveInput>,
    last_pointer: Point2D<f32>,
    rot_x: f32,
    rot_y: f32,
}

impl EmulatedMouseSource {
    pub fn new(input: Rc<dyn FoveInput>) -> EmulatedMouseSource {
        EmulatedMouseSource {
            input: input,
            last_pointer: Point2D::origin(),
            rot_x: 0.0,
            rot_y: 0.0,
        }
    }

    /// Accumulated yaw and pitch in degrees.
    pub fn yaw_pitch(&self) -> (f32, f32) {
        (self.rot_x, self.rot_y)
    }
}

impl FovePoseSource for EmulatedMouseSource {
    fn update(&mut self) {
        let pointer = self.input.pointer_position();
        if self.input.button_down(FoveButton::Secondary) {
            self.last_pointer = pointer;
        }

        if self.input.button_held(FoveButton::Secondary) {
            self.rot_x += pointer.x - self.last_pointer.x;
            self.rot_y += pointer.y - self.last_pointer.y;
            self.last_pointer = pointer;
        }
    }

    fn rotation(&self) -> Rotation3D<f32> {
        // Pitch first, then yaw, so looking up and down stays level.
        let pitch = Rotation3D::around_x(Angle::degrees(-self.rot_y));
        let yaw = Rotation3D::around_y(Angle::degrees(self.rot_x));
        pitch.then(&yaw)
    }

    fn left_eye_point(&self) -> Point2D<f32> {
        let screen = self.input.screen_size();
        let half_screen_w = (screen.width / 2) as f32;
        // A minimized window has no halves to normalize into.
        if half_screen_w == 0.0 || screen.height == 0 {
            return Point2D::new(0.5, 0.5);
        }
        let pointer = self.input.pointer_position();

        let x = if pointer.x < half_screen_w {
            pointer.x / half_screen_w
        } else {
            (pointer.x - half_screen_w) / half_screen_w
        };
        Point2D::new(x, pointer.y / screen.height as f32)
    }

    fn right_eye_point(&self) -> Point2D<f32> {
        self.left_eye_point()
    }
}
