use euclid::default::{Point2D, Size2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoveButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys used by the distortion tuning layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoveKey {
    A,
    Z,
    S,
    X,
    D,
    C,
    LeftShift,
    Return,
}

/// Raw input polled from the host once per tick.
///
/// Pointer coordinates are in screen pixels with the origin in the
/// bottom-left corner.
pub trait FoveInput {
    fn pointer_position(&self) -> Point2D<f32>;

    /// True only on the tick the button went down.
    fn button_down(&self, button: FoveButton) -> bool;

    /// True on every tick the button is held.
    fn button_held(&self, button: FoveButton) -> bool;

    /// True only on the tick the key went down.
    fn key_down(&self, key: FoveKey) -> bool;

    fn key_held(&self, key: FoveKey) -> bool;

    fn screen_size(&self) -> Size2D<u32>;
}
