/// Which eye a camera, ray or distortion stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub enum FoveEye {
    Left,
    Right,
}

impl FoveEye {
    /// Maps a raw eye index (0 = left, 1 = right) to an eye.
    /// Any other index is not an eye.
    pub fn from_index(index: u32) -> Option<FoveEye> {
        match index {
            0 => Some(FoveEye::Left),
            1 => Some(FoveEye::Right),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            FoveEye::Left => 0,
            FoveEye::Right => 1,
        }
    }

    // Lateral sign of the eye offset inside the rig.
    pub fn lateral_sign(self) -> f32 {
        match self {
            FoveEye::Left => -1.0,
            FoveEye::Right => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FoveEye::Left => "Left",
            FoveEye::Right => "Right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FoveEye;

    #[test]
    fn index_mapping() {
        assert_eq!(FoveEye::from_index(0), Some(FoveEye::Left));
        assert_eq!(FoveEye::from_index(1), Some(FoveEye::Right));
        assert_eq!(FoveEye::from_index(2), None);
        assert_eq!(FoveEye::Right.index(), 1);
    }
}
