use std::convert::TryFrom;
use crate::VRError;

// Eye index used by every per-eye accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VREye {
    Left,
    Right,
}

impl VREye {
    pub const ALL: [VREye; 2] = [VREye::Left, VREye::Right];

    pub fn index(self) -> u32 {
        match self {
            VREye::Left => 0,
            VREye::Right => 1,
        }
    }
}

// Runtimes and engines pass eyes around as raw indices. Anything other
// than 0 or 1 is a contract violation.
impl TryFrom<u32> for VREye {
    type Error = VRError;

    fn try_from(index: u32) -> Result<VREye, VRError> {
        match index {
            0 => Ok(VREye::Left),
            1 => Ok(VREye::Right),
            other => Err(VRError::InvalidEye(other)),
        }
    }
}
