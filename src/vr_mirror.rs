use crate::VREye;

// Which eye textures are mirrored to the desktop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum MirrorTextureEyeSource {
    Off,
    LeftEye,
    RightEye,
    BothEyes,
}

impl Default for MirrorTextureEyeSource {
    fn default() -> MirrorTextureEyeSource {
        MirrorTextureEyeSource::BothEyes
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct MirrorRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// Where an eye texture lands in the mirror window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorBlit {
    pub eye: VREye,
    pub rect: MirrorRect,
}

#[derive(Clone, Copy, PartialEq)]
enum Align {
    Center,
    Left,
    Right,
}

/// Layout of the eye textures inside a mirror window of `window` size.
///
/// Each eye keeps the aspect ratio of its render target. In `BothEyes` mode
/// the window is split in halves, the left eye hugging the center from the
/// left and the right eye from the right.
pub fn mirror_layout(source: MirrorTextureEyeSource,
                     window: (f32, f32),
                     eye_target: (u32, u32))
                     -> Vec<MirrorBlit> {
    let (width, height) = window;
    match source {
        MirrorTextureEyeSource::Off => Vec::new(),
        MirrorTextureEyeSource::LeftEye => {
            vec![blit(VREye::Left, 0.0, 0.0, width, height, eye_target, Align::Center)]
        }
        MirrorTextureEyeSource::RightEye => {
            vec![blit(VREye::Right, 0.0, 0.0, width, height, eye_target, Align::Center)]
        }
        MirrorTextureEyeSource::BothEyes => {
            let half = width * 0.5;
            vec![blit(VREye::Left, 0.0, 0.0, half, height, eye_target, Align::Right),
                 blit(VREye::Right, half, 0.0, half, height, eye_target, Align::Left)]
        }
    }
}

fn blit(eye: VREye, x: f32, y: f32, w: f32, h: f32, eye_target: (u32, u32), align: Align) -> MirrorBlit {
    let target_aspect = eye_target.0 as f32 / eye_target.1.max(1) as f32;
    let aspect = w / h;

    let (sample_width, sample_height) = if aspect > 1.0 {
        (h * target_aspect, h)
    } else {
        (w, w / target_aspect)
    };

    let pos_x = match align {
        Align::Center => x + w * 0.5 - sample_width * 0.5,
        Align::Left => x,
        Align::Right => x + w - sample_width,
    };
    let pos_y = y + h * 0.5 - sample_height * 0.5;

    MirrorBlit {
        eye: eye,
        rect: MirrorRect {
            x: pos_x,
            y: pos_y,
            width: sample_width,
            height: sample_height,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_mirrors_nothing() {
        assert!(mirror_layout(MirrorTextureEyeSource::Off, (1920.0, 1080.0), (1512, 1680)).is_empty());
    }

    #[test]
    fn single_eye_is_centered() {
        let blits = mirror_layout(MirrorTextureEyeSource::RightEye, (1920.0, 1080.0), (1000, 1000));
        assert_eq!(blits.len(), 1);
        assert_eq!(blits[0].eye, VREye::Right);
        assert_eq!(blits[0].rect, MirrorRect { x: 420.0, y: 0.0, width: 1080.0, height: 1080.0 });
    }

    #[test]
    fn both_eyes_meet_in_the_middle() {
        let blits = mirror_layout(MirrorTextureEyeSource::BothEyes, (2000.0, 800.0), (500, 1000));
        assert_eq!(blits.len(), 2);
        let (left, right) = (blits[0].rect, blits[1].rect);
        assert_eq!(blits[0].eye, VREye::Left);
        assert_eq!(left.x + left.width, 1000.0);
        assert_eq!(right.x, 1000.0);
        assert_eq!(left.height, 800.0);
        assert_eq!(left.width, 400.0);
    }
}
