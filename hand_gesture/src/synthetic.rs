//! Synthetic hand frames.
//!
//! Builds plausible 21-point hands for a handful of poses so that the
//! keyboard simulator can drive the real classifier, and so tests have
//! realistic inputs.  Hands point up the image (y grows downward) with the
//! wrist at [`WRIST_ANCHOR`].

use crate::landmark::{
    Finger, Landmark, LandmarkFrame, LANDMARK_COUNT, NON_THUMB,
    THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Image position of the wrist in every synthetic frame.
pub const WRIST_ANCHOR: (f32, f32) = (0.5, 0.85);

/// Palm sizes outside this range are clamped.  Below the lower bound an open
/// thumb would come within pinch distance of the index tip.
pub const PALM_SIZE_RANGE: (f32, f32) = (0.05, 0.6);

/// Poses the generator knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Fist,
    OpenPalm,
    OkSign,
    /// Index and middle up, ring and pinky curled.  Classifies as no gesture.
    Peace,
}

// Offsets in palm units (wrist → middle MCP == 1).
const MCP_OFFSETS: [(f32, f32); 4] = [(-0.30, -0.95), (0.0, -1.0), (0.28, -0.95), (0.52, -0.85)];
const FINGER_LENGTH: [f32; 4] = [0.95, 1.0, 0.95, 0.8];

/// Build a frame for `pose` whose wrist → middle-MCP distance is
/// `palm_size` (clamped to [`PALM_SIZE_RANGE`]).
pub fn pose(pose: Pose, palm_size: f32) -> LandmarkFrame {
    let s = palm_size.clamp(PALM_SIZE_RANGE.0, PALM_SIZE_RANGE.1);
    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    let at = |dx: f32, dy: f32, dz: f32| {
        Landmark::new(WRIST_ANCHOR.0 + dx * s, WRIST_ANCHOR.1 + dy * s, dz * s)
    };

    pts[WRIST] = at(0.0, 0.0, 0.0);

    let extended: [bool; 4] = match pose {
        Pose::Fist     => [false, false, false, false],
        Pose::OpenPalm => [true, true, true, true],
        Pose::OkSign   => [false, true, true, true],
        Pose::Peace    => [true, true, false, false],
    };

    for (i, finger) in NON_THUMB.iter().enumerate() {
        let j = finger.joints();
        let (mx, my) = MCP_OFFSETS[i];
        let len = FINGER_LENGTH[i];
        pts[j.mcp] = at(mx, my, 0.0);
        if extended[i] {
            pts[j.pip] = at(mx, my - 0.45 * len, 0.0);
            pts[j.dip] = at(mx, my - 0.75 * len, 0.0);
            pts[j.tip] = at(mx, my - len, 0.0);
        } else {
            // Folded over toward the palm.
            pts[j.pip] = at(mx, my - 0.35 * len, -0.1);
            pts[j.dip] = at(mx, my - 0.15 * len, -0.25);
            pts[j.tip] = at(mx, my + 0.15 * len, -0.2);
        }
    }

    pts[THUMB_CMC] = at(-0.35, -0.25, 0.0);
    pts[THUMB_MCP] = at(-0.60, -0.45, 0.0);
    pts[THUMB_IP]  = at(-0.75, -0.65, 0.0);
    pts[THUMB_TIP] = match pose {
        Pose::OpenPalm => at(-0.85, -0.85, 0.0),
        Pose::OkSign => {
            let index_tip = pts[Finger::Index.joints().tip];
            Landmark::new(index_tip.x + 0.02 * s, index_tip.y, index_tip.z)
        }
        Pose::Fist | Pose::Peace => at(-0.10, -0.70, -0.2),
    };

    LandmarkFrame::new(pts)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
