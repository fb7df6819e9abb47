//! Hand landmarks and the fixed 21-point joint layout.
//!
//! Index ↔ joint mapping follows the common pose-estimation layout: wrist at
//! 0, then four joints per digit from the palm outward, thumb first.

use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Joint indices
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Number of landmarks in one hand frame.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One detected point on the hand, in the pose source's normalized space
/// (roughly 0–1 per axis).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Detector confidence, if the source provides one.  Not read here.
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z, visibility: None }
    }

    /// Distance in the image plane.  Depth is ignored: pose sources estimate
    /// it on a different scale from x/y.
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger: compile-time joint table
// ════════════════════════════════════════════════════════════════════════════

/// The five digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// The four digits whose straightness the classifier tests.
pub const NON_THUMB: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

/// Landmark indices of one digit, palm outward.  For the thumb the slots are
/// CMC, MCP, IP, TIP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerJoints {
    pub mcp: usize,
    pub pip: usize,
    pub dip: usize,
    pub tip: usize,
}

const FINGER_TABLE: [FingerJoints; 5] = [
    FingerJoints { mcp: THUMB_CMC,  pip: THUMB_MCP,  dip: THUMB_IP,   tip: THUMB_TIP  },
    FingerJoints { mcp: INDEX_MCP,  pip: INDEX_PIP,  dip: INDEX_DIP,  tip: INDEX_TIP  },
    FingerJoints { mcp: MIDDLE_MCP, pip: MIDDLE_PIP, dip: MIDDLE_DIP, tip: MIDDLE_TIP },
    FingerJoints { mcp: RING_MCP,   pip: RING_PIP,   dip: RING_DIP,   tip: RING_TIP   },
    FingerJoints { mcp: PINKY_MCP,  pip: PINKY_PIP,  dip: PINKY_DIP,  tip: PINKY_TIP  },
];

impl Finger {
    pub fn joints(self) -> FingerJoints {
        FINGER_TABLE[self as usize]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkFrame
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("hand frame needs 21 landmarks, got {0}")]
    WrongLength(usize),
}

/// A complete hand: exactly [`LANDMARK_COUNT`] landmarks in joint order.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        LandmarkFrame { points }
    }

    /// Build a frame from a detector's point list.
    pub fn from_points(points: &[Landmark]) -> Result<Self, FrameError> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| FrameError::WrongLength(points.len()))?;
        Ok(LandmarkFrame { points })
    }

    pub fn point(&self, joint: usize) -> &Landmark {
        &self.points[joint]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn wrist(&self) -> &Landmark {
        &self.points[WRIST]
    }

    /// Planar distance between two joints.
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.points[a].planar_distance(&self.points[b])
    }
}

/// Reduce a multi-hand detection result to its first hand.
///
/// Later hands are ignored.  A first hand with the wrong point count yields
/// `None` rather than an error; detectors occasionally emit partial hands.
pub fn first_hand(hands: &[Vec<Landmark>]) -> Option<LandmarkFrame> {
    let hand = hands.first()?;
    match LandmarkFrame::from_points(hand) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::debug!("dropping malformed hand: {}", e);
            None
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
