//! Geometric gesture classification.
//!
//! A finger counts as *extended* when its tip is farther from the wrist than
//! its PIP joint.  The test compares two distances on the same hand, so it
//! holds up under hand rotation and needs no absolute threshold.

use crate::landmark::{
    Finger, LandmarkFrame, NON_THUMB,
    INDEX_TIP, MIDDLE_MCP, THUMB_TIP, WRIST,
};

// ════════════════════════════════════════════════════════════════════════════
// Thresholds
// ════════════════════════════════════════════════════════════════════════════

/// Thumb-tip ↔ index-tip distance below which the two count as pinched.
pub const OK_PINCH_THRESHOLD: f32 = 0.05;

/// Wrist ↔ middle-MCP distance mapped to proximity 0.
pub const PROXIMITY_NEAR_PALM_MIN: f32 = 0.1;

/// Wrist ↔ middle-MCP distance mapped to proximity 1.
pub const PROXIMITY_NEAR_PALM_MAX: f32 = 0.5;

// ════════════════════════════════════════════════════════════════════════════
// GestureState
// ════════════════════════════════════════════════════════════════════════════

/// The recognized hand pose.  Exactly one is current at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GestureState {
    #[default]
    None     = 0,
    Fist     = 1,
    OpenPalm = 2,
    OkSign   = 3,
}

impl GestureState {
    pub fn name(self) -> &'static str {
        match self {
            GestureState::None     => "none",
            GestureState::Fist     => "fist",
            GestureState::OpenPalm => "open palm",
            GestureState::OkSign   => "ok sign",
        }
    }

    /// Inverse of `as u8`.  Unknown codes read as `None`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => GestureState::Fist,
            2 => GestureState::OpenPalm,
            3 => GestureState::OkSign,
            _ => GestureState::None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

/// True if `finger`'s tip lies strictly farther from the wrist than its PIP.
pub fn is_extended(frame: &LandmarkFrame, finger: Finger) -> bool {
    let j = finger.joints();
    frame.distance(WRIST, j.tip) > frame.distance(WRIST, j.pip)
}

/// Classify one hand.
///
/// Checks run in a fixed order and the first match wins:
///
/// 1. **OK sign**: thumb and index tips pinched, middle/ring/pinky extended.
/// 2. **Fist**: none of index/middle/ring/pinky extended.
/// 3. **Open palm**: all four extended.
/// 4. **None**: anything else, or no hand at all.
pub fn classify(frame: Option<&LandmarkFrame>) -> GestureState {
    let Some(frame) = frame else {
        return GestureState::None;
    };

    let extended = NON_THUMB.map(|f| is_extended(frame, f));
    let [_index, middle, ring, pinky] = extended;

    let pinched = frame.distance(THUMB_TIP, INDEX_TIP) < OK_PINCH_THRESHOLD;
    if pinched && middle && ring && pinky {
        return GestureState::OkSign;
    }
    if extended.iter().all(|&e| !e) {
        return GestureState::Fist;
    }
    if extended.iter().all(|&e| e) {
        return GestureState::OpenPalm;
    }
    GestureState::None
}

/// Apparent palm size remapped to 0–1; larger means the hand is nearer the
/// camera.
pub fn estimate_proximity(frame: &LandmarkFrame) -> f32 {
    let palm = frame.distance(WRIST, MIDDLE_MCP);
    let t = (palm - PROXIMITY_NEAR_PALM_MIN) / (PROXIMITY_NEAR_PALM_MAX - PROXIMITY_NEAR_PALM_MIN);
    t.clamp(0.0, 1.0)
}

// ════════════════════════════════════════════════════════════════════════════
// GestureReading: classifier output for one detection cycle
// ════════════════════════════════════════════════════════════════════════════

/// Gesture plus proximity for one detection cycle.  `proximity` is `None`
/// when no usable hand was seen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureReading {
    pub gesture:   GestureState,
    pub proximity: Option<f32>,
}

impl GestureReading {
    pub fn from_frame(frame: Option<&LandmarkFrame>) -> Self {
        GestureReading {
            gesture:   classify(frame),
            proximity: frame.map(estimate_proximity),
        }
    }
}

/// Classify the first hand of a detector result; later hands are ignored.
pub fn read_hands(hands: &[Vec<crate::Landmark>]) -> GestureReading {
    let frame = crate::landmark::first_hand(hands);
    GestureReading::from_frame(frame.as_ref())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT};
    use crate::synthetic::{pose, Pose};

    /// Hand pointing up the image: wrist at the bottom, each non-thumb finger
    /// a straight column whose PIP sits at distance 0.2 from the wrist.  Tips
    /// are placed at `tip_dist[i]` from the wrist along the same column.
    fn column_hand(tip_dist: [f32; 4], thumb_tip: (f32, f32), index_tip: Option<(f32, f32)>) -> LandmarkFrame {
        let mut pts = [Landmark::new(0.5, 0.9, 0.0); LANDMARK_COUNT];
        let columns = [0.44, 0.48, 0.52, 0.56];
        for (i, finger) in NON_THUMB.iter().enumerate() {
            let j = finger.joints();
            let x = columns[i];
            pts[j.mcp] = Landmark::new(x, 0.8, 0.0);
            pts[j.pip] = Landmark::new(x, 0.9 - 0.2, 0.0);
            pts[j.dip] = Landmark::new(x, 0.9 - 0.2, 0.0);
            pts[j.tip] = Landmark::new(x, 0.9 - tip_dist[i], 0.0);
        }
        if let Some((x, y)) = index_tip {
            pts[INDEX_TIP] = Landmark::new(x, y, 0.0);
        }
        pts[THUMB_TIP] = Landmark::new(thumb_tip.0, thumb_tip.1, 0.0);
        pts[WRIST] = Landmark::new(0.5, 0.9, 0.0);
        LandmarkFrame::new(pts)
    }

    #[test]
    fn missing_frame_is_none() {
        assert_eq!(classify(None), GestureState::None);
    }

    #[test]
    fn all_tips_inside_pips_is_fist() {
        // Thumb pinched to index, still a fist because middle etc. are curled.
        for thumb in [(0.1, 0.1), (0.44, 0.8)] {
            let f = column_hand([0.1, 0.12, 0.15, 0.05], thumb, None);
            assert_eq!(classify(Some(&f)), GestureState::Fist);
        }
    }

    #[test]
    fn all_extended_with_open_thumb_is_open_palm() {
        let f = column_hand([0.35, 0.4, 0.38, 0.3], (0.2, 0.7), None);
        assert_eq!(classify(Some(&f)), GestureState::OpenPalm);
    }

    #[test]
    fn loose_pinch_stays_open_palm() {
        // Thumb 0.06 from the index tip → outside the pinch threshold.
        let index_tip = (0.44, 0.55);
        let f = column_hand([0.35, 0.4, 0.38, 0.3], (0.44, 0.49), Some(index_tip));
        assert_eq!(classify(Some(&f)), GestureState::OpenPalm);
    }

    #[test]
    fn ok_sign_beats_open_palm() {
        // All four extended and thumb pinched to index.
        let index_tip = (0.44, 0.55);
        let f = column_hand([0.35, 0.4, 0.38, 0.3], (0.45, 0.55), Some(index_tip));
        assert_eq!(classify(Some(&f)), GestureState::OkSign);
    }

    #[test]
    fn ok_sign_regardless_of_index_extension() {
        // Index curled (tip 0.1 from wrist, inside its PIP), thumb touching it.
        let index_tip = (0.44, 0.8);
        let f = column_hand([0.1, 0.4, 0.38, 0.3], (0.45, 0.8), Some(index_tip));
        assert!(!is_extended(&f, Finger::Index));
        assert_eq!(classify(Some(&f)), GestureState::OkSign);
    }

    #[test]
    fn pinch_with_curled_ring_is_not_ok() {
        let index_tip = (0.44, 0.55);
        let f = column_hand([0.35, 0.4, 0.1, 0.3], (0.45, 0.55), Some(index_tip));
        assert_eq!(classify(Some(&f)), GestureState::None);
    }

    #[test]
    fn mixed_fingers_is_none() {
        let f = column_hand([0.35, 0.1, 0.38, 0.1], (0.1, 0.9), None);
        assert_eq!(classify(Some(&f)), GestureState::None);
    }

    #[test]
    fn end_to_end_ok_sign_scenario() {
        let mut pts = [Landmark::new(0.5, 0.9, 0.0); LANDMARK_COUNT];
        pts[WRIST] = Landmark::new(0.5, 0.9, 0.0);
        pts[THUMB_TIP] = Landmark::new(0.50, 0.50, 0.0);
        pts[INDEX_TIP] = Landmark::new(0.52, 0.50, 0.0);
        for (finger, x) in [(Finger::Middle, 0.55), (Finger::Ring, 0.6), (Finger::Pinky, 0.65)] {
            let j = finger.joints();
            pts[j.pip] = Landmark::new(x, 0.75, 0.0);
            pts[j.tip] = Landmark::new(x, 0.55, 0.0);
        }
        let frame = LandmarkFrame::new(pts);
        assert_eq!(classify(Some(&frame)), GestureState::OkSign);
    }

    #[test]
    fn proximity_clamps_and_is_monotonic() {
        let at = |palm: f32| {
            let mut pts = [Landmark::default(); LANDMARK_COUNT];
            pts[MIDDLE_MCP] = Landmark::new(palm, 0.0, 0.0);
            estimate_proximity(&LandmarkFrame::new(pts))
        };
        assert_eq!(at(0.0), 0.0);
        assert_eq!(at(0.05), 0.0);
        assert_eq!(at(0.1), 0.0);
        assert_eq!(at(0.5), 1.0);
        assert_eq!(at(0.9), 1.0);
        assert!((at(0.3) - 0.5).abs() < 1e-5);

        let mut prev = at(0.1);
        for i in 1..=40 {
            let p = at(0.1 + i as f32 * 0.01);
            assert!(p >= prev);
            prev = p;
        }
    }

    #[test]
    fn reading_has_no_proximity_without_hand() {
        let r = read_hands(&[]);
        assert_eq!(r.gesture, GestureState::None);
        assert!(r.proximity.is_none());

        let r = read_hands(&[pose(Pose::Fist, 0.3).points().to_vec()]);
        assert_eq!(r.gesture, GestureState::Fist);
        assert!(r.proximity.is_some());
    }

    #[test]
    fn gesture_code_roundtrip() {
        for g in [GestureState::None, GestureState::Fist, GestureState::OpenPalm, GestureState::OkSign] {
            assert_eq!(GestureState::from_code(g as u8), g);
        }
        assert_eq!(GestureState::from_code(200), GestureState::None);
    }
}
