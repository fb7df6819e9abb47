//! # hand_gesture
//!
//! Deterministic hand-pose classification over 21-point landmark frames.
//!
//! | Gesture | Geometry |
//! |---|---|
//! | OK sign | thumb tip within 0.05 of index tip, middle/ring/pinky extended |
//! | Fist | no non-thumb finger extended |
//! | Open palm | all four non-thumb fingers extended |
//! | None | anything else, or no hand |
//!
//! A finger is *extended* when its tip is farther from the wrist than its PIP
//! joint.  Checks run top to bottom; the first match wins, so a pinched
//! thumb over an otherwise open hand is an OK sign, never an open palm.
//!
//! Proximity is the wrist → middle-MCP distance remapped from [0.1, 0.5] to
//! [0, 1].
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{classify, GestureCell, GestureReading, GestureState};
//! use hand_gesture::synthetic::{pose, Pose};
//!
//! let frame = pose(Pose::Fist, 0.3);
//! assert_eq!(classify(Some(&frame)), GestureState::Fist);
//!
//! let cell = GestureCell::new();
//! cell.publish(GestureReading::from_frame(Some(&frame)));
//! assert_eq!(cell.gesture(), GestureState::Fist);
//! ```

pub mod landmark;
pub mod classify;
pub mod cell;
pub mod synthetic;

pub use landmark::{first_hand, Finger, FrameError, Landmark, LandmarkFrame, LANDMARK_COUNT, NON_THUMB};
pub use classify::{
    classify, estimate_proximity, is_extended, read_hands, GestureReading, GestureState,
    OK_PINCH_THRESHOLD, PROXIMITY_NEAR_PALM_MAX, PROXIMITY_NEAR_PALM_MIN,
};
pub use cell::GestureCell;
