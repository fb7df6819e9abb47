//! # swarm_app
//!
//! Hand-gesture controlled particle text.  A pose source (LeapMotion or the
//! keyboard simulator) classifies the first visible hand on its own thread;
//! the frame loop reads the latest gesture and animates the swarm spelling
//! out "I LOVE YOU".
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Effect |
//! |---|---|
//! | Fist | camera accelerates into the text |
//! | Open palm | camera backs off, text ripples; up close it explodes |
//! | OK sign | particles swell |
//! | No hand / other | everything settles back |
//!
//! ## Keyboard (simulation mode)
//!
//! | Key | Action |
//! |---|---|
//! | F / P / K / V (hold) | show a fist / open palm / OK sign / peace sign |
//! | Up / Down | move the simulated hand nearer / farther |
//! | 0–9 | rebuild with that many textures (0 = placeholder) |
//! | R | reroll jitter and texture groups |
//! | Q / Esc | quit |

pub mod error;
pub mod pose;
pub mod visualizer;
pub mod app;

pub use app::{run, AppConfig, AppState};
pub use error::AppError;
