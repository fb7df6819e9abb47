//! # swarm_physics
//!
//! Turns a stream of gesture readings into motion of a text particle swarm.
//!
//! ## Gesture → Motion mapping
//!
//! | Gesture | Camera | Effect |
//! |---|---|---|
//! | Fist | accelerates toward the text | |
//! | Open palm | drifts away (gentler) | flow wave rises; scatters if the camera is close |
//! | OK sign | | particles grow toward [`OK_SCALE`](constants::OK_SCALE) |
//! | None | coasts to a stop | every effect fades |
//!
//! The camera is an inertial dolly with unconditional friction and hard
//! bounds; hitting a bound kills its velocity.  Flow, scatter and scale are
//! eased toward gesture-dependent targets.  Per-particle transforms are
//! recomputed from scratch each tick and written into per-texture
//! [`RenderBatch`]es at fixed slots.

pub mod constants;
pub mod motion;
pub mod batch;
pub mod swarm;

pub use batch::{InstanceTransform, RenderBatch, Scene};
pub use motion::{ease, SimulationState};
pub use swarm::{idle_drift, particle_transform, Camera, Swarm};
