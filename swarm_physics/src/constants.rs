//! Tuning constants.
//!
//! Rates and accelerations are applied once per tick, so the feel of the
//! animation follows the display refresh rate.  Only the wave and spin
//! phases read the seconds clock.

// ── camera dolly ──────────────────────────────────────────────────────────

/// Closest the camera may get to the origin.
pub const CAMERA_MIN_Z: f32 = 5.0;
/// Farthest the camera may get from the origin.
pub const CAMERA_MAX_Z: f32 = 80.0;
/// Camera distance at startup.
pub const CAMERA_DEFAULT_Z: f32 = 40.0;

/// Added to the approach velocity per tick while a fist is held.
pub const PULL_ACCELERATION: f32 = 0.04;
/// Subtracted from the approach velocity per tick while the palm is open.
pub const PUSH_ACCELERATION: f32 = 0.02;
/// Per-tick velocity multiplier, applied every tick.
pub const CAMERA_DAMPING: f32 = 0.92;
/// Easing factor of the rendered camera toward the logical distance.
pub const CAMERA_SMOOTHING: f32 = 0.1;

// ── effect amounts ────────────────────────────────────────────────────────

pub const FLOW_SMOOTHING: f32 = 0.02;
pub const SCATTER_SMOOTHING: f32 = 0.08;
pub const SCALE_SMOOTHING: f32 = 0.1;

/// Scatter only builds up while the rendered camera is nearer than this.
pub const SCATTER_TRIGGER_DISTANCE: f32 = 15.0;
/// Target of the scale multiplier while the OK sign is held.
pub const OK_SCALE: f32 = 1.8;

/// Amounts at or below this are treated as zero.
pub const AMOUNT_EPSILON: f32 = 1e-3;

// ── per-particle motion ───────────────────────────────────────────────────

/// Wave phase per world unit of base x.
pub const WAVE_PHASE_PER_UNIT: f32 = 0.3;
/// Wave phase per second.
pub const WAVE_SPEED: f32 = 2.0;
/// Peak depth offset of the flow wave.
pub const WAVE_DEPTH: f32 = 1.5;
/// Peak vertical offset of the flow wave.
pub const WAVE_LIFT: f32 = 0.5;
/// Peak tilt (radians) about X and Z while flowing.
pub const WAVE_TILT: f32 = 0.35;

/// Displacement along the jitter vector at full scatter.
pub const SCATTER_DISTANCE: f32 = 30.0;
/// Spin rate (radians per second per unit of jitter) at full scatter.
pub const SCATTER_SPIN: f32 = 4.0;

/// Peak idle drift along the jitter vector.
pub const IDLE_DRIFT: f32 = 0.4;
/// Idle drift phase per second.
pub const IDLE_DRIFT_RATE: f32 = 1.5;

/// Longest frame step the clock accepts, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;
