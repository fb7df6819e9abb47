//! The per-tick driver.
//!
//! `Swarm` owns the motion state and the current scene.  Each tick it
//! advances the motion state under the latest gesture, then recomputes every
//! particle's transform from its fixed base and jitter and writes it into
//! the particle's batch slot.

use std::f64::consts::TAU;

use tracing::info;

use hand_gesture::GestureState;
use particle_field::{Particle, ParticleField};

use crate::batch::{InstanceTransform, RenderBatch, Scene};
use crate::constants::*;
use crate::motion::SimulationState;

/// Where the camera sits.  It always looks at the world origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: [f32; 3],
    pub target:   [f32; 3],
}

// ════════════════════════════════════════════════════════════════════════════
// Per-particle transform
// ════════════════════════════════════════════════════════════════════════════

/// `angle` reduced modulo `period`, narrowed to f32.  The clock is f64 and
/// grows for the life of the process; only the reduced angle is narrowed.
fn wrap(angle: f64, period: f64) -> f32 {
    (angle % period) as f32
}

/// Small breathing motion along the jitter vector, present at all times.
pub fn idle_drift(p: &Particle, time: f64) -> [f32; 3] {
    let angle = time * f64::from(IDLE_DRIFT_RATE) + f64::from(p.base[0] + p.base[1]);
    let s = wrap(angle, TAU).sin() * IDLE_DRIFT;
    [p.jitter[0] * s, p.jitter[1] * s, p.jitter[2] * s]
}

/// Transform of `p` at `time` under the given motion state and gesture.
pub fn particle_transform(
    p:       &Particle,
    state:   &SimulationState,
    gesture: GestureState,
    time:    f64,
) -> InstanceTransform {
    let drift = idle_drift(p, time);
    let mut position = [p.base[0] + drift[0], p.base[1] + drift[1], p.base[2] + drift[2]];
    let mut rotation = [0.0f32; 3];

    let flow = state.flow_amount;
    if flow > AMOUNT_EPSILON {
        // cos(phase / 2) repeats every two turns.
        let phase = wrap(
            f64::from(p.base[0] * WAVE_PHASE_PER_UNIT) - time * f64::from(WAVE_SPEED),
            2.0 * TAU,
        );
        let wave_z = phase.sin();
        let wave_y = (phase * 0.5).cos();
        position[2] += wave_z * WAVE_DEPTH * flow;
        position[1] += wave_y * WAVE_LIFT * flow;
        rotation[0] += wave_z * WAVE_TILT * flow;
        rotation[2] += wave_y * WAVE_TILT * flow;
    }

    let scatter = state.scatter_amount;
    if scatter > AMOUNT_EPSILON {
        for (axis, pos) in position.iter_mut().enumerate() {
            *pos += p.jitter[axis] * SCATTER_DISTANCE * scatter;
        }
        rotation[0] += wrap(f64::from(p.jitter[0] * SCATTER_SPIN * scatter) * time, TAU);
        rotation[1] += wrap(f64::from(p.jitter[1] * SCATTER_SPIN * scatter) * time, TAU);
    }

    InstanceTransform {
        position,
        rotation,
        scale: state.applied_scale(gesture),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Swarm
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct Swarm {
    state: SimulationState,
    scene: Scene,
    /// Seconds of animation time, advanced by clamped frame steps.
    clock: f64,
}

impl Swarm {
    pub fn new(field: ParticleField) -> Self {
        Swarm {
            state: SimulationState::default(),
            scene: Scene::new(field),
            clock: 0.0,
        }
    }

    /// Replace the particle field.
    ///
    /// The new batch set is built completely before it replaces the old one,
    /// so a tick never sees a partial scene.  Motion state and the clock are
    /// kept.
    pub fn install(&mut self, field: ParticleField) {
        let scene = Scene::new(field);
        let old = std::mem::replace(&mut self.scene, scene);
        info!(
            particles = self.scene.field.len(),
            batches   = self.scene.batches.len(),
            replaced  = old.field.len(),
            "particle field installed"
        );
    }

    /// Advance one display refresh.
    ///
    /// `dt` is the frame step in seconds; it is clamped to
    /// `[0, MAX_FRAME_DT]` before it moves the animation clock.
    pub fn tick(&mut self, gesture: GestureState, dt: f32) {
        self.clock += f64::from(dt.max(0.0).min(MAX_FRAME_DT));
        self.state.advance(gesture);

        let Scene { field, batches } = &mut self.scene;
        for p in &field.particles {
            let t = particle_transform(p, &self.state, gesture, self.clock);
            batches[p.group].write(p.slot, t);
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn particles(&self) -> &[Particle] {
        &self.scene.field.particles
    }

    pub fn batches(&self) -> &[RenderBatch] {
        &self.scene.batches
    }

    /// Clear every batch's dirty flag after an upload.
    pub fn mark_uploaded(&mut self) {
        for b in &mut self.scene.batches {
            b.mark_uploaded();
        }
    }

    pub fn camera(&self) -> Camera {
        Camera {
            position: [0.0, 0.0, self.state.rendered_distance],
            target:   [0.0, 0.0, 0.0],
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
