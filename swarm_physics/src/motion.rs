//! Global motion state: camera dolly and the three effect amounts.
//!
//! Every value moves by exponential easing (`v += (target - v) * factor`)
//! except the camera, which is an inertial dolly with friction and hard
//! bounds.

use hand_gesture::GestureState;

use crate::constants::*;

/// One easing step of `value` toward `target`.
pub fn ease(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

/// Scalars the physics tick evolves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationState {
    /// Logical camera distance from the origin, always within
    /// `[CAMERA_MIN_Z, CAMERA_MAX_Z]`.
    pub camera_distance: f32,
    /// Positive values move the camera toward the origin.
    pub camera_velocity: f32,
    /// Eased camera distance the scene is drawn from.
    pub rendered_distance: f32,
    /// Flow wave intensity, 0–1.
    pub flow_amount: f32,
    /// Explosion intensity, 0–1.
    pub scatter_amount: f32,
    /// Eased uniform scale, 1 at rest.
    pub scale_multiplier: f32,
}

impl Default for SimulationState {
    fn default() -> Self {
        SimulationState {
            camera_distance:   CAMERA_DEFAULT_Z,
            camera_velocity:   0.0,
            rendered_distance: CAMERA_DEFAULT_Z,
            flow_amount:       0.0,
            scatter_amount:    0.0,
            scale_multiplier:  1.0,
        }
    }
}

impl SimulationState {
    /// Advance one tick under `gesture`.
    pub fn advance(&mut self, gesture: GestureState) {
        self.step_camera(gesture);

        let open = gesture == GestureState::OpenPalm;

        let flow_target = if open { 1.0 } else { 0.0 };
        self.flow_amount = ease(self.flow_amount, flow_target, FLOW_SMOOTHING).clamp(0.0, 1.0);

        let near = self.rendered_distance < SCATTER_TRIGGER_DISTANCE;
        let scatter_target = if open && near { 1.0 } else { 0.0 };
        self.scatter_amount = ease(self.scatter_amount, scatter_target, SCATTER_SMOOTHING).clamp(0.0, 1.0);

        let scale_target = if gesture == GestureState::OkSign { OK_SCALE } else { 1.0 };
        self.scale_multiplier = ease(self.scale_multiplier, scale_target, SCALE_SMOOTHING);
    }

    fn step_camera(&mut self, gesture: GestureState) {
        match gesture {
            GestureState::Fist     => self.camera_velocity += PULL_ACCELERATION,
            GestureState::OpenPalm => self.camera_velocity -= PUSH_ACCELERATION,
            _ => {}
        }
        self.camera_velocity *= CAMERA_DAMPING;

        self.camera_distance -= self.camera_velocity;
        if self.camera_distance < CAMERA_MIN_Z || self.camera_distance > CAMERA_MAX_Z {
            self.camera_distance = self.camera_distance.clamp(CAMERA_MIN_Z, CAMERA_MAX_Z);
            self.camera_velocity = 0.0;
        }

        self.rendered_distance = ease(self.rendered_distance, self.camera_distance, CAMERA_SMOOTHING);
    }

    /// Uniform scale to draw with under `gesture`: the eased multiplier
    /// while the OK sign is held, otherwise exactly 1.
    pub fn applied_scale(&self, gesture: GestureState) -> f32 {
        if gesture == GestureState::OkSign { self.scale_multiplier } else { 1.0 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GestureState; 4] = [
        GestureState::None, GestureState::Fist, GestureState::OpenPalm, GestureState::OkSign,
    ];

    #[test]
    fn defaults_at_rest() {
        let s = SimulationState::default();
        assert_eq!(s.camera_distance, CAMERA_DEFAULT_Z);
        assert_eq!(s.camera_velocity, 0.0);
        assert_eq!(s.flow_amount, 0.0);
        assert_eq!(s.scatter_amount, 0.0);
        assert_eq!(s.scale_multiplier, 1.0);
    }

    #[test]
    fn fist_pulls_in_open_palm_pushes_out() {
        let mut s = SimulationState::default();
        s.advance(GestureState::Fist);
        assert!(s.camera_velocity > 0.0);
        assert!(s.camera_distance < CAMERA_DEFAULT_Z);

        let mut s = SimulationState::default();
        s.advance(GestureState::OpenPalm);
        assert!(s.camera_velocity < 0.0);
        assert!(s.camera_distance > CAMERA_DEFAULT_Z);
    }

    #[test]
    fn damping_applies_while_forcing() {
        let mut s = SimulationState::default();
        s.advance(GestureState::Fist);
        assert!((s.camera_velocity - PULL_ACCELERATION * CAMERA_DAMPING).abs() < 1e-7);
    }

    #[test]
    fn sustained_fist_reaches_min_z() {
        let mut s = SimulationState::default();
        let mut ticks = 0;
        while s.camera_distance > CAMERA_MIN_Z {
            s.advance(GestureState::Fist);
            ticks += 1;
            assert!(ticks < 300, "fist did not converge");
        }
        assert_eq!(s.camera_distance, CAMERA_MIN_Z);
        assert_eq!(s.camera_velocity, 0.0);
    }

    #[test]
    fn hitting_a_bound_zeroes_velocity() {
        let mut s = SimulationState { camera_distance: CAMERA_MAX_Z - 0.01, camera_velocity: -1.0, ..Default::default() };
        s.advance(GestureState::None);
        assert_eq!(s.camera_distance, CAMERA_MAX_Z);
        assert_eq!(s.camera_velocity, 0.0);
    }

    #[test]
    fn camera_stays_in_bounds_under_any_sequence() {
        let mut s = SimulationState::default();
        // Deterministic mixed sequence with long holds of each gesture.
        let mut x: u32 = 12345;
        for _ in 0..20_000 {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let g = ALL[((x >> 16) % 4) as usize];
            for _ in 0..(x >> 24) % 60 {
                s.advance(g);
                assert!((CAMERA_MIN_Z..=CAMERA_MAX_Z).contains(&s.camera_distance));
                assert!((0.0..=1.0).contains(&s.flow_amount));
                assert!((0.0..=1.0).contains(&s.scatter_amount));
            }
        }
    }

    #[test]
    fn rendered_camera_eases_behind_logical() {
        let mut s = SimulationState::default();
        for _ in 0..10 { s.advance(GestureState::Fist); }
        assert!(s.rendered_distance > s.camera_distance);
        assert!(s.rendered_distance < CAMERA_DEFAULT_Z);
    }

    #[test]
    fn flow_rises_slowly_under_open_palm() {
        let mut s = SimulationState::default();
        s.advance(GestureState::OpenPalm);
        assert!((s.flow_amount - FLOW_SMOOTHING).abs() < 1e-7);
        for _ in 0..600 { s.advance(GestureState::OpenPalm); }
        assert!(s.flow_amount > 0.99);
        s.advance(GestureState::Fist);
        assert!(s.flow_amount < 0.99);
    }

    #[test]
    fn scatter_needs_open_palm_and_near_camera() {
        // Far away: open palm alone does nothing.
        let mut s = SimulationState::default();
        s.advance(GestureState::OpenPalm);
        assert_eq!(s.scatter_amount, 0.0);

        // Near: open palm builds scatter.
        let mut s = SimulationState {
            camera_distance: CAMERA_MIN_Z,
            rendered_distance: CAMERA_MIN_Z,
            ..Default::default()
        };
        s.advance(GestureState::OpenPalm);
        assert!((s.scatter_amount - SCATTER_SMOOTHING).abs() < 1e-6);

        // Near without open palm: nothing.
        let mut s = SimulationState {
            camera_distance: CAMERA_MIN_Z,
            rendered_distance: CAMERA_MIN_Z,
            ..Default::default()
        };
        s.advance(GestureState::Fist);
        assert_eq!(s.scatter_amount, 0.0);
    }

    #[test]
    fn scatter_faster_than_flow() {
        assert!(SCATTER_SMOOTHING > FLOW_SMOOTHING);
        assert!(PUSH_ACCELERATION < PULL_ACCELERATION);
    }

    #[test]
    fn scale_snaps_to_one_but_multiplier_decays() {
        let mut s = SimulationState::default();
        for _ in 0..50 { s.advance(GestureState::OkSign); }
        assert!(s.applied_scale(GestureState::OkSign) > 1.5);

        s.advance(GestureState::None);
        assert_eq!(s.applied_scale(GestureState::None), 1.0);
        assert!(s.scale_multiplier > 1.5, "multiplier decays gradually");
    }

    #[test]
    fn no_hand_decays_everything() {
        let mut s = SimulationState {
            camera_velocity: 0.5,
            flow_amount: 0.6,
            scatter_amount: 0.4,
            ..Default::default()
        };
        s.advance(GestureState::None);
        assert!(s.camera_velocity.abs() < 0.5);
        assert!(s.flow_amount < 0.6);
        assert!(s.scatter_amount < 0.4);
        assert_eq!(s.scale_multiplier, 1.0);
    }
}
