//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │            particle swarm (perspective projection)           │
//! │                                                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  status bar                                                  │
//! │  key legend                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every batch is redrawn each frame from its transform array; batches are
//! marked uploaded afterwards by the caller.

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use hand_gesture::GestureReading;
use particle_field::font::{glyph, ADVANCE, GLYPH_W};
use particle_field::{PARTICLE_SIZE, SAMPLE_STRIDE};
use swarm_physics::{Camera, InstanceTransform, Swarm};

use crate::error::AppError;
use crate::pose::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:       usize = 960;
pub const WIN_H:       usize = 540;
const STATUS_H:        usize = 32;
const STATUS_Y:        usize = WIN_H - STATUS_H;
const BG_COLOR:        u32   = 0xFF0B0B14;
const TEXT_BG:         u32   = 0xFF0F3460;

/// Vertical field of view, radians.
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;
/// Anything closer to the eye than this is not drawn.
pub const NEAR_PLANE: f32 = 0.1;
/// Edge length of one particle card in world units.
pub const CARD_SIZE: f32 = PARTICLE_SIZE * SAMPLE_STRIDE as f32 * 0.8;
/// Distance over which cards fade into the background.
const FOG_DEPTH: f32 = 120.0;

/// Pose keys forwarded to the simulator while held.
const POSE_KEYS: [(Key, SimKey); 4] = [
    (Key::F, SimKey::Fist),
    (Key::P, SimKey::OpenPalm),
    (Key::K, SimKey::OkSign),
    (Key::V, SimKey::Peace),
];

const TEXTURE_KEYS: [(Key, usize); 10] = [
    (Key::Key0, 0), (Key::Key1, 1), (Key::Key2, 2), (Key::Key3, 3), (Key::Key4, 4),
    (Key::Key5, 5), (Key::Key6, 6), (Key::Key7, 7), (Key::Key8, 8), (Key::Key9, 9),
];

/// Requests from the window that the app loop handles itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    /// Rebuild the field with this many palette textures (0 = placeholder).
    SetTextures(usize),
    /// Rebuild with the current textures, rerolling jitter and groups.
    Reroll,
}

// ════════════════════════════════════════════════════════════════════════════
// Projection
// ════════════════════════════════════════════════════════════════════════════

/// Focal length in pixels for the window height and [`FOV_Y`].
pub fn focal_px() -> f32 {
    (WIN_H - STATUS_H) as f32 / 2.0 / (FOV_Y / 2.0).tan()
}

/// Project a world point seen from `camera` (looking down −z at its target).
///
/// Returns screen x, screen y and view depth, or `None` behind the near plane.
pub fn project(camera: &Camera, p: [f32; 3]) -> Option<(f32, f32, f32)> {
    let depth = camera.position[2] - p[2];
    if depth <= NEAR_PLANE {
        return None;
    }
    let f = focal_px();
    let cx = WIN_W as f32 / 2.0;
    let cy = (WIN_H - STATUS_H) as f32 / 2.0;
    let sx = cx + f * (p[0] - camera.position[0]) / depth;
    let sy = cy - f * (p[1] - camera.position[1]) / depth;
    Some((sx, sy, depth))
}

/// On-screen card extent in pixels: the card foreshortens as it tips
/// around x and y.
fn card_extent(t: &InstanceTransform, depth: f32) -> (f32, f32) {
    let edge = CARD_SIZE * t.scale * focal_px() / depth;
    let w = edge * t.rotation[1].cos().abs();
    let h = edge * t.rotation[0].cos().abs();
    (w.max(1.0), h.max(1.0))
}

/// Pixel rectangle `(x, y, w, h)` of a card centred at (`sx`, `sy`), clipped
/// to the particle view above the status bar.  `None` when nothing is left.
fn clip_card(sx: f32, sy: f32, w: f32, h: f32) -> Option<(usize, usize, usize, usize)> {
    let left   = (sx - w / 2.0).max(0.0);
    let top    = (sy - h / 2.0).max(0.0);
    let right  = (sx + w / 2.0).min(WIN_W as f32);
    let bottom = (sy + h / 2.0).min(STATUS_Y as f32);
    if right <= left || bottom <= top {
        return None;
    }
    Some((
        left as usize,
        top as usize,
        (right - left).ceil() as usize,
        (bottom - top).ceil() as usize,
    ))
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:   Window,
    buf:      Vec<u32>,
    sim_tx:   Sender<SimInput>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Particle Swarm — I LOVE YOU",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll the keyboard.  Pose keys go to the simulator; everything else
    /// comes back as [`UiCommand`]s.
    pub fn poll_input(&mut self) -> Vec<UiCommand> {
        let mut cmds = Vec::new();
        if !self.window.is_open() {
            cmds.push(UiCommand::Quit);
            return cmds;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            cmds.push(UiCommand::Quit);
        }
        if one_shot(Key::R) {
            cmds.push(UiCommand::Reroll);
        }
        for &(key, n) in &TEXTURE_KEYS {
            if one_shot(key) {
                cmds.push(UiCommand::SetTextures(n));
            }
        }

        for &(key, sim) in &POSE_KEYS {
            if one_shot(key) {
                let _ = self.sim_tx.send(SimInput::KeyDown(sim));
            }
            if self.window.is_key_released(key) {
                let _ = self.sim_tx.send(SimInput::KeyUp(sim));
            }
        }
        if held(Key::Up) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Nearer));
        }
        if held(Key::Down) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Farther));
        }

        cmds
    }

    /// Render one frame.
    pub fn render(&mut self, swarm: &Swarm, reading: GestureReading, status: &str) {
        // Clear
        self.buf.fill(BG_COLOR);

        // ── Particles ─────────────────────────────────────────────────────
        let camera = swarm.camera();
        for batch in swarm.batches() {
            let tint = batch.texture().tint;
            for t in batch.transforms() {
                self.draw_card(&camera, t, tint);
            }
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, STATUS_H, TEXT_BG);
        let hand = match reading.proximity {
            Some(p) => format!("{}  NEAR={:.2}", reading.gesture.name(), p),
            None    => reading.gesture.name().to_string(),
        };
        self.draw_label(&hand, 10, STATUS_Y + 6, 0xFFFFD700);
        self.draw_label(status, 200, STATUS_Y + 6, 0xFFEEEEEE);

        // ── Key legend ────────────────────────────────────────────────────
        #[cfg(not(feature = "leap"))]
        const LEGEND: &str = "HOLD F=FIST P=PALM K=OK V=PEACE  UP/DOWN=NEAR/FAR  0-9=TEXTURES  R=REROLL  Q=QUIT";
        #[cfg(feature = "leap")]
        const LEGEND: &str = "0-9=TEXTURES  R=REROLL  Q=QUIT";
        self.draw_label(LEGEND, 10, WIN_H - 10, 0xFF888888);

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    fn draw_card(&mut self, camera: &Camera, t: &InstanceTransform, tint: u32) {
        let Some((sx, sy, depth)) = project(camera, t.position) else { return };
        let (w, h) = card_extent(t, depth);
        let Some((x, y, w, h)) = clip_card(sx, sy, w, h) else { return };
        let color = blend(tint, BG_COLOR, depth / FOG_DEPTH);
        self.fill_rect(x, y, w, h.min(STATUS_Y - y), color);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// Draw `text` in the 3×5 dot font.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            for (row, &bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += ADVANCE;
            if cx + ADVANCE > WIN_W { break; }
        }
    }
}

/// Mix `near` toward `far` by `t` (clamped to 0–1), channel by channel.
fn blend(near: u32, far: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    [16u32, 8, 0].iter().fold(0xFF00_0000, |acc, &shift| {
        let a = ((near >> shift) & 0xFF) as f32;
        let b = ((far >> shift) & 0xFF) as f32;
        acc | ((a + (b - a) * t) as u32) << shift
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(z: f32) -> Camera {
        Camera { position: [0.0, 0.0, z], target: [0.0; 3] }
    }

    #[test]
    fn origin_projects_to_view_centre() {
        let (sx, sy, depth) = project(&camera_at(40.0), [0.0; 3]).unwrap();
        assert_eq!(sx, WIN_W as f32 / 2.0);
        assert_eq!(sy, (WIN_H - STATUS_H) as f32 / 2.0);
        assert_eq!(depth, 40.0);
    }

    #[test]
    fn points_behind_the_eye_are_culled() {
        assert!(project(&camera_at(5.0), [0.0, 0.0, 5.0]).is_none());
        assert!(project(&camera_at(5.0), [0.0, 0.0, 9.0]).is_none());
    }

    #[test]
    fn up_is_up_on_screen() {
        let cam = camera_at(40.0);
        let (_, centre, _) = project(&cam, [0.0, 0.0, 0.0]).unwrap();
        let (_, above, _)  = project(&cam, [0.0, 1.0, 0.0]).unwrap();
        assert!(above < centre);
    }

    #[test]
    fn closer_cards_draw_larger() {
        let t = InstanceTransform::IDENTITY;
        let (far, _)  = card_extent(&t, 80.0);
        let (near, _) = card_extent(&t, 5.0);
        assert!(near > far);
    }

    #[test]
    fn card_edge_on_shrinks_to_a_sliver() {
        let t = InstanceTransform { rotation: [0.0, std::f32::consts::FRAC_PI_2, 0.0], ..InstanceTransform::IDENTITY };
        let (w, h) = card_extent(&t, 5.0);
        assert_eq!(w, 1.0);
        assert!(h > 1.0);
    }

    #[test]
    fn cards_on_the_edge_lose_their_clipped_part() {
        // Centred on the top-left corner: only the inner quarter remains.
        assert_eq!(clip_card(0.0, 0.0, 10.0, 10.0), Some((0, 0, 5, 5)));
        // Straddling the left edge by 4 px.
        assert_eq!(clip_card(1.0, 100.0, 10.0, 10.0), Some((0, 95, 6, 10)));
        // Straddling the status bar.
        let (_, y, _, h) = clip_card(100.0, STATUS_Y as f32, 10.0, 10.0).unwrap();
        assert_eq!(y + h, STATUS_Y);
        // Fully off screen.
        assert_eq!(clip_card(-20.0, 100.0, 10.0, 10.0), None);
        assert_eq!(clip_card(100.0, STATUS_Y as f32 + 20.0, 10.0, 10.0), None);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFFFF0000, 0xFF0000FF, 0.0), 0xFFFF0000);
        assert_eq!(blend(0xFFFF0000, 0xFF0000FF, 1.0), 0xFF0000FF);
        assert_eq!(blend(0xFFFF0000, 0xFF0000FF, 7.0), 0xFF0000FF);
    }
}
