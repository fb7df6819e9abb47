//! Particle field construction.
//!
//! The silhouette is sampled on a fixed stride; every bright sample becomes
//! one particle.  Particles are spread over the texture groups uniformly at
//! random, and each takes the next free instance slot of its group.

use rand::Rng;
use tracing::{debug, warn};

use crate::raster::{render_text, Bitmap, RasterError};
use crate::texture::Texture;

// ════════════════════════════════════════════════════════════════════════════
// Silhouette constants
// ════════════════════════════════════════════════════════════════════════════

/// Text the swarm spells out.
pub const TARGET_TEXT: &str = "I LOVE YOU";
/// Pixels per font dot.
pub const FONT_DOT_PX: usize = 24;
pub const BITMAP_W: usize = 1024;
pub const BITMAP_H: usize = 256;
/// Sampling step in both axes, in pixels.
pub const SAMPLE_STRIDE: usize = 4;
/// Samples brighter than this become particles (~50% of full scale).
pub const BRIGHTNESS_THRESHOLD: u8 = 127;
/// World units per bitmap pixel.
pub const PARTICLE_SIZE: f32 = 0.05;
/// Jitter vector components are drawn from `[-JITTER_RANGE, JITTER_RANGE]`.
pub const JITTER_RANGE: f32 = 0.25;

// ════════════════════════════════════════════════════════════════════════════
// Particle / ParticleField
// ════════════════════════════════════════════════════════════════════════════

/// One particle.  Nothing here changes after the field is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Rest position in world units.
    pub base:   [f32; 3],
    /// Random direction used for idle drift and for scattering.
    pub jitter: [f32; 3],
    /// Render group (index into [`ParticleField::groups`]).
    pub group:  usize,
    /// Instance slot inside the group.
    pub slot:   usize,
}

/// A texture and how many instance slots it needs.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderGroup {
    pub texture: Texture,
    pub count:   usize,
}

/// Every particle plus the non-empty render groups they belong to.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub groups:    Vec<RenderGroup>,
}

impl ParticleField {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FieldBuilder
// ════════════════════════════════════════════════════════════════════════════

/// Silhouette parameters.  [`Default`] uses the module constants.
#[derive(Clone, Debug)]
pub struct FieldBuilder {
    pub text:          String,
    pub dot_px:        usize,
    pub width:         usize,
    pub height:        usize,
    pub stride:        usize,
    pub threshold:     u8,
    pub particle_size: f32,
    pub jitter_range:  f32,
}

impl Default for FieldBuilder {
    fn default() -> Self {
        FieldBuilder {
            text:          TARGET_TEXT.to_string(),
            dot_px:        FONT_DOT_PX,
            width:         BITMAP_W,
            height:        BITMAP_H,
            stride:        SAMPLE_STRIDE,
            threshold:     BRIGHTNESS_THRESHOLD,
            particle_size: PARTICLE_SIZE,
            jitter_range:  JITTER_RANGE,
        }
    }
}

impl FieldBuilder {
    pub fn silhouette(&self) -> Result<Bitmap, RasterError> {
        render_text(&self.text, self.dot_px, self.width, self.height)
    }

    /// World-space seed positions, row by row from the top.
    ///
    /// A silhouette that cannot be drawn yields no seeds.
    pub fn seeds(&self) -> Vec<[f32; 3]> {
        let bmp = match self.silhouette() {
            Ok(b)  => b,
            Err(e) => {
                warn!("silhouette unavailable, building an empty field: {}", e);
                return Vec::new();
            }
        };

        let cx = bmp.width() as f32 / 2.0;
        let cy = bmp.height() as f32 / 2.0;
        let step = self.stride.max(1);

        let mut out = Vec::new();
        for y in (0..bmp.height()).step_by(step) {
            for x in (0..bmp.width()).step_by(step) {
                if bmp.get(x, y) > self.threshold {
                    out.push([
                        (x as f32 - cx) * self.particle_size,
                        -(y as f32 - cy) * self.particle_size,
                        0.0,
                    ]);
                }
            }
        }
        out
    }

    /// Build a fresh field over `textures`.
    ///
    /// No textures means one placeholder group.  Groups nobody landed in are
    /// dropped and the rest renumbered, so `Particle::group` always indexes
    /// `ParticleField::groups`.
    pub fn build<R: Rng + ?Sized>(&self, textures: &[Texture], rng: &mut R) -> ParticleField {
        let textures: Vec<Texture> = if textures.is_empty() {
            vec![Texture::placeholder()]
        } else {
            textures.to_vec()
        };

        let j = self.jitter_range;
        let mut counts = vec![0usize; textures.len()];
        let mut particles: Vec<Particle> = self
            .seeds()
            .into_iter()
            .map(|base| {
                let jitter = [rng.gen_range(-j..=j), rng.gen_range(-j..=j), rng.gen_range(-j..=j)];
                let group = rng.gen_range(0..textures.len());
                let slot = counts[group];
                counts[group] += 1;
                Particle { base, jitter, group, slot }
            })
            .collect();

        let mut remap = vec![usize::MAX; textures.len()];
        let mut groups = Vec::new();
        for (i, (texture, &count)) in textures.into_iter().zip(&counts).enumerate() {
            if count > 0 {
                remap[i] = groups.len();
                groups.push(RenderGroup { texture, count });
            }
        }
        for p in &mut particles {
            p.group = remap[p.group];
        }

        debug!(particles = particles.len(), groups = groups.len(), "particle field built");
        ParticleField { particles, groups }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
