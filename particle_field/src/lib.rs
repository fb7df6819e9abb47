//! # particle_field
//!
//! Turns a line of text into a cloud of particles.
//!
//! The text is rasterized with a tiny bitmap font onto an off-screen
//! bitmap, sampled on a fixed grid, and every bright sample becomes a
//! particle with a random jitter vector.  Particles are then dealt out
//! across the caller's textures; each lands in one render group and keeps
//! the same instance slot for as long as the field exists.
//!
//! ## Quick start
//!
//! ```rust
//! use particle_field::{FieldBuilder, Texture};
//!
//! let field = FieldBuilder::default().build(&Texture::palette(3), &mut rand::thread_rng());
//! assert_eq!(field.groups.len(), 3);
//! assert_eq!(field.groups.iter().map(|g| g.count).sum::<usize>(), field.len());
//! ```

pub mod font;
pub mod raster;
pub mod texture;
pub mod field;

pub use field::{
    FieldBuilder, Particle, ParticleField, RenderGroup,
    BITMAP_H, BITMAP_W, BRIGHTNESS_THRESHOLD, FONT_DOT_PX, JITTER_RANGE, PARTICLE_SIZE,
    SAMPLE_STRIDE, TARGET_TEXT,
};
pub use raster::{Bitmap, RasterError};
pub use texture::Texture;
