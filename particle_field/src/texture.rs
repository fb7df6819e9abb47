//! Texture handles.
//!
//! Image decoding happens elsewhere; here a texture is only a name plus the
//! ARGB tint the software renderer uses to draw its particles.

/// An opaque texture handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    pub name: String,
    /// Packed 0xAARRGGBB.
    pub tint: u32,
}

impl Texture {
    pub fn new(name: &str, tint: u32) -> Self {
        Texture { name: name.to_string(), tint }
    }

    /// Substituted when the caller supplies no textures at all.
    pub fn placeholder() -> Self {
        Texture::new("placeholder", 0xFFFFFFFF)
    }

    /// `n` textures with evenly spaced hues.
    pub fn palette(n: usize) -> Vec<Texture> {
        (0..n)
            .map(|i| {
                let hue = (i as f32 / n.max(1) as f32) * 360.0;
                Texture::new(&format!("tint-{}", i), hsv_to_argb(hue, 0.65, 0.95))
            })
            .collect()
    }
}

/// Opaque `0xAARRGGBB` for hue `h` in degrees, saturation and value in 0–1.
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let sector = h.rem_euclid(360.0) / 60.0;
    let chroma = v * s;
    let mid = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, mid, 0.0),
        1 => (mid, chroma, 0.0),
        2 => (0.0, chroma, mid),
        3 => (0.0, mid, chroma),
        4 => (mid, 0.0, chroma),
        _ => (chroma, 0.0, mid),
    };
    let floor = v - chroma;
    let channel = |c: f32| ((c + floor) * 255.0).round().clamp(0.0, 255.0) as u32;
    0xFF00_0000 | channel(r) << 16 | channel(g) << 8 | channel(b)
}
