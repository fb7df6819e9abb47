//! Render batches: one per texture, a dense slot-indexed transform array
//! each, plus a dirty flag the renderer clears after uploading.

use particle_field::{ParticleField, Texture};
use tracing::warn;

/// Per-instance transform handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: [f32; 3],
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: [f32; 3],
    /// Uniform scale.
    pub scale:    f32,
}

impl InstanceTransform {
    pub const IDENTITY: InstanceTransform = InstanceTransform {
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale:    1.0,
    };
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Debug)]
pub struct RenderBatch {
    texture:    Texture,
    transforms: Vec<InstanceTransform>,
    dirty:      bool,
}

impl RenderBatch {
    pub fn new(texture: Texture, capacity: usize) -> Self {
        RenderBatch {
            texture,
            transforms: vec![InstanceTransform::IDENTITY; capacity],
            dirty: true,
        }
    }

    pub fn texture(&self)    -> &Texture               { &self.texture }
    pub fn capacity(&self)   -> usize                  { self.transforms.len() }
    pub fn transforms(&self) -> &[InstanceTransform]   { &self.transforms }
    pub fn is_dirty(&self)   -> bool                   { self.dirty }

    /// Overwrite one slot and flag the batch for upload.
    pub fn write(&mut self, slot: usize, transform: InstanceTransform) {
        self.transforms[slot] = transform;
        self.dirty = true;
    }

    /// Called by the renderer once the transforms are on the GPU.
    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }
}

/// A particle field together with the batches it renders into.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub(crate) field:   ParticleField,
    pub(crate) batches: Vec<RenderBatch>,
}

impl Scene {
    /// Allocate one batch per group, sized to the group's count.
    ///
    /// Particles whose `(group, slot)` has no batch slot are dropped, so a
    /// tick can write every remaining particle unchecked.
    pub fn new(mut field: ParticleField) -> Self {
        let batches: Vec<RenderBatch> = field.groups
            .iter()
            .map(|g| RenderBatch::new(g.texture.clone(), g.count))
            .collect();

        let before = field.particles.len();
        field.particles.retain(|p| batches.get(p.group).map_or(false, |b| p.slot < b.capacity()));
        let dropped = before - field.particles.len();
        if dropped > 0 {
            warn!(dropped, kept = field.particles.len(), "particles without a batch slot dropped");
        }

        Scene { field, batches }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn batches(&self) -> &[RenderBatch] {
        &self.batches
    }
}
