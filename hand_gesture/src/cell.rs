//! The single shared slot between the classifier and the render loop.
//!
//! The pose thread publishes one [`GestureReading`] per detection cycle; the
//! render loop reads whatever was published last at the start of each tick.
//! Intermediate readings may be skipped and the same reading may be read
//! many times; nothing is queued.
//!
//! A reading packs into one `u64` (gesture code, presence bit, proximity
//! bits) so a single atomic store/load always exchanges a consistent pair.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::classify::{GestureReading, GestureState};

const PROXIMITY_PRESENT: u64 = 1 << 8;

fn pack(reading: GestureReading) -> u64 {
    let code = reading.gesture as u8 as u64;
    match reading.proximity {
        Some(p) => code | PROXIMITY_PRESENT | ((p.to_bits() as u64) << 32),
        None    => code,
    }
}

fn unpack(word: u64) -> GestureReading {
    let gesture = GestureState::from_code((word & 0xFF) as u8);
    let proximity = if word & PROXIMITY_PRESENT != 0 {
        Some(f32::from_bits((word >> 32) as u32))
    } else {
        None
    };
    GestureReading { gesture, proximity }
}

/// Latest-wins gesture slot.  Starts out as `None` with no proximity.
///
/// Share it between threads with an `Arc`.
#[derive(Debug)]
pub struct GestureCell {
    word: AtomicU64,
}

impl GestureCell {
    pub fn new() -> Self {
        GestureCell { word: AtomicU64::new(pack(GestureReading::default())) }
    }

    /// Producer side: replace the current reading.
    pub fn publish(&self, reading: GestureReading) {
        self.word.store(pack(reading), Ordering::Release);
    }

    /// Consumer side: the most recent reading.
    pub fn latest(&self) -> GestureReading {
        unpack(self.word.load(Ordering::Acquire))
    }

    /// Shorthand for `latest().gesture`.
    pub fn gesture(&self) -> GestureState {
        self.latest().gesture
    }
}

impl Default for GestureCell {
    fn default() -> Self {
        Self::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
