//! Top-level application state machine.
//!
//! `AppState` owns the [`Swarm`], reads the latest gesture from the shared
//! [`GestureCell`] once per frame and installs rebuilt particle fields
//! between ticks.  Field rebuilds run on worker threads and come back over a
//! channel, so a texture change never stalls the frame loop.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use hand_gesture::{GestureCell, GestureReading, GestureState};
use particle_field::{FieldBuilder, ParticleField, Texture};
use swarm_physics::Swarm;

use crate::error::AppError;
use crate::pose::spawn_pose_source;
#[cfg(not(feature = "leap"))]
use crate::pose::SimPoseSource;
#[cfg(feature = "leap")]
use crate::pose::LeapPoseSource;
use crate::visualizer::{UiCommand, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Largest palette the texture keys can ask for.
pub const MAX_TEXTURES: usize = 9;

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Palette textures to load after startup; 0 keeps the placeholder.
    pub texture_count: usize,
    /// Seed for jitter and group assignment.  `None` seeds from entropy.
    pub seed:          Option<u64>,
    pub builder:       FieldBuilder,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            texture_count: 3,
            seed:          None,
            builder:       FieldBuilder::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

/// A finished rebuild, tagged with the request it answers.
struct Rebuilt {
    generation: u64,
    field:      ParticleField,
}

pub struct AppState {
    // ── physics ───────────────────────────────────────────────────────────
    swarm:        Swarm,
    cell:         Arc<GestureCell>,
    reading:      GestureReading,

    // ── field rebuilds ────────────────────────────────────────────────────
    builder:      FieldBuilder,
    textures:     Vec<Texture>,
    rng:          ChaCha8Rng,
    rebuild_tx:   Sender<Rebuilt>,
    rebuild_rx:   Receiver<Rebuilt>,
    generation:   u64,

    // ── status message ────────────────────────────────────────────────────
    pub status:   String,
}

impl AppState {
    /// Build the placeholder field synchronously, then queue the configured
    /// palette as the first rebuild.
    pub fn new(cfg: AppConfig, cell: Arc<GestureCell>) -> Self {
        let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        info!(seed, "particle rng seeded");

        let started = Instant::now();
        let field = cfg.builder.build(&[], &mut rng);
        info!(particles = field.len(), elapsed = ?started.elapsed(), "initial field built");

        let (rebuild_tx, rebuild_rx) = mpsc::channel();
        let mut app = AppState {
            swarm:      Swarm::new(field),
            cell,
            reading:    GestureReading::default(),
            builder:    cfg.builder,
            textures:   Vec::new(),
            rng,
            rebuild_tx,
            rebuild_rx,
            generation: 0,
            status:     "Ready".to_string(),
        };
        if cfg.texture_count > 0 {
            app.request_textures(cfg.texture_count);
        }
        app
    }

    // ── field rebuilds ───────────────────────────────────────────────────

    /// Rebuild with `n` palette textures (0 = placeholder) on a worker thread.
    pub fn request_textures(&mut self, n: usize) {
        self.textures = Texture::palette(n.min(MAX_TEXTURES));
        self.spawn_rebuild();
        self.status = format!("Loading {} textures…", self.textures.len());
    }

    /// Rebuild with the current textures: fresh jitter and groups.
    pub fn reroll(&mut self) {
        self.spawn_rebuild();
        self.status = "Rerolling…".to_string();
    }

    fn spawn_rebuild(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let seed: u64 = self.rng.gen();
        let builder = self.builder.clone();
        let textures = self.textures.clone();
        let tx = self.rebuild_tx.clone();
        debug!(generation, textures = textures.len(), "rebuild requested");
        thread::spawn(move || {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let field = builder.build(&textures, &mut rng);
            // The app may have shut down; nothing to deliver to.
            let _ = tx.send(Rebuilt { generation, field });
        });
    }

    /// Install the newest finished rebuild, if any.  Results for
    /// superseded requests are discarded.
    fn install_finished(&mut self) {
        let mut newest = None;
        loop {
            match self.rebuild_rx.try_recv() {
                Ok(r) if r.generation == self.generation => newest = Some(r),
                Ok(r) => debug!(generation = r.generation, "stale rebuild dropped"),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        if let Some(r) = newest {
            self.swarm.install(r.field);
            self.status = format!(
                "{} particles in {} batches",
                self.swarm.particles().len(),
                self.swarm.batches().len(),
            );
        }
    }

    // ── per-frame logic ──────────────────────────────────────────────────

    /// One frame: pick up rebuilds, read the gesture, advance the physics.
    pub fn tick(&mut self, dt: f32) {
        self.install_finished();

        let reading = self.cell.latest();
        if reading.gesture != self.reading.gesture {
            info!(from = self.reading.gesture.name(), to = reading.gesture.name(), "gesture changed");
        }
        self.reading = reading;

        self.swarm.tick(reading.gesture, dt);
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn swarm(&self)     -> &Swarm          { &self.swarm }
    pub fn reading(&self)   -> GestureReading  { self.reading }
    pub fn gesture(&self)   -> GestureState    { self.reading.gesture }

    /// Called once the renderer has drawn the current transforms.
    pub fn frame_presented(&mut self) {
        self.swarm.mark_uploaded();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the pose source (simulation by default, hardware with `--features leap`),
/// and drives the physics/render loop at ~60 fps.  Returning drops the last
/// handles on the gesture cell and the sim channel, which stops the pose
/// thread.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let cell = Arc::new(GestureCell::new());

    // ── Pose source ───────────────────────────────────────────────────────
    let (sim_tx, _sim_rx) = mpsc::channel();
    #[cfg(not(feature = "leap"))]
    spawn_pose_source(SimPoseSource::new(_sim_rx), Arc::clone(&cell));
    #[cfg(feature = "leap")]
    {
        drop(_sim_rx);
        spawn_pose_source(LeapPoseSource, Arc::clone(&cell));
    }

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg, cell);

    // ── Main loop ─────────────────────────────────────────────────────────
    let mut last = Instant::now();
    while vis.is_open() {
        // 1. Window input
        for cmd in vis.poll_input() {
            match cmd {
                UiCommand::Quit           => return Ok(()),
                UiCommand::SetTextures(n) => app.request_textures(n),
                UiCommand::Reroll         => app.reroll(),
            }
        }

        // 2. Physics
        let now = Instant::now();
        app.tick(now.duration_since(last).as_secs_f32());
        last = now;

        // 3. Render
        vis.render(app.swarm(), app.reading(), &app.status);
        app.frame_presented();
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
