//! Pose sources: LeapMotion hardware and keyboard simulation.
//!
//! A source runs on its own thread and hands every detection cycle's hands
//! to a [`PoseSink`], which classifies the first hand and publishes the
//! reading into the shared [`GestureCell`].  The render loop never waits on
//! a source; it just reads the cell.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use hand_gesture::synthetic::{self, Pose};
use hand_gesture::{read_hands, GestureCell, GestureReading, Landmark};

// ════════════════════════════════════════════════════════════════════════════
// PoseSink
// ════════════════════════════════════════════════════════════════════════════

/// Producer end of the gesture cell.
#[derive(Clone, Debug)]
pub struct PoseSink {
    cell: Arc<GestureCell>,
}

impl PoseSink {
    pub fn new(cell: Arc<GestureCell>) -> Self {
        PoseSink { cell }
    }

    /// Classify one detection result (zero or more hands) and publish it.
    pub fn deliver(&self, hands: &[Vec<Landmark>]) -> GestureReading {
        let reading = read_hands(hands);
        self.cell.publish(reading);
        reading
    }

    /// True once every other holder of the cell has dropped it.
    pub fn is_closed(&self) -> bool {
        Arc::strong_count(&self.cell) == 1
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PoseSource trait: unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver hand detections to a [`PoseSink`].
pub trait PoseSource: Send + 'static {
    fn run(self: Box<Self>, sink: PoseSink);
}

/// Spawn a pose source on its own thread, publishing into `cell`.
pub fn spawn_pose_source<P: PoseSource>(source: P, cell: Arc<GestureCell>) -> JoinHandle<()> {
    let sink = PoseSink::new(cell);
    thread::spawn(move || Box::new(source).run(sink))
}

// ════════════════════════════════════════════════════════════════════════════
// LeapPoseSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Pose source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Leap reports bones rather than image landmarks.  Each digit's four bone
/// end points become its four landmarks and the middle metacarpal's base
/// stands in for the wrist; see [`leap_hand`] for the projection.
#[cfg(feature = "leap")]
pub struct LeapPoseSource;

#[cfg(feature = "leap")]
impl PoseSource for LeapPoseSource {
    fn run(self: Box<Self>, sink: PoseSink) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                tracing::error!("failed to create LeapC connection: {:?}", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            tracing::error!("failed to open LeapMotion device: {:?}", e);
            return;
        }

        while !sink.is_closed() {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<Vec<Landmark>> = frame.hands()
                    .take(1)
                    .map(|h| leap_landmarks(&h))
                    .collect();
                sink.deliver(&hands);
            }
        }
    }
}

#[cfg(feature = "leap")]
fn leap_landmarks(hand: &leaprs::Hand) -> Vec<Landmark> {
    let mm = |v: leaprs::LeapVector| [v.x, v.y, v.z];

    let digits: Vec<_> = hand.digits().collect();
    if digits.len() < 5 {
        return Vec::new();
    }

    let mut joints = [[[0.0f32; 3]; 4]; 5];
    for (out, digit) in joints.iter_mut().zip(&digits) {
        *out = [
            mm(digit.metacarpal().next_joint()),
            mm(digit.proximal().next_joint()),
            mm(digit.intermediate().next_joint()),
            mm(digit.distal().next_joint()),
        ];
    }
    leap_hand(mm(digits[2].metacarpal().prev_joint()), &joints)
}

/// Millimetres of Leap space per normalized image unit.
pub const LEAP_MM_PER_UNIT: f32 = 400.0;

/// One Leap point (millimetres, y up from the device) as an image landmark.
///
/// The hand is viewed from above: Leap x and z span the image plane and
/// height becomes depth.  A palm held flat over the device points its
/// fingers along −z, so finger length stays in the plane the classifier
/// measures.
pub fn leap_to_landmark(mm: [f32; 3]) -> Landmark {
    Landmark::new(
        0.5 + mm[0] / LEAP_MM_PER_UNIT,
        0.5 + mm[2] / LEAP_MM_PER_UNIT,
        -mm[1] / LEAP_MM_PER_UNIT,
    )
}

/// The 21-point layout from a wrist and five digits, thumb first, each as
/// its four joints from the knuckle out to the tip.
pub fn leap_hand(wrist: [f32; 3], digits: &[[[f32; 3]; 4]; 5]) -> Vec<Landmark> {
    std::iter::once(wrist)
        .chain(digits.iter().flatten().copied())
        .map(leap_to_landmark)
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseSource: keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// How often the simulator reports a detection when no key changes.
pub const SIM_DETECTION_INTERVAL: Duration = Duration::from_millis(33);

/// Palm-size change per nearer/farther key press.
pub const SIM_PALM_STEP: f32 = 0.02;

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
    KeyUp(SimKey),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Fist,       // F
    OpenPalm,   // P
    OkSign,     // K
    Peace,      // V
    Nearer,     // Up
    Farther,    // Down
}

impl SimKey {
    fn pose(self) -> Option<Pose> {
        match self {
            SimKey::Fist     => Some(Pose::Fist),
            SimKey::OpenPalm => Some(Pose::OpenPalm),
            SimKey::OkSign   => Some(Pose::OkSign),
            SimKey::Peace    => Some(Pose::Peace),
            SimKey::Nearer | SimKey::Farther => None,
        }
    }
}

/// Keyboard-driven hand simulator.
///
/// While a pose key is held the simulator "sees" a synthetic hand in that
/// pose; with no key held it sees no hand.  Detections are reported on every
/// input and otherwise every [`SIM_DETECTION_INTERVAL`], like a camera
/// pipeline running at its own rate.
pub struct SimPoseSource {
    rx:        Receiver<SimInput>,
    held:      Option<Pose>,
    palm_size: f32,
}

impl SimPoseSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimPoseSource { rx, held: None, palm_size: 0.3 }
    }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::KeyDown(SimKey::Nearer)  => self.palm_size += SIM_PALM_STEP,
            SimInput::KeyDown(SimKey::Farther) => self.palm_size -= SIM_PALM_STEP,
            SimInput::KeyDown(key) => self.held = key.pose(),
            SimInput::KeyUp(key) => {
                if key.pose().is_some() && key.pose() == self.held {
                    self.held = None;
                }
            }
        }
        self.palm_size = self.palm_size.clamp(synthetic::PALM_SIZE_RANGE.0, synthetic::PALM_SIZE_RANGE.1);
    }

    fn current_hands(&self) -> Vec<Vec<Landmark>> {
        match self.held {
            Some(p) => vec![synthetic::pose(p, self.palm_size).points().to_vec()],
            None    => Vec::new(),
        }
    }
}

impl PoseSource for SimPoseSource {
    fn run(mut self: Box<Self>, sink: PoseSink) {
        loop {
            match self.rx.recv_timeout(SIM_DETECTION_INTERVAL) {
                Ok(input) => {
                    self.apply(input);
                    let r = sink.deliver(&self.current_hands());
                    debug!(?input, gesture = r.gesture.name(), "sim detection");
                }
                Err(RecvTimeoutError::Timeout) => {
                    sink.deliver(&self.current_hands());
                }
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::GestureState;
    use std::sync::mpsc;
    use std::time::Instant;

    fn wait_for(cell: &GestureCell, want: GestureState) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if cell.gesture() == want { return true; }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    const LEAP_WRIST: [f32; 3] = [0.0, 200.0, 60.0];
    const LEAP_THUMB: [[f32; 3]; 4] = [
        [-35.0, 200.0, 45.0], [-55.0, 200.0, 25.0], [-70.0, 200.0, 8.0], [-82.0, 200.0, -5.0],
    ];
    const FINGER_X: [f32; 4] = [-30.0, -10.0, 10.0, 30.0];

    /// Palm flat over the device, fingers pointing away along −z.
    fn leap_palm_down(curled: bool) -> Vec<Landmark> {
        let mut digits = [LEAP_THUMB; 5];
        for (d, x) in digits[1..].iter_mut().zip(FINGER_X) {
            *d = if curled {
                [[x, 200.0, 0.0], [x, 185.0, -35.0], [x, 160.0, -25.0], [x, 165.0, -5.0]]
            } else {
                [[x, 200.0, 0.0], [x, 200.0, -40.0], [x, 200.0, -65.0], [x, 200.0, -85.0]]
            };
        }
        leap_hand(LEAP_WRIST, &digits)
    }

    #[test]
    fn leap_hand_has_full_layout() {
        let hand = leap_palm_down(false);
        assert_eq!(hand.len(), hand_gesture::LANDMARK_COUNT);
        assert_eq!(hand[0], leap_to_landmark(LEAP_WRIST));
    }

    #[test]
    fn leap_keeps_finger_length_in_the_image_plane() {
        let wrist = leap_to_landmark([0.0, 200.0, 60.0]);
        let tip   = leap_to_landmark([0.0, 200.0, -85.0]);
        assert!((wrist.planar_distance(&tip) - 145.0 / LEAP_MM_PER_UNIT).abs() < 1e-6);
        // Height only changes depth.
        let lifted = leap_to_landmark([0.0, 300.0, 60.0]);
        assert_eq!(wrist.planar_distance(&lifted), 0.0);
    }

    #[test]
    fn leap_palm_down_open_hand_reads_open_palm() {
        let reading = read_hands(&[leap_palm_down(false)]);
        assert_eq!(reading.gesture, GestureState::OpenPalm);
    }

    #[test]
    fn leap_palm_down_curled_hand_reads_fist() {
        let reading = read_hands(&[leap_palm_down(true)]);
        assert_eq!(reading.gesture, GestureState::Fist);
    }

    #[test]
    fn sink_publishes_first_hand() {
        let cell = Arc::new(GestureCell::new());
        let sink = PoseSink::new(Arc::clone(&cell));
        let fist = synthetic::pose(Pose::Fist, 0.3).points().to_vec();
        let open = synthetic::pose(Pose::OpenPalm, 0.3).points().to_vec();
        sink.deliver(&[fist, open]);
        assert_eq!(cell.gesture(), GestureState::Fist);
        sink.deliver(&[]);
        assert_eq!(cell.gesture(), GestureState::None);
    }

    #[test]
    fn sink_closes_with_the_last_reader() {
        let cell = Arc::new(GestureCell::new());
        let sink = PoseSink::new(Arc::clone(&cell));
        assert!(!sink.is_closed());
        drop(cell);
        assert!(sink.is_closed());
    }

    #[test]
    fn held_key_selects_pose_release_clears_it() {
        let (_tx, rx) = mpsc::channel();
        let mut sim = SimPoseSource::new(rx);
        sim.apply(SimInput::KeyDown(SimKey::OkSign));
        assert_eq!(sim.held, Some(Pose::OkSign));
        // Releasing a different key leaves the pose alone.
        sim.apply(SimInput::KeyUp(SimKey::Fist));
        assert_eq!(sim.held, Some(Pose::OkSign));
        sim.apply(SimInput::KeyUp(SimKey::OkSign));
        assert_eq!(sim.held, None);
        assert!(sim.current_hands().is_empty());
    }

    #[test]
    fn palm_size_steps_and_clamps() {
        let (_tx, rx) = mpsc::channel();
        let mut sim = SimPoseSource::new(rx);
        for _ in 0..100 { sim.apply(SimInput::KeyDown(SimKey::Nearer)); }
        assert_eq!(sim.palm_size, synthetic::PALM_SIZE_RANGE.1);
        for _ in 0..100 { sim.apply(SimInput::KeyDown(SimKey::Farther)); }
        assert_eq!(sim.palm_size, synthetic::PALM_SIZE_RANGE.0);
    }

    #[test]
    fn sim_thread_drives_cell_and_exits_on_hangup() {
        let cell = Arc::new(GestureCell::new());
        let (tx, rx) = mpsc::channel();
        let handle = spawn_pose_source(SimPoseSource::new(rx), Arc::clone(&cell));

        tx.send(SimInput::KeyDown(SimKey::Fist)).unwrap();
        assert!(wait_for(&cell, GestureState::Fist));
        tx.send(SimInput::KeyDown(SimKey::OpenPalm)).unwrap();
        assert!(wait_for(&cell, GestureState::OpenPalm));
        tx.send(SimInput::KeyUp(SimKey::OpenPalm)).unwrap();
        assert!(wait_for(&cell, GestureState::None));

        drop(tx);
        handle.join().unwrap();
    }
}
