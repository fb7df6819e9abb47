//! Interactive probe for the hand-gesture classifier.
//!
//! Paste a hand as 63 numbers (21 × `x y z`, commas or spaces) to see how it
//! classifies, or pick one of the built-in synthetic poses.

use hand_gesture::synthetic::{pose, Pose};
use hand_gesture::{
    classify, estimate_proximity, is_extended, FrameError, Landmark, LandmarkFrame,
    LANDMARK_COUNT, NON_THUMB,
};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
enum ProbeError {
    #[error("`{0}` is not a number")]
    BadNumber(String),
    #[error("expected {} numbers, got {0}", LANDMARK_COUNT * 3)]
    WrongCount(usize),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             Hand Gesture Classifier Probe            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    loop {
        print_menu();
        let Some(choice) = read_line("Choice (1–4, p to paste, q to quit): ") else {
            break;
        };

        let chosen = match choice.trim() {
            "1" => Pose::Fist,
            "2" => Pose::OpenPalm,
            "3" => Pose::OkSign,
            "4" => Pose::Peace,
            "p" | "P" => {
                let Some(line) = read_line("  Landmarks: ") else { break };
                match parse_frame(&line) {
                    Ok(frame) => report(&frame),
                    Err(e)    => println!("  ⚠  {}\n", e),
                }
                continue;
            }
            "q" | "Q" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => { println!("  ⚠  Please enter 1–4, p or q.\n"); continue; }
        };

        let size: f32 = read_line("  Palm size 0.05–0.6 (default 0.3): ")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0.3);
        report(&pose(chosen, size));
    }
}

fn report(frame: &LandmarkFrame) {
    let gesture   = classify(Some(frame));
    let proximity = estimate_proximity(frame);
    println!();
    println!("  ┌─ gesture   : {}", gesture.name());
    for finger in NON_THUMB {
        let mark = if is_extended(frame, finger) { "extended" } else { "curled" };
        println!("  ├─ {:<9} : {}", format!("{:?}", finger).to_lowercase(), mark);
    }
    println!("  └─ proximity : {:.3}", proximity);
    println!();
}

fn parse_frame(line: &str) -> Result<LandmarkFrame, ProbeError> {
    let values = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f32>().map_err(|_| ProbeError::BadNumber(t.to_string())))
        .collect::<Result<Vec<f32>, _>>()?;

    if values.len() != LANDMARK_COUNT * 3 {
        return Err(ProbeError::WrongCount(values.len()));
    }
    let points: Vec<Landmark> = values
        .chunks_exact(3)
        .map(|c| Landmark::new(c[0], c[1], c[2]))
        .collect();
    Ok(LandmarkFrame::from_points(&points)?)
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    println!("  │  1. Fist                                             │");
    println!("  │  2. Open palm                                        │");
    println!("  │  3. OK sign                                          │");
    println!("  │  4. Peace (no gesture)                               │");
    println!("  └──────────────────────────────────────────────────────┘");
    println!();
}

/// `None` once stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_)          => Some(buf),
    }
}
