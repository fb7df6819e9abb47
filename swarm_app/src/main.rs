//! swarm_app: interactive entry point.

use std::io::{self, Write};

use swarm_app::app::{run, AppConfig, MAX_TEXTURES};
use swarm_app::AppError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Particle Swarm — Hand Gesture Text Controller         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();

    let verbose = std::env::args().any(|a| a == "--verbose");
    if let Err(e) = init_logging(verbose) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 3 textures, random seed\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) -> Result<(), AppError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn configure_interactively() -> AppConfig {
    let texture_count: usize = read_line(&format!("  Textures 0–{} (default 3, 0 = plain white): ", MAX_TEXTURES))
        .trim().parse().unwrap_or(3).min(MAX_TEXTURES);

    let seed: Option<u64> = read_line("  RNG seed (blank = random): ")
        .trim().parse().ok();

    AppConfig {
        texture_count,
        seed,
        ..AppConfig::default()
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
