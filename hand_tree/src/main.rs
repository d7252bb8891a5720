//! hand_tree — interactive entry point.

use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hand_tree::app::{run, AppConfig};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Tree — gesture-controlled particle scene         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();
    println!("  Hold O = open hand (explode)   Hold F = fist (tree)   Q = quit");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 800 particles, clock seed\n");
        AppConfig { seed: clock_seed(), ..AppConfig::default() }
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

fn configure_interactively() -> AppConfig {
    let mut cfg = AppConfig::default();

    cfg.scene.particle_count = {
        let n = read_line("  Particle count (default 800): ")
            .trim()
            .parse()
            .unwrap_or(800);
        n.clamp(10, 20_000)
    };

    cfg.scene.tree_height = {
        let h: f32 = read_line("  Tree height (default 10): ")
            .trim()
            .parse()
            .unwrap_or(10.0);
        h.clamp(2.0, 40.0)
    };

    cfg.seed = read_line("  Field seed (default: clock): ")
        .trim()
        .parse()
        .unwrap_or_else(|_| clock_seed());

    cfg.model_latency = {
        let ms: u64 = read_line("  Simulated inference latency ms (default 25): ")
            .trim()
            .parse()
            .unwrap_or(25);
        Duration::from_millis(ms.min(2_000))
    };

    cfg
}

/// Millisecond clock seed, so interactive runs get a fresh nebula each time.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0x5EED)
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
