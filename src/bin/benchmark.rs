//! Times the sparse update across field sizes and densities

use std::time::Instant;
use sparse_life::domain::{EngineConfig, InitialFill, LifeEngine, presets};

/// Average milliseconds per `update()` over `iterations` generations.
fn time_updates(engine: &mut LifeEngine, iterations: u32) -> f64 {
    let start = Instant::now();
    for _ in 0..iterations {
        engine.update();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn random_field(size: usize, density: f64) -> LifeEngine {
    let config = EngineConfig {
        width: size,
        height: size,
        fill: InitialFill::Random { density, seed: 7 },
        ..Default::default()
    };
    match config.build() {
        Ok(engine) => engine,
        Err(err) => panic!("benchmark field {size}x{size}: {err}"),
    }
}

/// A handful of gliders on an otherwise empty field: the case the sparse
/// update is built for.
fn sparse_field(size: usize) -> LifeEngine {
    let mut engine = random_field(size, 0.0);
    let glider = presets::glider();
    for i in 0..10 {
        let at = i * size / 10;
        if let Err(err) = glider.place_on(&mut engine, at, at) {
            panic!("placing glider: {err}");
        }
    }
    engine
}

fn main() {
    println!("=== Sparse Life Update Benchmark ===\n");

    let sizes = [100, 500, 1000, 2000];
    let densities = [0.01, 0.1, 0.3];
    let iterations = 20;

    print!("{:>10} {:>12}", "Size", "10 gliders");
    for density in densities {
        print!(" {:>11.0}%", density * 100.0);
    }
    println!();
    println!("{:-<64}", "");

    for size in sizes {
        let gliders_ms = time_updates(&mut sparse_field(size), iterations);
        print!("{:>10} {:>12.3}", format!("{}x{}", size, size), gliders_ms);
        for density in densities {
            let ms = time_updates(&mut random_field(size, density), iterations);
            print!(" {:>12.3}", ms);
        }
        println!();
    }

    println!("\nAll times in ms per generation, averaged over {} generations.", iterations);
}
