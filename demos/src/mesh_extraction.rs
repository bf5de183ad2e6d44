//! Mesh Extraction Benchmark
//!
//! Times the two generation phases separately and end to end over a range of
//! grid sizes and thread counts.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin mesh_extraction
//! cargo run --release --bin mesh_extraction -- --large
//! ```

use std::env;

use instant::Instant;

use isomesh_demos::{Terrain, ValueNoise};
use isomesh_rs::{extract, generate, MeshConfig, MeshResult, ScalarField};

const ITERATIONS: u32 = 5;

fn main() {
    env_logger::init();

    let large = env::args().any(|a| a == "--large");
    let sizes: &[u32] = if large {
        &[32, 64, 128, 192]
    } else {
        &[16, 32, 64]
    };

    println!("Mesh extraction benchmark ({} iterations each)", ITERATIONS);
    println!();

    for &grid_size in sizes {
        let config = MeshConfig::new(grid_size).with_noise_scale(0.05);
        let terrain = Terrain {
            noise: ValueNoise::new(42, 4),
            height: grid_size as f32 * config.noise_scale,
        };

        println!("  [{}^3 cells, {} vertex slots]", grid_size, config.vertex_slots());

        // Phase timings on the global pool
        let start = Instant::now();
        let mut field = None;
        for _ in 0..ITERATIONS {
            field = ScalarField::sample(grid_size, &config.sampling(), &terrain).ok();
        }
        let sample_time = start.elapsed() / ITERATIONS;

        let Some(field) = field else {
            eprintln!("    sampling failed");
            continue;
        };

        let start = Instant::now();
        let mut triangles = 0;
        for _ in 0..ITERATIONS {
            if let Ok(extraction) = extract(&field, config.surface_level) {
                triangles = extraction.triangles.len();
            }
        }
        let extract_time = start.elapsed() / ITERATIONS;

        println!("    Sample:        {:>10.3}ms", sample_time.as_secs_f64() * 1e3);
        println!("    Extract:       {:>10.3}ms", extract_time.as_secs_f64() * 1e3);
        println!("    Triangles:     {:>10}", triangles);

        // End to end, single thread against the global pool
        for threads in [1usize, 0] {
            let config = config.with_threads(threads);
            let start = Instant::now();
            let mut result = MeshResult::NoSurface;
            for _ in 0..ITERATIONS {
                match generate(&config, &terrain) {
                    Ok(r) => result = r,
                    Err(e) => {
                        eprintln!("    generate failed: {}", e);
                        break;
                    }
                }
            }
            let time = start.elapsed() / ITERATIONS;
            let label = if threads == 0 { "all threads" } else { "1 thread" };
            println!(
                "    Generate ({:<11}) {:>8.3}ms  surface: {}",
                label,
                time.as_secs_f64() * 1e3,
                result.is_surface()
            );
        }
        println!();
    }
}
