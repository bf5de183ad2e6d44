//! Scrolling Terrain Regeneration
//!
//! Regenerates a noise terrain every simulated frame while the sampling window
//! scrolls, publishing each result through a `SurfaceSlot`. Frames are
//! generated on worker threads so that regenerations overlap; a result that
//! finishes after a newer frame has published is discarded by the slot.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --bin terrain_regen -- 48 30
//! ```

use std::env;
use std::sync::Arc;
use std::thread;

use instant::Instant;

use isomesh_demos::{Terrain, ValueNoise};
use isomesh_rs::{generate, MeshConfig, SurfaceSlot};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let grid_size: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(32);
    let frames: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);

    let config = MeshConfig::new(grid_size).with_scroll(2.0);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let terrain = Arc::new(Terrain {
        noise: ValueNoise::new(0x5EED, 4),
        height: grid_size as f32 * config.noise_scale,
    });
    let slot = Arc::new(SurfaceSlot::new());

    println!("Terrain regeneration: {}^3 cells, {} frames", grid_size, frames);
    println!();

    let start = Instant::now();
    let mut workers = Vec::new();
    for frame in 0..frames {
        let elapsed = frame as f32 / 30.0;
        let frame_config = config.at_time(elapsed);
        let ticket = slot.begin();

        let slot = Arc::clone(&slot);
        let terrain = Arc::clone(&terrain);
        workers.push(thread::spawn(move || {
            match generate(&frame_config, terrain.as_ref()) {
                Ok(result) => {
                    let published = slot.publish(ticket, result);
                    log::debug!("frame {} published: {}", frame, published);
                    published
                }
                Err(e) => {
                    log::warn!("frame {} failed: {}", frame, e);
                    false
                }
            }
        }));

        // Two frames in flight at most
        if workers.len() >= 2 {
            join_frame(workers.remove(0));
        }
    }
    for worker in workers {
        join_frame(worker);
    }
    let total = start.elapsed();

    println!("  Frames:          {}", frames);
    println!("  Published:       {}", slot.version());
    println!("  Discarded:       {}", u64::from(frames) - slot.version());
    println!("  Total time:      {:.3}s", total.as_secs_f64());
    println!(
        "  Frame rate:      {:.1} regenerations/sec",
        frames as f64 / total.as_secs_f64()
    );
    println!();

    match slot.current() {
        Some(mesh) => {
            let stats = mesh.stats();
            let compact = mesh.compact();
            println!("  Final mesh:");
            println!("    Triangles:     {}", stats.triangle_count);
            println!("    Vertices:      {} used of {} slots", stats.vertex_count, mesh.vertices.len());
            println!("    Compacted:     {} vertices", compact.vertices.len());
            println!("    Surface area:  {:.2}", stats.surface_area);
            println!(
                "    Bounding box:  ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})",
                stats.bbox_min.x,
                stats.bbox_min.y,
                stats.bbox_min.z,
                stats.bbox_max.x,
                stats.bbox_max.y,
                stats.bbox_max.z
            );
        }
        None => println!("  Final frame has no surface"),
    }
}

fn join_frame(worker: thread::JoinHandle<bool>) {
    if let Err(panic) = worker.join() {
        log::warn!("regeneration worker panicked: {:?}", panic);
    }
}
