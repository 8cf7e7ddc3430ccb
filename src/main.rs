//! Wavefield demo - synthesize an ocean displacement field and save a PNG
//! visualization of the vertical displacement.

use clap::Parser;
use std::thread;
use std::time::{Duration, Instant};

use wavefield::cli::Args;
use wavefield::params::max_wave_height;
use wavefield::AsyncDisplacementGenerator;

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = args.create_config();

    println!("Wavefield - FFT ocean displacement generator");
    println!(
        "Grid: {}x{} over {}m, wind {} m/s, {:?} spectrum",
        config.resolution,
        config.resolution,
        config.world_size_m,
        config.wind_velocity.length(),
        config.spectrum_model
    );

    let mut generator = match AsyncDisplacementGenerator::new(config.clone()) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    generator.request_generate(args.time);

    let deadline = Instant::now() + Duration::from_secs(60);
    while !generator.try_swap_if_ready() {
        if Instant::now() > deadline {
            eprintln!("Timed out waiting for the generation worker");
            std::process::exit(1);
        }
        thread::sleep(Duration::from_millis(5));
    }

    let pixels = generator.current_image();
    let max_height = pixels.iter().map(|v| v.z.abs()).fold(0.0f32, f32::max);
    println!(
        "Generated t={}s: peak |height| {:.3}m (theoretical max {:.3}m)",
        args.time,
        max_height,
        max_wave_height(config.wind_velocity.length(), config.gravity)
    );

    // Map vertical displacement to grayscale for a quick visual check
    let n = generator.resolution() as u32;
    let scale = if max_height > 0.0 { max_height } else { 1.0 };
    let png = image::GrayImage::from_fn(n, n, |x, y| {
        let height = pixels[(y * n + x) as usize].z;
        let normalized = (height / scale) * 0.5 + 0.5;
        image::Luma([(normalized.clamp(0.0, 1.0) * 255.0) as u8])
    });

    match png.save(&args.output) {
        Ok(()) => println!("Wrote {}", args.output),
        Err(e) => {
            eprintln!("Failed to write {}: {e}", args.output);
            std::process::exit(1);
        }
    }
}
