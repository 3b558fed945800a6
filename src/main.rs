use std::error::Error;
use std::time::Instant;

use clap::Parser;
use image::{ImageBuffer, Rgba};
use log::{debug, info};

use raycast::{Camera, SampleSeed, Sphere, Vec3};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn default_scene() -> Vec<Sphere> {
    vec![Sphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0, Vec3::one())]
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    let mut camera = Camera::new(args.width as usize, args.height as usize, Vec3::zero());
    camera.set_anti_aliasing(args.anti_aliasing);
    if let Some(seed) = args.seed {
        camera.set_sample_seed(SampleSeed::Fixed(seed));
    }
    camera.rotate_camera(args.yaw);
    for _ in 0..args.forward.unsigned_abs() {
        if args.forward > 0 {
            camera.increment_forward();
        } else {
            camera.decrement_forward();
        }
    }

    let spheres = if args.spheres.is_empty() {
        default_scene()
    } else {
        args.spheres
    };
    for sphere in spheres {
        debug!("adding sphere {}", sphere);
        camera.set_object(sphere);
    }

    // measure time
    let start = Instant::now();
    let pixels = if args.sequential {
        camera.cast_rays()
    } else {
        camera.cast_rays_concurrent()
    };
    let total_time = start.elapsed();

    let mut buffer: ImageBuffer<Rgba<u8>, Vec<_>> = ImageBuffer::new(args.width, args.height);
    for pixel in &pixels {
        buffer.put_pixel(pixel.x as u32, pixel.y as u32, pixel.color);
    }

    info!("Rendered {} in {:?}", args.output, total_time);
    buffer.save(&args.output)?;
    Ok(())
}
