use std::error::Error;
use std::fmt;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use raycast::{Sphere, Vec3};

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug)]
pub struct ArgsError {
    pub message: String,
}

impl ArgsError {
    fn new(message: impl Into<String>) -> ArgsError {
        ArgsError {
            message: message.into(),
        }
    }
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ArgsError {}

/// Parses `x,y,z,radius` with an optional `,r,g,b` surface color (default white).
pub fn parse_sphere(value: &str) -> Result<Sphere, ArgsError> {
    let numbers = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ArgsError::new(format!("'{}' is not a number", part.trim())))
        })
        .collect::<Result<Vec<f64>, ArgsError>>()?;

    let color = match numbers.len() {
        4 => Vec3::one(),
        7 => Vec3::new(numbers[4], numbers[5], numbers[6]),
        n => {
            return Err(ArgsError::new(format!(
                "expected x,y,z,radius[,r,g,b] but got {} values",
                n
            )))
        }
    };
    let radius = numbers[3];
    if radius.is_nan() || radius <= 0.0 {
        return Err(ArgsError::new(format!("radius must be positive, got {}", radius)));
    }
    if [color.x, color.y, color.z]
        .iter()
        .any(|c| !(0.0..=1.0).contains(c))
    {
        return Err(ArgsError::new("color components must be in [0, 1]"));
    }
    Ok(Sphere::new(
        Vec3::new(numbers[0], numbers[1], numbers[2]),
        radius,
        color,
    ))
}

#[derive(Debug, Parser)]
#[command(version, about = "Render one frame of a sphere scene", long_about = None)]
pub struct Args {
    /// the path where the rendered frame is saved
    #[arg(short, long, default_value = "output.png")]
    pub output: String,
    /// screen width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,
    /// screen height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
    /// samples per pixel, 0 disables anti-aliasing
    #[arg(short, long, default_value_t = 0)]
    pub anti_aliasing: u32,
    /// fixed seed for the anti-aliasing jitter
    #[arg(long)]
    pub seed: Option<u64>,
    /// camera yaw in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub yaw: f64,
    /// steps along the camera heading, negative to walk backwards
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub forward: i32,
    /// a sphere as x,y,z,radius[,r,g,b]; may be repeated
    #[arg(long = "sphere", value_parser = parse_sphere, allow_hyphen_values = true)]
    pub spheres: Vec<Sphere>,
    /// render on a single thread
    #[arg(long, default_value = "false")]
    pub sequential: bool,
    /// logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
