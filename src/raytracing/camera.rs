use std::f64::consts::PI;
use std::mem;

use image::Rgba;
use log::{debug, trace};
use rand::Rng;

use super::core::{self, RayIntersectable};
use super::math::{Ray, RotationY, Vec3};
use super::sampling::{self, SampleSeed};
use super::tiling::TileGrid;

/// Yaw change applied by a single turn step.
pub const YAW_STEP: f64 = PI / 32.0;

impl From<Vec3> for Rgba<u8> {
    fn from(value: Vec3) -> Self {
        // `as` saturates, so out of range components clamp to 0..=255
        Rgba([value.x as u8, value.y as u8, value.z as u8, 255])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
    pub color: Rgba<u8>,
}

impl Default for Pixel {
    fn default() -> Self {
        Pixel {
            x: 0,
            y: 0,
            color: Rgba([0, 0, 0, 0]),
        }
    }
}

/// Anything that can hand a full frame to the display loop.
pub trait PixelSource {
    fn cast_rays(&mut self) -> Vec<Pixel>;
}

/// Centers of `n` unit cells laid out symmetrically around zero.
pub fn screen_offsets(n: usize) -> Vec<f64> {
    let half = n as f64 / 2.0;
    (0..n).map(|i| -half + (i as f64 + 0.5)).collect()
}

/// Angular pinhole model: direction of the cell at the given offsets from the
/// screen center, with `zoom_unit` as the distance to the screen.
pub fn pixel_heading(y_offset: f64, x_offset: f64, zoom_unit: f64) -> Vec3 {
    let z_angle = (x_offset / zoom_unit).atan();
    let y_angle = (y_offset / zoom_unit).atan();
    Vec3::new(
        z_angle.sin() * y_angle.cos(),
        y_angle.sin(),
        z_angle.cos() * y_angle.cos(),
    )
}

/// A yaw-only camera casting one primary ray per pixel (or several when
/// anti-aliasing is on) into a flat list of objects.
///
/// The heading of every screen cell is computed once in [`Camera::new`]; casting
/// only rotates those headings by the current yaw. The object list and the pose
/// must stay untouched while a cast is running, which the borrow checker
/// enforces for [`Camera::cast_rays_concurrent`].
pub struct Camera {
    width: usize,
    height: usize,
    // row-major, `y * width + x`, independent of the pose
    screen_cells: Vec<Vec3>,
    rotation: RotationY,
    position: Vec3,
    objects: Vec<Box<dyn RayIntersectable>>,
    anti_aliasing: u32,
    sample_seed: SampleSeed,
    primary_rays: Vec<Ray>,
}

impl Camera {
    /// Creates a camera of `width` x `height` cells, placed at `origin` and
    /// facing +Z. `origin` is the starting position, not a fixed anchor: later
    /// moves are relative to it.
    pub fn new(width: usize, height: usize, origin: Vec3) -> Self {
        // a single zoom unit for both axes, taken from the height
        let zoom_unit = height as f64;
        let row_offsets = screen_offsets(height);
        let col_offsets = screen_offsets(width);
        let screen_cells = row_offsets
            .iter()
            .flat_map(|&y| {
                col_offsets
                    .iter()
                    .map(move |&x| pixel_heading(y, x, zoom_unit))
            })
            .collect();
        debug!("camera {}x{} created at {}", width, height, origin);

        Self {
            width,
            height,
            screen_cells,
            rotation: RotationY::identity(),
            position: origin,
            objects: Vec::new(),
            anti_aliasing: 0,
            sample_seed: SampleSeed::default(),
            primary_rays: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f64 {
        self.rotation.angle()
    }

    /// Pre-rotation heading of the cell at (`x`, `y`).
    pub fn heading(&self, x: usize, y: usize) -> Vec3 {
        self.screen_cells[y * self.width + x]
    }

    pub fn translate_camera(&mut self, offset: Vec3) {
        self.position = self.position + offset;
        trace!("camera moved to {}", self.position);
    }

    pub fn rotate_camera(&mut self, rads: f64) {
        self.rotation = RotationY::new(rads);
        trace!("camera yaw set to {}", rads);
    }

    pub fn increment_forward(&mut self) {
        self.translate_camera(Vec3::z_axis().rotate_y(self.yaw()));
    }

    pub fn decrement_forward(&mut self) {
        self.translate_camera(Vec3::z_axis().reverse().rotate_y(self.yaw()));
    }

    pub fn increment_yaw(&mut self) {
        self.rotate_camera(self.yaw() + YAW_STEP);
    }

    pub fn decrement_yaw(&mut self) {
        self.rotate_camera(self.yaw() - YAW_STEP);
    }

    /// Heading on the XZ plane as a line from the origin, for top-down overlays.
    pub fn heading_line(&self) -> (f32, f32, f32, f32) {
        let heading = self.rotation.apply(Vec3::z_axis());
        (0.0, 0.0, heading.x as f32, heading.z as f32)
    }

    pub fn set_object<O: RayIntersectable + 'static>(&mut self, object: O) {
        self.objects.push(Box::new(object));
    }

    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }

    pub fn objects(&self) -> &[Box<dyn RayIntersectable>] {
        &self.objects
    }

    pub fn objects_len(&self) -> usize {
        self.objects.len()
    }

    /// Samples per pixel; 0 turns anti-aliasing off.
    pub fn set_anti_aliasing(&mut self, factor: u32) {
        self.anti_aliasing = factor;
    }

    pub fn anti_aliasing(&self) -> u32 {
        self.anti_aliasing
    }

    pub fn set_sample_seed(&mut self, seed: SampleSeed) {
        self.sample_seed = seed;
    }

    /// Rays of the last [`Camera::cast_rays`] call, in row-major order.
    pub fn primary_rays(&self) -> &[Ray] {
        &self.primary_rays
    }

    pub fn primary_ray(&self, x: usize, y: usize) -> Ray {
        self.ray_for_heading(self.heading(x, y))
    }

    fn ray_for_heading(&self, heading: Vec3) -> Ray {
        Ray::new(self.position, self.rotation.apply(heading))
    }

    pub fn resolve_color(&self, ray: &Ray) -> Vec3 {
        core::resolve_color(&self.objects, ray)
    }

    fn supersample(&self, index: usize) -> Vec3 {
        let heading = self.screen_cells[index];
        match self.sample_seed.pixel_rng(index) {
            Some(mut rng) => self.average_samples(heading, &mut rng),
            None => self.average_samples(heading, &mut rand::thread_rng()),
        }
    }

    /// Box filter over `anti_aliasing` jittered samples around `heading`.
    fn average_samples<R: Rng + ?Sized>(&self, heading: Vec3, rng: &mut R) -> Vec3 {
        let mut color = Vec3::zero();
        for _ in 0..self.anti_aliasing {
            let offset = sampling::jitter(rng, self.anti_aliasing);
            let ray = self.ray_for_heading((heading + offset).normalize());
            color += self.resolve_color(&ray);
        }
        color / self.anti_aliasing as f64
    }

    fn render_pixel(&self, x: usize, y: usize, primary_ray: &Ray) -> Pixel {
        let color = if self.anti_aliasing > 0 {
            self.supersample(y * self.width + x)
        } else {
            self.resolve_color(primary_ray)
        };
        Pixel {
            x,
            y,
            color: color.into(),
        }
    }

    /// Renders the frame on the calling thread, row by row, and records the
    /// primary rays.
    pub fn cast_rays(&mut self) -> Vec<Pixel> {
        let mut primary_rays = Vec::with_capacity(self.screen_cells.len());
        let mut pixels = Vec::with_capacity(self.screen_cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let ray = self.primary_ray(x, y);
                pixels.push(self.render_pixel(x, y, &ray));
                primary_rays.push(ray);
            }
        }
        self.primary_rays = primary_rays;
        debug!(
            "cast {} rays sequentially, {} objects, anti-aliasing {}",
            pixels.len(),
            self.objects.len(),
            self.anti_aliasing
        );
        pixels
    }

    /// Renders the frame with one task per tile, joining them all before
    /// returning. The result is indexed by `y * width + x` and equals the
    /// output of [`Camera::cast_rays`] for the same scene.
    pub fn cast_rays_concurrent(&self) -> Vec<Pixel> {
        if self.width == 0 || self.height == 0 {
            return Vec::new();
        }
        let mut pixels = vec![Pixel::default(); self.width * self.height];
        let grid = TileGrid::new(self.width, self.height);
        let tiles = grid.tiles();

        // carve the buffer into the row segments owned by each tile
        let mut segments: Vec<Vec<&mut [Pixel]>> =
            tiles.iter().map(|tile| Vec::with_capacity(tile.rows.len())).collect();
        let mut rest: &mut [Pixel] = &mut pixels;
        for (band_index, rows) in grid.row_bands.iter().enumerate() {
            let (band, tail) = mem::take(&mut rest).split_at_mut(rows.len() * self.width);
            rest = tail;
            for row in band.chunks_mut(self.width) {
                let mut row_rest = row;
                for (col_index, cols) in grid.col_bands.iter().enumerate() {
                    let (segment, tail) = mem::take(&mut row_rest).split_at_mut(cols.len());
                    row_rest = tail;
                    segments[band_index * grid.col_bands.len() + col_index].push(segment);
                }
            }
        }

        rayon::scope(|scope| {
            for (tile, rows) in tiles.iter().zip(segments) {
                scope.spawn(move |_| {
                    for (y, row) in tile.rows.clone().zip(rows) {
                        for (x, pixel) in tile.cols.clone().zip(row.iter_mut()) {
                            let ray = self.primary_ray(x, y);
                            *pixel = self.render_pixel(x, y, &ray);
                        }
                    }
                });
            }
        });

        debug!(
            "cast {} rays over {} tiles, {} objects, anti-aliasing {}",
            pixels.len(),
            grid.tile_count(),
            self.objects.len(),
            self.anti_aliasing
        );
        pixels
    }
}

impl PixelSource for Camera {
    fn cast_rays(&mut self) -> Vec<Pixel> {
        Camera::cast_rays(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raytracing::core::Sphere;

    const EPSILON: f64 = 1e-7;
    const HALF_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn screen_offsets_are_symmetric() {
        assert_eq!(screen_offsets(3), vec![-1.0, 0.0, 1.0]);
        assert_eq!(screen_offsets(5), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(screen_offsets(4), vec![-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(screen_offsets(1), vec![0.0]);
        assert!(screen_offsets(0).is_empty());
    }

    #[test]
    fn pixel_heading_vectors() {
        let cases = [
            ("straight along z", 0.0, 0.0, Vec3::new(0.0, 0.0, 1.0)),
            ("right", 0.0, 1.0, Vec3::new(HALF_SQRT_2, 0.0, HALF_SQRT_2)),
            ("left", 0.0, -1.0, Vec3::new(-HALF_SQRT_2, 0.0, HALF_SQRT_2)),
            ("up", 1.0, 0.0, Vec3::new(0.0, HALF_SQRT_2, HALF_SQRT_2)),
            ("up and left", 1.0, -1.0, Vec3::new(-0.5, HALF_SQRT_2, 0.5)),
        ];
        for (name, y, x, expected) in cases {
            let heading = pixel_heading(y, x, 1.0);
            assert!(heading.approx_eq(expected, EPSILON), "{}: {}", name, heading);
            assert!((heading.len() - 1.0).abs() < EPSILON, "{}", name);
        }
    }

    #[test]
    fn screen_cells_use_height_as_zoom() {
        let camera = Camera::new(4, 2, Vec3::zero());
        // x offset 1.5, y offset -0.5, zoom 2
        let expected = pixel_heading(-0.5, 1.5, 2.0);
        assert_eq!(camera.heading(3, 0), expected);
        assert_eq!(camera.screen_cells.len(), 8);
    }

    #[test]
    fn camera_starts_at_origin_facing_z() {
        let camera = Camera::new(1, 1, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.heading_line(), (0.0, 0.0, 0.0, 1.0));
        let ray = camera.primary_ray(0, 0);
        assert_eq!(ray.direction(), Vec3::z_axis());
    }

    #[test]
    fn yaw_steps_keep_rotation_in_sync() {
        let mut camera = Camera::new(1, 1, Vec3::zero());
        for _ in 0..16 {
            camera.increment_yaw();
        }
        assert!((camera.yaw() - PI / 2.0).abs() < EPSILON);
        let direction = camera.primary_ray(0, 0).direction();
        assert!(direction.approx_eq(Vec3::new(1.0, 0.0, 0.0), EPSILON));

        camera.decrement_yaw();
        assert!((camera.yaw() - (PI / 2.0 - YAW_STEP)).abs() < EPSILON);

        camera.rotate_camera(PI);
        assert_eq!(camera.yaw(), PI);
        let (_, _, x, z) = camera.heading_line();
        assert!(x.abs() < 1e-6 && (z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn forward_follows_heading() {
        let mut camera = Camera::new(1, 1, Vec3::zero());
        camera.increment_forward();
        assert!(camera.position().approx_eq(Vec3::z_axis(), EPSILON));

        camera.rotate_camera(PI / 2.0);
        camera.increment_forward();
        camera.increment_forward();
        assert!(camera.position().approx_eq(Vec3::new(2.0, 0.0, 1.0), EPSILON));

        camera.decrement_forward();
        assert!(camera.position().approx_eq(Vec3::new(1.0, 0.0, 1.0), EPSILON));

        camera.translate_camera(Vec3::new(0.0, 5.0, 0.0));
        assert!(camera.position().approx_eq(Vec3::new(1.0, 5.0, 1.0), EPSILON));
    }

    #[test]
    fn objects_can_be_added_and_cleared() {
        let mut camera = Camera::new(2, 2, Vec3::zero());
        camera.set_object(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Vec3::one()));
        camera.set_object(Sphere::new(Vec3::new(0.0, 0.0, 9.0), 1.0, Vec3::one()));
        assert_eq!(camera.objects_len(), 2);
        camera.clear_objects();
        assert_eq!(camera.objects_len(), 0);
    }

    #[test]
    fn cast_emits_row_major_pixels() {
        let mut camera = Camera::new(3, 2, Vec3::zero());
        let pixels = camera.cast_rays();
        let coords: Vec<(usize, usize)> = pixels.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert!(pixels.iter().all(|p| p.color.0[3] == 255));
    }

    #[test]
    fn cast_records_primary_rays() {
        let mut camera = Camera::new(4, 3, Vec3::new(0.0, 1.0, 0.0));
        assert!(camera.primary_rays().is_empty());
        camera.cast_rays();
        assert_eq!(camera.primary_rays().len(), 12);
        assert_eq!(camera.primary_rays()[5], camera.primary_ray(1, 1));
        assert!(camera
            .primary_rays()
            .iter()
            .all(|ray| ray.origin() == Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn color_saturates_into_bytes() {
        let color: Rgba<u8> = Vec3::new(300.0, -4.0, 127.9).into();
        assert_eq!(color, Rgba([255, 0, 127, 255]));
    }

    #[test]
    fn head_on_pixel_is_surface_color() {
        let mut camera = Camera::new(1, 1, Vec3::zero());
        camera.set_object(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 2.0, Vec3::one()));
        let pixels = camera.cast_rays();
        assert_eq!(pixels[0].color, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn seeded_anti_aliasing_is_reproducible() {
        let mut camera = Camera::new(6, 4, Vec3::zero());
        camera.set_object(Sphere::new(Vec3::new(0.0, 0.0, 6.0), 2.0, Vec3::new(0.2, 0.9, 0.4)));
        camera.set_anti_aliasing(4);
        camera.set_sample_seed(SampleSeed::Fixed(1234));
        let first = camera.cast_rays();
        let second = camera.cast_rays();
        assert_eq!(first, second);
    }

    #[test]
    fn anti_aliased_pixel_is_mean_of_its_samples() {
        let mut camera = Camera::new(3, 3, Vec3::zero());
        camera.set_object(Sphere::new(Vec3::new(0.0, 0.0, 4.0), 1.5, Vec3::new(0.9, 0.5, 0.1)));
        camera.set_anti_aliasing(5);
        camera.set_sample_seed(SampleSeed::Fixed(2024));
        let pixels = camera.cast_rays();

        for (index, pixel) in pixels.iter().enumerate() {
            let mut rng = SampleSeed::Fixed(2024).pixel_rng(index).unwrap();
            let mut sum = Vec3::zero();
            for _ in 0..5 {
                let offset = sampling::jitter(&mut rng, 5);
                let heading = (camera.screen_cells[index] + offset).normalize();
                sum += camera.resolve_color(&camera.ray_for_heading(heading));
            }
            let expected: Rgba<u8> = (sum / 5.0).into();
            assert_eq!(pixel.color, expected, "pixel {}", index);
        }
    }

    #[test]
    fn anti_aliased_color_stays_within_sample_range() {
        // every jittered ray hits the sphere nearly head-on, so the facing
        // ratio of each sample is in [0.9, 1]
        for seed in [SampleSeed::Entropy, SampleSeed::Fixed(5)] {
            let mut camera = Camera::new(1, 1, Vec3::zero());
            camera.set_object(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 2.5, Vec3::new(0.4, 0.0, 0.0)));
            camera.set_anti_aliasing(4);
            camera.set_sample_seed(seed);
            let red = camera.cast_rays()[0].color.0[0];
            assert!((90..=103).contains(&red), "{:?}: {}", seed, red);
        }
    }

    #[test]
    fn zero_sized_camera_casts_nothing() {
        let mut camera = Camera::new(0, 5, Vec3::zero());
        assert!(camera.cast_rays().is_empty());
        assert!(camera.cast_rays_concurrent().is_empty());
        let camera = Camera::new(5, 0, Vec3::zero());
        assert!(camera.cast_rays_concurrent().is_empty());
    }
}
