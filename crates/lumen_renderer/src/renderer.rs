//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Depth-bounded light transport, unrolled into a loop
//! - Sky gradient background as the only light source
//! - Anti-aliasing via multi-sampling
//! - Gamma correction and 8-bit quantization

use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{Camera, Color, ConfigError, Hittable, Ray, RenderConfig};
use lumen_math::{Interval, Vec3Ext};
use rand::RngCore;

/// Parameter range for every hit query. The lower bound keeps a scattered ray
/// from re-hitting the surface it starts on.
pub const HIT_RANGE: Interval = Interval::new(0.001, f32::INFINITY);

/// How a path stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Left the scene and picked up the sky color
    Escaped,
    /// A material swallowed the ray
    Absorbed,
    /// Still bouncing when the depth bound was reached
    DepthExhausted,
}

/// Radiance carried back along one primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub color: Color,
    pub termination: Termination,
    /// Number of successful scatters along the path
    pub bounces: u32,
}

/// Trace a ray through the scene and report how the path ended.
///
/// A path may scatter at most `max_depth` times; a hit after that returns
/// black. Absorption also returns black. Both are counted separately so the
/// two cases can be told apart even though they look the same.
pub fn trace_path(
    ray: &Ray,
    world: &dyn Hittable,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> PathSample {
    let mut ray = *ray;
    let mut throughput = Color::ONE;
    let mut depth = 0;

    loop {
        let Some(rec) = world.hit(&ray, HIT_RANGE) else {
            return PathSample {
                color: throughput * sky_gradient(&ray),
                termination: Termination::Escaped,
                bounces: depth,
            };
        };

        if depth >= max_depth {
            return PathSample {
                color: Color::ZERO,
                termination: Termination::DepthExhausted,
                bounces: depth,
            };
        }

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
                depth += 1;
            }
            None => {
                return PathSample {
                    color: Color::ZERO,
                    termination: Termination::Absorbed,
                    bounces: depth,
                };
            }
        }
    }
}

/// Compute the color seen by a ray.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    trace_path(ray, world, max_depth, rng).color
}

/// Compute sky gradient background: white toward the horizon and below, blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().unit_vector();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * white + t * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let unit = Interval::new(0.0, 1.0);
    let quantize = |c: f32| (255.999 * unit.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Path termination counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Primary rays traced
    pub samples: u64,
    pub escaped: u64,
    pub absorbed: u64,
    pub depth_exhausted: u64,
    /// Scatter events over all paths
    pub bounces: u64,
}

impl RenderStats {
    pub fn record(&mut self, sample: &PathSample) {
        self.samples += 1;
        self.bounces += u64::from(sample.bounces);
        match sample.termination {
            Termination::Escaped => self.escaped += 1,
            Termination::Absorbed => self.absorbed += 1,
            Termination::DepthExhausted => self.depth_exhausted += 1,
        }
    }

    pub fn merge(&mut self, other: &RenderStats) {
        self.samples += other.samples;
        self.escaped += other.escaped;
        self.absorbed += other.absorbed;
        self.depth_exhausted += other.depth_exhausted;
        self.bounces += other.bounces;
    }
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are buffer coordinates with row 0 at the top of the image.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    stats: &mut RenderStats,
) -> Color {
    debug_assert!(x < config.width && y < config.height, "pixel ({x}, {y}) outside image");
    // Image plane t grows upward
    let row_from_bottom = config.height - 1 - y;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + crate::gen_f32(rng)) / config.width as f32;
        let t = (row_from_bottom as f32 + crate::gen_f32(rng)) / config.height as f32;
        let ray = camera.get_ray(s, t, rng);

        let sample = trace_path(&ray, world, config.max_depth, rng);
        stats.record(&sample);
        pixel_color += sample.color;
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Linear color image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Row-major offset of (x, y), computed in `usize` so large images do not wrap.
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Copy a rendered bucket into its region of the image.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Gamma-corrected RGB bytes, three per pixel, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// A finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
}

/// Render the entire scene to an image buffer.
///
/// The image is split into buckets, each with its own generator seeded from
/// `config.seed`, so the result depends only on the inputs. Buckets are
/// rendered one after another on the calling thread.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> Result<RenderOutput, ConfigError> {
    config.validate()?;

    let start = Instant::now();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} buckets",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len()
    );

    let mut image = ImageBuffer::new(config.width, config.height);
    let mut stats = RenderStats::default();

    for bucket in &buckets {
        let result = render_bucket(bucket, camera, world, config);
        image.write_bucket(&result);
        stats.merge(&result.stats);
        log::debug!(
            "Bucket {}/{} at ({}, {}) done",
            bucket.index + 1,
            buckets.len(),
            bucket.x,
            bucket.y
        );
    }

    log::info!(
        "Rendered in {:?}: {} samples, {} escaped, {} absorbed, {} hit depth limit",
        start.elapsed(),
        stats.samples,
        stats.escaped,
        stats.absorbed,
        stats.depth_exhausted
    );

    Ok(RenderOutput { image, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        HitRecord, HittableList, Lambertian, Material, Metal, ScatterResult, Sphere, Vec3,
        MAX_DEPTH,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Always absorbs.
    struct Absorber;

    impl Material for Absorber {
        fn scatter(&self, _: &Ray, _: &HitRecord, _: &mut dyn RngCore) -> Option<ScatterResult> {
            None
        }
    }

    /// Halves the light and sends the ray straight up.
    struct Skylight;

    impl Material for Skylight {
        fn scatter(&self, _: &Ray, rec: &HitRecord, _: &mut dyn RngCore) -> Option<ScatterResult> {
            Some(ScatterResult {
                attenuation: Color::splat(0.5),
                scattered: Ray::new(rec.p, Vec3::Y),
            })
        }
    }

    fn single(material: Arc<dyn Material>) -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, material)));
        world
    }

    /// Two facing mirrors at z = -1 and z = +1.
    fn mirror_box() -> HittableList {
        let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::ONE, 0.0));
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1001.0), 1000.0, mirror.clone())));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 1001.0), 1000.0, mirror)));
        world
    }

    #[test]
    fn test_sky_gradient_formula() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.2, 1.6));
        // unit y = 0.6, t = 0.8
        let color = sky_gradient(&ray);
        assert!((color - Color::new(0.6, 0.76, 1.0)).length() < 1e-5);

        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        let down = sky_gradient(&Ray::new(Vec3::ZERO, -Vec3::Y));
        assert!((down - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_miss_returns_background() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);

        for dir in [Vec3::new(0.3, -0.4, -1.0), Vec3::new(-1.0, 2.0, 0.5), Vec3::X] {
            let ray = Ray::new(Vec3::ZERO, dir);
            let sample = trace_path(&ray, &world, MAX_DEPTH, &mut rng);
            assert_eq!(sample.termination, Termination::Escaped);
            assert_eq!(sample.bounces, 0);
            assert_eq!(sample.color, sky_gradient(&ray));
        }
    }

    #[test]
    fn test_attenuation_multiplies_background() {
        let world = single(Arc::new(Skylight));
        let mut rng = StdRng::seed_from_u64(0);

        let sample = trace_path(&Ray::new(Vec3::ZERO, -Vec3::Z), &world, MAX_DEPTH, &mut rng);
        assert_eq!(sample.termination, Termination::Escaped);
        assert_eq!(sample.bounces, 1);
        assert!((sample.color - 0.5 * Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_absorption_is_black() {
        let world = single(Arc::new(Absorber));
        let mut rng = StdRng::seed_from_u64(0);

        let sample = trace_path(&Ray::new(Vec3::ZERO, -Vec3::Z), &world, MAX_DEPTH, &mut rng);
        assert_eq!(sample.termination, Termination::Absorbed);
        assert_eq!(sample.color, Color::ZERO);
    }

    #[test]
    fn test_facing_mirrors_exhaust_depth() {
        let world = mirror_box();
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        for max_depth in [1, 3, MAX_DEPTH] {
            let sample = trace_path(&ray, &world, max_depth, &mut rng);
            assert_eq!(sample.termination, Termination::DepthExhausted);
            assert_eq!(sample.bounces, max_depth);
            assert_eq!(sample.color, Color::ZERO);
        }
        assert_eq!(ray_color(&ray, &world, 10_000, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_stats_distinguish_terminations() {
        let mut stats = RenderStats::default();
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        stats.record(&trace_path(&ray, &mirror_box(), 4, &mut rng));
        stats.record(&trace_path(&ray, &single(Arc::new(Absorber)), 4, &mut rng));
        stats.record(&trace_path(&ray, &HittableList::new(), 4, &mut rng));

        assert_eq!(stats.samples, 3);
        assert_eq!(stats.depth_exhausted, 1);
        assert_eq!(stats.absorbed, 1);
        assert_eq!(stats.escaped, 1);
        assert_eq!(stats.bounces, 4);

        let mut total = RenderStats::default();
        total.merge(&stats);
        total.merge(&stats);
        assert_eq!(total.samples, 6);
        assert_eq!(total.bounces, 8);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::new(0.25, 1.0, 0.0)), [127, 255, 0]);
        assert_eq!(color_to_rgb8(Color::new(4.0, -1.0, 0.01)), [255, 0, 25]);
    }

    #[test]
    fn test_render_pixel_sky() {
        // Empty world: every sample is background, so the top row is bluer than the bottom
        let world = HittableList::new();
        let config = RenderConfig {
            width: 4,
            height: 4,
            samples_per_pixel: 8,
            ..RenderConfig::default()
        };
        let camera = Camera::builder().with_aspect_ratio(config.aspect_ratio()).build();
        let mut rng = StdRng::seed_from_u64(42);
        let mut stats = RenderStats::default();

        let top = render_pixel(&camera, &world, 1, 0, &config, &mut rng, &mut stats);
        let bottom = render_pixel(&camera, &world, 1, 3, &config, &mut rng, &mut stats);

        assert!(top.x < bottom.x, "top={top} bottom={bottom}");
        assert_eq!(stats.samples, 16);
        assert_eq!(stats.escaped, 16);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let world = single(Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))));
        let config = RenderConfig {
            width: 10,
            height: 10,
            samples_per_pixel: 4,
            max_depth: 5,
            ..RenderConfig::default()
        };
        let camera = Camera::builder().with_aspect_ratio(1.0).build();
        let mut rng = StdRng::seed_from_u64(42);
        let mut stats = RenderStats::default();

        let color = render_pixel(&camera, &world, 5, 5, &config, &mut rng, &mut stats);
        assert!(color.length() > 0.0);
        assert!(stats.bounces >= 4);
    }

    #[test]
    fn test_render_rejects_invalid_config() {
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..RenderConfig::default()
        };
        let result = render(&Camera::default(), &HittableList::new(), &config);
        assert!(matches!(result, Err(ConfigError::NoSamples)));
    }

    #[test]
    fn test_image_buffer_rows() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(1, 0, Color::ONE);
        assert_eq!(image.pixels[1], Color::ONE);
        assert_eq!(image.to_rgb8(), vec![0, 0, 0, 255, 255, 255, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_image_offset_past_u32_range() {
        // Zero rows keeps the allocation empty while the width is large
        let image = ImageBuffer::new(100_000, 0);
        assert_eq!(image.offset(7, 50_000), 5_000_000_007);
        assert!(image.pixels.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside image")]
    fn test_render_pixel_rejects_row_past_bottom() {
        let config = RenderConfig {
            width: 4,
            height: 4,
            samples_per_pixel: 1,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = RenderStats::default();
        render_pixel(
            &Camera::default(),
            &HittableList::new(),
            0,
            4,
            &config,
            &mut rng,
            &mut stats,
        );
    }
}
