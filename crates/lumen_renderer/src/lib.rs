//! Lumen - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! surfaces, lit by a sky gradient.

mod bucket;
mod camera;
mod config;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod sphere;

pub use bucket::{bucket_seed, generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraBuilder};
pub use config::{ConfigError, RenderConfig, MAX_DEPTH, SAMPLES_PER_PIXEL};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{reflect, refract, schlick, Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, trace_path,
    ImageBuffer, PathSample, RenderOutput, RenderStats, Termination, HIT_RANGE,
};
pub use sampling::{gen_f32, random_in_unit_disk, random_in_unit_sphere};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3, Vec3Ext};
