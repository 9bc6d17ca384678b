//! Thin-lens camera for primary ray generation.

use crate::sampling::random_in_unit_disk;
use crate::Ray;
use lumen_math::{Vec3, Vec3Ext};
use rand::RngCore;

/// Settings a [`Camera`] is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBuilder {
    look_from: Vec3,
    look_at: Vec3,
    world_up: Vec3,

    vfov: f32,         // Vertical field of view in degrees, top to bottom
    aspect_ratio: f32, // Width / height
    aperture: f32,     // Lens diameter; 0 is a pinhole
    focus_dist: f32,   // Distance from camera to plane of perfect focus
}

impl CameraBuilder {
    /// Pinhole camera at the origin looking down -Z with a 90 degree field of view.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            world_up: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 2.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, world_up: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.world_up = world_up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Derive the camera basis and image plane.
    pub fn build(&self) -> Camera {
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;
        let focus = self.focus_dist;

        let origin = self.look_from;
        let backward = (self.look_from - self.look_at).unit_vector();
        let right = self.world_up.cross(backward).unit_vector();
        let up = backward.cross(right);

        Camera {
            origin,
            lower_left_corner: origin
                - half_width * focus * right
                - half_height * focus * up
                - focus * backward,
            horizontal: 2.0 * half_width * focus * right,
            vertical: 2.0 * half_height * focus * up,
            right,
            up,
            backward,
            lens_radius: self.aperture / 2.0,
        }
    }
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    right: Vec3,
    up: Vec3,
    backward: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Start configuring a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::new()
    }

    /// Generate a ray through normalized image-plane coordinates.
    ///
    /// `s` runs left to right and `t` bottom to top, both in [0, 1]. With a
    /// non-zero aperture the origin is jittered across the lens, so only points
    /// on the focus plane stay sharp.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.right * rd.x + self.up * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraBuilder::new().build()
    }
}
