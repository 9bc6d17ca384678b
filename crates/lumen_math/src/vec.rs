//! Helpers layered on top of `glam::Vec3`.
//!
//! `Vec3` doubles as point, direction and color. Nothing here guards against
//! degenerate input: normalizing a zero vector yields NaN components, which
//! then propagate like any other floating-point result.

use glam::Vec3;

/// Extra accessors for `Vec3` in its point/direction/color roles.
pub trait Vec3Ext {
    /// Squared Euclidean length.
    fn squared_length(self) -> f32;

    /// `self / self.length()`. NaN for the zero vector.
    fn unit_vector(self) -> Vec3;

    /// Red channel (alias of `x`).
    fn r(self) -> f32;
    /// Green channel (alias of `y`).
    fn g(self) -> f32;
    /// Blue channel (alias of `z`).
    fn b(self) -> f32;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn squared_length(self) -> f32 {
        self.length_squared()
    }

    #[inline]
    fn unit_vector(self) -> Vec3 {
        self / self.length()
    }

    #[inline]
    fn r(self) -> f32 {
        self.x
    }

    #[inline]
    fn g(self) -> f32 {
        self.y
    }

    #[inline]
    fn b(self) -> f32 {
        self.z
    }
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v.unit_vector()
}
