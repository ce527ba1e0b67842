//! Magnetic-field collaborator interface.
//!
//! Field models live outside this crate; the propagation core only needs a
//! pure, thread-safe sampling function. A trivial uniform field is provided
//! for tests, benchmarks and demos.

use crate::phase::Vec3;

/// Source of magnetic-field samples.
///
/// Implementations must be pure functions of position: the engine samples
/// the field once per Runge-Kutta stage per trial step, possibly from many
/// worker threads at once, and must observe a consistent field throughout.
pub trait MagneticField: Sync {
    /// Field vector at `position` (T).
    fn field_at(&self, position: &Vec3) -> Vec3;
}

/// Homogeneous field: the same vector at every position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformMagneticField {
    value: Vec3,
}

impl UniformMagneticField {
    /// Create a uniform field with the given vector (T).
    pub fn new(value: Vec3) -> Self {
        Self { value }
    }
}

impl MagneticField for UniformMagneticField {
    fn field_at(&self, _position: &Vec3) -> Vec3 {
        self.value
    }
}

impl<F> MagneticField for F
where
    F: Fn(&Vec3) -> Vec3 + Sync,
{
    fn field_at(&self, position: &Vec3) -> Vec3 {
        self(position)
    }
}
