//! Phase-space state types advanced by the Runge-Kutta engine.

use std::ops::{Add, Mul, Sub};

use nalgebra as na;

/// 3D vector alias.
pub type Vec3 = na::Vector3<f64>;

/// A vector-space state the embedded Runge-Kutta engine can advance.
///
/// The engine only ever adds states, scales them, and takes their
/// elementwise absolute value (to build error-scale vectors), so anything
/// satisfying these bounds can be integrated.
pub trait OdeState:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// Elementwise absolute value.
    fn abs(&self) -> Self;
}

impl OdeState for Vec3 {
    fn abs(&self) -> Self {
        na::Matrix::abs(self)
    }
}

/// Combined position/momentum state of a single particle.
///
/// The `momentum` component is a direction proxy: intermediate Runge-Kutta
/// stages leave it with arbitrary magnitude, and every consumer renormalizes
/// it to unit length before using it as a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePoint {
    /// Position (m).
    pub position: Vec3,
    /// Momentum (kg·m/s).
    pub momentum: Vec3,
}

impl PhasePoint {
    /// Create a phase point from position and momentum.
    pub fn new(position: Vec3, momentum: Vec3) -> Self {
        Self { position, momentum }
    }

    /// The zero phase point.
    pub fn zeros() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros())
    }
}

impl Add for PhasePoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.position + rhs.position, self.momentum + rhs.momentum)
    }
}

impl Sub for PhasePoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.position - rhs.position, self.momentum - rhs.momentum)
    }
}

impl Mul<f64> for PhasePoint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.position * rhs, self.momentum * rhs)
    }
}

impl OdeState for PhasePoint {
    fn abs(&self) -> Self {
        Self::new(self.position.abs(), self.momentum.abs())
    }
}
