//! Relativistic Lorentz force as a Runge-Kutta right-hand side.

use crate::constants::C_LIGHT;
use crate::field::MagneticField;
use crate::particle::ParticleState;
use crate::phase::PhasePoint;
use crate::solver::OdeSystem;

/// Time derivative in SI units of a phase point,
/// (position, momentum) -> (velocity, force),
/// for a highly relativistic charged particle in a magnetic field.
///
/// Borrows the particle and field for the duration of one driver
/// invocation; it owns neither and is discarded on return.
pub struct LorentzForce<'a, F: ?Sized> {
    particle: &'a ParticleState,
    field: &'a F,
}

impl<'a, F: MagneticField + ?Sized> LorentzForce<'a, F> {
    /// Bind the force functor to a particle and a field.
    pub fn new(particle: &'a ParticleState, field: &'a F) -> Self {
        Self { particle, field }
    }
}

impl<F: MagneticField + ?Sized> OdeSystem<PhasePoint> for LorentzForce<'_, F> {
    fn rhs(&self, _t: f64, y: &PhasePoint) -> PhasePoint {
        // The speed is exactly c; the momentum component only contributes
        // its direction, whatever magnitude the stage left it with.
        let velocity = y.momentum.normalize() * C_LIGHT;
        let b = self.field.field_at(&y.position);
        let force = self.particle.charge() * velocity.cross(&b);
        PhasePoint::new(velocity, force)
    }
}
