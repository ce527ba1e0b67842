//! Particle bookkeeping records mutated in place by the propagation driver.

use crate::constants::{C_LIGHT, ELEMENTARY_CHARGE};
use crate::phase::Vec3;

/// Kinematic state of a single ultrarelativistic charged particle.
///
/// The particle moves at exactly the speed of light; its energy is constant
/// during a propagation step and only the direction of motion evolves.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    charge_number: i32,
    energy: f64,
    position: Vec3,
    direction: Vec3,
}

impl ParticleState {
    /// Create a particle state. `direction` is normalized on the way in.
    pub fn new(charge_number: i32, energy: f64, position: Vec3, direction: Vec3) -> Self {
        Self {
            charge_number,
            energy,
            position,
            direction: direction.normalize(),
        }
    }

    /// Signed charge number (units of the elementary charge).
    pub fn charge_number(&self) -> i32 {
        self.charge_number
    }

    /// Electric charge (C).
    pub fn charge(&self) -> f64 {
        f64::from(self.charge_number) * ELEMENTARY_CHARGE
    }

    /// Total energy (J).
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Position (m).
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Overwrite the position (m).
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Unit direction of motion.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Overwrite the direction of motion; the stored vector is normalized
    /// to unit length.
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize();
    }

    /// Momentum vector (kg·m/s), `direction * E / c` for a particle moving
    /// at the speed of light.
    pub fn momentum(&self) -> Vec3 {
        self.direction * (self.energy / C_LIGHT)
    }
}

/// A particle record plus the step-scheduling state it shares with the
/// surrounding pipeline.
///
/// `next_step` is shared mutable scheduling state: the deflection driver
/// reads it as the initial trial length and writes back its prediction,
/// while sibling processes may shrink it between invocations to claim a
/// smaller step. Both step fields are physical lengths (m).
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Current particle state, updated in place by each accepted step.
    pub current: ParticleState,
    last_step: f64,
    next_step: f64,
}

impl Candidate {
    /// Create a candidate with an initial suggested step length (m).
    pub fn new(current: ParticleState, next_step: f64) -> Self {
        Self {
            current,
            last_step: 0.0,
            next_step,
        }
    }

    /// Length of the last accepted step (m).
    pub fn last_step(&self) -> f64 {
        self.last_step
    }

    /// Record the length of the last accepted step (m).
    pub fn set_last_step(&mut self, last_step: f64) {
        self.last_step = last_step;
    }

    /// Suggested length for the next step (m).
    pub fn next_step(&self) -> f64 {
        self.next_step
    }

    /// Overwrite the suggested next step length (m).
    pub fn set_next_step(&mut self, next_step: f64) {
        self.next_step = next_step;
    }

    /// Shrink the suggested next step to at most `next_step` (m).
    ///
    /// Lets concurrent physics processes claim a smaller step than the one
    /// currently scheduled; a larger value leaves the suggestion untouched.
    pub fn limit_next_step(&mut self, next_step: f64) {
        self.next_step = self.next_step.min(next_step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn momentum_magnitude_is_energy_over_c() {
        let energy = 1.602e-1; // ~1 EeV
        let state = ParticleState::new(1, energy, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(state.momentum().norm(), energy / C_LIGHT, max_relative = 1e-12);
    }

    #[test]
    fn direction_is_stored_normalized() {
        let mut state = ParticleState::new(1, 1.0, Vec3::zeros(), Vec3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(state.direction().norm(), 1.0, max_relative = 1e-12);

        state.set_direction(Vec3::new(0.0, 0.0, -7.0));
        assert_eq!(state.direction(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn charge_scales_with_charge_number() {
        let proton = ParticleState::new(1, 1.0, Vec3::zeros(), Vec3::x());
        let iron = ParticleState::new(26, 1.0, Vec3::zeros(), Vec3::x());
        assert_eq!(iron.charge_number(), 26);
        assert_relative_eq!(iron.charge(), 26.0 * proton.charge(), max_relative = 1e-12);
    }

    #[test]
    fn limit_next_step_only_shrinks() {
        let state = ParticleState::new(1, 1.0, Vec3::zeros(), Vec3::x());
        let mut candidate = Candidate::new(state, 100.0);

        candidate.limit_next_step(250.0);
        assert_eq!(candidate.next_step(), 100.0);

        candidate.limit_next_step(40.0);
        assert_eq!(candidate.next_step(), 40.0);
    }
}
