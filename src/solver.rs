//! Embedded explicit Runge-Kutta engine.
//!
//! Advances any vector-space state by one trial step and produces both the
//! full-order solution and the embedded lower-order solution, whose
//! difference estimates the local truncation error.

use crate::phase::OdeState;
use crate::tableau::{ButcherTableau, TableauPreset};

/// Right-hand side of an ODE system: dy/dt = f(t, y).
pub trait OdeSystem<Y: OdeState> {
    /// Evaluate the derivative at time `t` and state `y`.
    fn rhs(&self, t: f64, y: &Y) -> Y;
}

/// Result of a single trial step.
///
/// Ephemeral: recomputed on every rejection cycle, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct TrialStep<Y> {
    /// Full-order solution.
    pub y_out: Y,
    /// Embedded lower-order solution.
    pub y_embedded: Y,
    /// Local error estimate, `y_out - y_embedded`.
    pub y_err: Y,
}

/// Embedded explicit Runge-Kutta stepper parameterized by a Butcher tableau.
///
/// The tableau is loaded once at construction and read-only afterwards, so a
/// single engine can be shared across worker threads integrating independent
/// particles. `step` keeps no state between calls.
#[derive(Debug, Clone)]
pub struct EmbeddedRungeKutta {
    tableau: ButcherTableau,
}

impl EmbeddedRungeKutta {
    /// Create an engine from a named tableau preset.
    pub fn new(preset: TableauPreset) -> Self {
        Self {
            tableau: ButcherTableau::from_preset(preset),
        }
    }

    /// Replace the active coefficient set with another preset.
    ///
    /// The previous tableau is discarded wholesale; there is no partial
    /// update.
    pub fn load(&mut self, preset: TableauPreset) {
        self.tableau = ButcherTableau::from_preset(preset);
    }

    /// The active coefficient set.
    pub fn tableau(&self) -> &ButcherTableau {
        &self.tableau
    }

    /// Perform one trial step of size `h` from `y_in` at time `t`.
    ///
    /// Stage derivatives are accumulated strictly from previously computed
    /// stages (explicit method):
    /// `k_i = f(t + c_i*h, y_in + h * sum_{j<i} a_ij * k_j)`,
    /// then `y_out = y_in + h * sum b_i k_i` and
    /// `y_embedded = y_in + h * sum b*_i k_i`.
    ///
    /// `y_in` is not mutated. `h` must be finite and nonzero; the caller
    /// guards this.
    pub fn step<Y, S>(&self, sys: &S, t: f64, y_in: &Y, h: f64) -> TrialStep<Y>
    where
        Y: OdeState,
        S: OdeSystem<Y>,
    {
        debug_assert!(
            h.is_finite() && h != 0.0,
            "trial step must be finite and nonzero"
        );

        let stages = self.tableau.stages();
        let mut k: Vec<Y> = Vec::with_capacity(stages);

        for i in 0..stages {
            let mut y_stage = *y_in;
            for (j, k_j) in k.iter().enumerate().take(i) {
                y_stage = y_stage + *k_j * (h * self.tableau.a[i][j]);
            }
            k.push(sys.rhs(t + self.tableau.c[i] * h, &y_stage));
        }

        let mut y_out = *y_in;
        let mut y_embedded = *y_in;
        for (i, k_i) in k.iter().enumerate() {
            y_out = y_out + *k_i * (h * self.tableau.b[i]);
            y_embedded = y_embedded + *k_i * (h * self.tableau.b_star[i]);
        }

        TrialStep {
            y_out,
            y_embedded,
            y_err: y_out - y_embedded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Vec3;
    use approx::assert_relative_eq;

    /// Uniform rotation about a fixed axis: y' = omega x y.
    struct Rotation {
        omega: Vec3,
    }

    impl OdeSystem<Vec3> for Rotation {
        fn rhs(&self, _t: f64, y: &Vec3) -> Vec3 {
            self.omega.cross(y)
        }
    }

    /// Exponential decay: y' = -y.
    struct Decay;

    impl OdeSystem<Vec3> for Decay {
        fn rhs(&self, _t: f64, y: &Vec3) -> Vec3 {
            *y * -1.0
        }
    }

    #[test]
    fn single_step_matches_exponential_decay() {
        let erk = EmbeddedRungeKutta::new(TableauPreset::CashKarp54);
        let y0 = Vec3::new(1.0, 2.0, -3.0);
        let h = 0.05;

        let trial = erk.step(&Decay, 0.0, &y0, h);
        let exact = y0 * (-h).exp();

        assert_relative_eq!(trial.y_out.x, exact.x, max_relative = 1e-9);
        assert_relative_eq!(trial.y_out.y, exact.y, max_relative = 1e-9);
        assert_relative_eq!(trial.y_out.z, exact.z, max_relative = 1e-9);
    }

    #[test]
    fn error_estimate_is_solution_difference() {
        let erk = EmbeddedRungeKutta::new(TableauPreset::CashKarp54);
        let sys = Rotation {
            omega: Vec3::new(0.0, 0.0, 1.0),
        };
        let y0 = Vec3::new(1.0, 0.0, 0.0);

        let trial = erk.step(&sys, 0.0, &y0, 0.3);
        let diff = trial.y_out - trial.y_embedded;
        assert_eq!(trial.y_err, diff);
    }

    #[test]
    fn step_does_not_mutate_input_and_is_deterministic() {
        let erk = EmbeddedRungeKutta::new(TableauPreset::CashKarp54);
        let sys = Rotation {
            omega: Vec3::new(0.0, 0.0, 2.0),
        };
        let y0 = Vec3::new(0.0, 1.0, 0.0);

        let first = erk.step(&sys, 0.0, &y0, 0.1);
        let second = erk.step(&sys, 0.0, &y0, 0.1);
        assert_eq!(y0, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(first.y_out, second.y_out);
        assert_eq!(first.y_err, second.y_err);
    }

    #[test]
    fn local_truncation_error_is_fifth_order() {
        // Single-step h-refinement on uniform rotation. For a 5th-order
        // method the local error scales as h^6, so err(h)/err(h/2) should
        // approach 2^6 = 64. Broad band to absorb higher-order terms.
        let erk = EmbeddedRungeKutta::new(TableauPreset::CashKarp54);
        let sys = Rotation {
            omega: Vec3::new(0.0, 0.0, 1.0),
        };
        let y0 = Vec3::new(1.0, 0.0, 0.0);

        let exact = |h: f64| Vec3::new(h.cos(), h.sin(), 0.0);

        let step_sizes = [0.4, 0.2, 0.1];
        let errors: Vec<f64> = step_sizes
            .iter()
            .map(|&h| {
                let trial = erk.step(&sys, 0.0, &y0, h);
                (trial.y_out - exact(h)).norm()
            })
            .collect();

        for pair in errors.windows(2) {
            let ratio = pair[0] / pair[1];
            assert!(
                ratio > 32.0 && ratio < 128.0,
                "error ratio {ratio:.1} outside [32, 128]"
            );
        }
    }

    #[test]
    fn reloading_a_preset_replaces_coefficients() {
        let mut erk = EmbeddedRungeKutta::new(TableauPreset::CashKarp54);
        let y0 = Vec3::new(1.0, 1.0, 1.0);
        let before = erk.step(&Decay, 0.0, &y0, 0.1);
        erk.load(TableauPreset::CashKarp54);
        let after = erk.step(&Decay, 0.0, &y0, 0.1);
        assert_eq!(before.y_out, after.y_out);
        assert_eq!(erk.tableau().stages(), 6);
    }
}
