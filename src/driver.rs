//! Step-size-controlled magnetic deflection of charged particles.
//!
//! The driver produces one accepted integration step per invocation,
//! shrinking the trial step until the local error estimate is within
//! tolerance, and writes the result back onto the candidate record.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::C_LIGHT;
use crate::error::ConfigError;
use crate::field::MagneticField;
use crate::force::LorentzForce;
use crate::particle::Candidate;
use crate::phase::{OdeState, PhasePoint};
use crate::solver::{EmbeddedRungeKutta, OdeSystem};
use crate::tableau::TableauPreset;

/// Error-norm strategy deciding whether a trial step is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlMode {
    /// Accept every trial unconditionally; the suggested step never changes.
    None,
    /// Largest scaled component of the direction error.
    WorstOffender,
    /// Root mean square of the scaled direction-error components.
    Rms,
}

/// Declarative driver configuration, typically loaded from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionConfig {
    /// Error-norm strategy.
    pub control: ControlMode,
    /// Relative error tolerance (dimensionless, strictly positive).
    pub tolerance: f64,
    /// Named tableau preset, e.g. `cash-karp54`.
    pub tableau: String,
}

/// Safety factor pulling the prediction toward r = 1 from below.
const SAFETY: f64 = 0.95;
/// Step-prediction exponent, -1/(order) for a 5th-order pair.
const ERROR_EXPONENT: f64 = -0.2;
/// Largest step shrink factor allowed in one cycle.
const MIN_STEP_FACTOR: f64 = 0.1;
/// Largest step growth factor allowed in one cycle.
const MAX_STEP_FACTOR: f64 = 5.0;

/// Magnetic-deflection propagator.
///
/// Holds the embedded Runge-Kutta engine, the error tolerance and the
/// control mode. Immutable after construction: `apply` takes `&self`, so a
/// single instance can serve many worker threads, each owning its own
/// candidate record for the duration of a call.
#[derive(Debug, Clone)]
pub struct Deflection {
    erk: EmbeddedRungeKutta,
    control: ControlMode,
    tolerance: f64,
}

impl Deflection {
    /// Create a deflection driver.
    ///
    /// Fails if `tolerance` is not finite and strictly positive; an invalid
    /// configuration must abort before any simulation work begins.
    pub fn new(
        control: ControlMode,
        tolerance: f64,
        preset: TableauPreset,
    ) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        debug!(?control, tolerance, ?preset, "deflection driver ready");
        Ok(Self {
            erk: EmbeddedRungeKutta::new(preset),
            control,
            tolerance,
        })
    }

    /// Create a driver from a declarative configuration.
    pub fn from_config(config: &DeflectionConfig) -> Result<Self, ConfigError> {
        let preset: TableauPreset = config.tableau.parse()?;
        Self::new(config.control, config.tolerance, preset)
    }

    /// The configured control mode.
    pub fn control(&self) -> ControlMode {
        self.control
    }

    /// The configured error tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Propagate `candidate` through `field` by one accepted step.
    ///
    /// Reads the particle's position, direction and suggested step length,
    /// runs trial steps until one passes the error test, then mutates the
    /// candidate in place: new position, renormalized direction, the
    /// accepted step in `last_step` and the prediction in `next_step`
    /// (both converted back to physical lengths).
    pub fn apply<F: MagneticField + ?Sized>(&self, candidate: &mut Candidate, field: &F) {
        let y_in = PhasePoint::new(candidate.current.position(), candidate.current.momentum());
        let mut h_next = candidate.next_step() / C_LIGHT;

        let (y_out, h_try, h_next) = {
            let dydt = LorentzForce::new(&candidate.current, field);
            // Scale to compare the error against: state magnitude plus a
            // forward-Euler estimate of the change over one step.
            let y_scale = (y_in.abs() + dydt.rhs(0.0, &y_in).abs() * h_next) * self.tolerance;

            let mut h_try;
            let mut trial;
            loop {
                h_try = h_next;
                trial = self.erk.step(&dydt, 0.0, &y_in, h_try);

                if self.control == ControlMode::None {
                    break;
                }

                let r = self.error_ratio(&trial.y_err, &y_scale);
                // Keep r close to one for efficient integration; a single
                // cycle may change the step by at most [0.1, 5] times.
                h_next = (h_try * SAFETY * r.powf(ERROR_EXPONENT))
                    .clamp(MIN_STEP_FACTOR * h_try, MAX_STEP_FACTOR * h_try);

                if r > 1.0 {
                    trace!(r, h_try, h_next, "trial step rejected");
                    continue;
                }
                break;
            }
            (trial.y_out, h_try, h_next)
        };

        candidate.current.set_position(y_out.position);
        candidate.current.set_direction(y_out.momentum.normalize());
        candidate.set_last_step(h_try * C_LIGHT);
        candidate.set_next_step(h_next * C_LIGHT);
    }

    /// Scaled error ratio of one trial step.
    ///
    /// Only the direction-error components enter: direction error amplifies
    /// over many steps, while position error stays geometrically bounded by
    /// the step length. Components whose scale is not above the smallest
    /// positive double are excluded from the norm.
    fn error_ratio(&self, y_err: &PhasePoint, y_scale: &PhasePoint) -> f64 {
        match self.control {
            ControlMode::None => 0.0,
            ControlMode::WorstOffender => {
                let mut r: f64 = 0.0;
                for i in 0..3 {
                    if y_scale.momentum[i] > f64::MIN_POSITIVE {
                        r = r.max((y_err.momentum[i] / y_scale.momentum[i]).abs());
                    }
                }
                r
            }
            ControlMode::Rms => {
                let mut sum = 0.0;
                for i in 0..3 {
                    if y_scale.momentum[i] > f64::MIN_POSITIVE {
                        sum += (y_err.momentum[i] / y_scale.momentum[i]).powi(2);
                    }
                }
                (sum / 3.0).sqrt()
            }
        }
    }
}
