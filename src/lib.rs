//! # gyroprop: adaptive magnetic deflection of relativistic particles
//!
//! An adaptive-step-size, embedded explicit Runge-Kutta engine for
//! integrating the equation of motion of an ultrarelativistic charged
//! particle in a magnetic field.
//!
//! ## Features
//!
//! - 6-stage embedded Cash-Karp 5(4) pair with 4th-order error estimation
//! - Step-size control with three selectable error norms
//!   (none / worst offender / RMS) and a bounded rejection cycle
//! - Engine generic over any vector-space state (add, scale, elementwise
//!   absolute value)
//! - One immutable driver instance serves all particles, including from
//!   concurrent worker threads
//!
//! ## Basic Usage
//!
//! ```rust
//! use gyroprop::constants::{EXA_ELECTRON_VOLT, MICRO_GAUSS};
//! use gyroprop::{
//!     Candidate, ControlMode, Deflection, ParticleState, TableauPreset,
//!     UniformMagneticField, Vec3,
//! };
//!
//! // A 1 EeV proton in a microgauss field.
//! let field = UniformMagneticField::new(Vec3::new(0.0, 0.0, MICRO_GAUSS));
//! let state = ParticleState::new(
//!     1,
//!     EXA_ELECTRON_VOLT,
//!     Vec3::zeros(),
//!     Vec3::new(1.0, 0.0, 0.0),
//! );
//! let mut candidate = Candidate::new(state, 1e19); // initial trial step, m
//!
//! let driver = Deflection::new(ControlMode::Rms, 1e-4, TableauPreset::CashKarp54)?;
//! driver.apply(&mut candidate, &field);
//!
//! assert!(candidate.last_step() > 0.0);
//! # Ok::<(), gyroprop::ConfigError>(())
//! ```
//!
//! ## Step-size control
//!
//! Each `apply` call reads the particle's suggested step, runs trial steps
//! through the embedded pair, and compares the scaled direction error
//! against 1 under the configured norm. Rejected trials shrink the step by
//! the prediction `h * 0.95 * r^(-1/5)`, bounded to `[0.1 h, 5 h]` per
//! cycle; the accepted step and the next prediction are written back onto
//! the candidate for the surrounding pipeline to schedule against.
//!
//! ## Units
//!
//! All quantities are SI: positions and step lengths in meters, energies in
//! joules, fields in tesla. The driver converts between step lengths and
//! time steps via the speed of light.
//!
//! ## References
//!
//! 1. Cash, J.R. & Karp, A.H. (1990). "A variable order Runge-Kutta method
//!    for initial value problems with rapidly varying right-hand sides".
//!    ACM TOMS 16(3).
//!
//! 2. Hairer, E., Nørsett, S.P., & Wanner, G. (1993). "Solving Ordinary
//!    Differential Equations I: Nonstiff Problems". Springer.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod driver;
pub mod error;
pub mod field;
pub mod force;
pub mod particle;
pub mod phase;
pub mod solver;
pub mod tableau;

pub use driver::{ControlMode, Deflection, DeflectionConfig};
pub use error::ConfigError;
pub use field::{MagneticField, UniformMagneticField};
pub use force::LorentzForce;
pub use particle::{Candidate, ParticleState};
pub use phase::{OdeState, PhasePoint, Vec3};
pub use solver::{EmbeddedRungeKutta, OdeSystem, TrialStep};
pub use tableau::{ButcherTableau, TableauPreset};
