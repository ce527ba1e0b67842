//! Physical constants and unit helpers.
//!
//! All values in SI units. Lengths handled by the propagation driver are
//! meters; the driver converts between distance and time steps via the
//! speed of light.

/// Speed of light (m/s).
pub const C_LIGHT: f64 = 299_792_458.0;

/// Elementary charge (C).
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// One electron volt (J).
pub const ELECTRON_VOLT: f64 = 1.602_176_634e-19;

/// One exa-electron-volt (J), the typical energy scale of ultra-high-energy
/// cosmic rays.
pub const EXA_ELECTRON_VOLT: f64 = 1e18 * ELECTRON_VOLT;

/// One gauss (T).
pub const GAUSS: f64 = 1e-4;

/// One microgauss (T), the order of magnitude of galactic magnetic fields.
pub const MICRO_GAUSS: f64 = 1e-6 * GAUSS;

/// One parsec (m).
pub const PARSEC: f64 = 3.085_677_581_491_367e16;

/// One kiloparsec (m).
pub const KILO_PARSEC: f64 = 1e3 * PARSEC;

/// One megaparsec (m).
pub const MEGA_PARSEC: f64 = 1e6 * PARSEC;
