//! Butcher tableaus for embedded explicit Runge-Kutta pairs.
//!
//! Coefficients for the 6-stage embedded RK5(4) pair from:
//! Cash, J.R. & Karp, A.H. (1990). "A variable order Runge-Kutta method
//! for initial value problems with rapidly varying right-hand sides".
//! ACM Transactions on Mathematical Software 16(3), 201-222.
//!
//! The pair provides a 5th-order solution with a 4th-order embedded
//! method for error estimation and adaptive step control.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of stages in the Cash-Karp 5(4) method.
pub const CASH_KARP_STAGES: usize = 6;

/// Order of the higher-order solution (used for advancing the state).
pub const CASH_KARP_ORDER: u8 = 5;

/// Order of the embedded solution (used for error estimation).
pub const CASH_KARP_EMBEDDED_ORDER: u8 = 4;

/// Node coefficients (c_i) - the stage time fractions.
/// c[i] represents t_n + c[i]*h
const CK_C: [f64; CASH_KARP_STAGES] = [
    0.0,       // c[0]
    1.0 / 5.0, // c[1]
    3.0 / 10.0, // c[2]
    3.0 / 5.0, // c[3]
    1.0,       // c[4]
    7.0 / 8.0, // c[5]
];

/// Runge-Kutta matrix (a_ij) coefficients, lower triangular:
/// k_i = f(t_n + c_i*h, y_n + h * sum_{j<i} a_{i,j} * k_j)
const CK_A: [[f64; CASH_KARP_STAGES - 1]; CASH_KARP_STAGES] = [
    // Row 0: k_0 = f(t_n, y_n)
    [0.0; 5],
    // Row 1
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    // Row 2
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    // Row 3
    [3.0 / 10.0, -9.0 / 10.0, 6.0 / 5.0, 0.0, 0.0],
    // Row 4
    [-11.0 / 54.0, 5.0 / 2.0, -70.0 / 27.0, 35.0 / 27.0, 0.0],
    // Row 5
    [
        1631.0 / 55296.0,
        175.0 / 512.0,
        575.0 / 13824.0,
        44275.0 / 110592.0,
        253.0 / 4096.0,
    ],
];

/// Weights for the 5th-order solution (b_i):
/// y_{n+1} = y_n + h * sum_i b[i] * k_i
const CK_B: [f64; CASH_KARP_STAGES] = [
    37.0 / 378.0,
    0.0,
    250.0 / 621.0,
    125.0 / 594.0,
    0.0,
    512.0 / 1771.0,
];

/// Weights for the embedded 4th-order solution (b*_i):
/// y*_{n+1} = y_n + h * sum_i b_star[i] * k_i
const CK_B_STAR: [f64; CASH_KARP_STAGES] = [
    2825.0 / 27648.0,
    0.0,
    18575.0 / 48384.0,
    13525.0 / 55296.0,
    277.0 / 14336.0,
    1.0 / 4.0,
];

/// Named coefficient presets for the embedded Runge-Kutta engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableauPreset {
    /// The classic Cash-Karp 5(4) embedded pair.
    CashKarp54,
}

impl FromStr for TableauPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash-karp54" => Ok(Self::CashKarp54),
            other => Err(ConfigError::UnknownTableau(other.to_string())),
        }
    }
}

/// Coefficient set defining one embedded explicit Runge-Kutta pair.
///
/// Built once from a named preset and immutable thereafter; loading a new
/// preset fully replaces the coefficient tables.
#[derive(Debug, Clone)]
pub struct ButcherTableau {
    pub(crate) c: Vec<f64>,
    /// Lower-triangular stage coefficients: row i holds a[i][j] for j < i.
    pub(crate) a: Vec<Vec<f64>>,
    pub(crate) b: Vec<f64>,
    pub(crate) b_star: Vec<f64>,
}

impl ButcherTableau {
    /// Populate all coefficient tables from a named preset.
    pub fn from_preset(preset: TableauPreset) -> Self {
        match preset {
            TableauPreset::CashKarp54 => Self {
                c: CK_C.to_vec(),
                a: CK_A
                    .iter()
                    .enumerate()
                    .map(|(i, row)| row[..i].to_vec())
                    .collect(),
                b: CK_B.to_vec(),
                b_star: CK_B_STAR.to_vec(),
            },
        }
    }

    /// Number of stages.
    pub fn stages(&self) -> usize {
        self.b.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn preset_parses_by_name() {
        assert_eq!(
            "cash-karp54".parse::<TableauPreset>().unwrap(),
            TableauPreset::CashKarp54
        );
        assert!("dormand-prince87".parse::<TableauPreset>().is_err());
    }

    #[test]
    fn cash_karp_weights_are_consistent() {
        let tableau = ButcherTableau::from_preset(TableauPreset::CashKarp54);
        assert_eq!(tableau.stages(), CASH_KARP_STAGES);

        let b_sum: f64 = tableau.b.iter().sum();
        let b_star_sum: f64 = tableau.b_star.iter().sum();
        assert_relative_eq!(b_sum, 1.0, max_relative = 1e-14);
        assert_relative_eq!(b_star_sum, 1.0, max_relative = 1e-14);
    }

    #[test]
    fn cash_karp_row_sums_match_nodes() {
        // For a consistent explicit method each row of a sums to its node:
        // sum_j a[i][j] = c[i]
        let tableau = ButcherTableau::from_preset(TableauPreset::CashKarp54);
        for (i, row) in tableau.a.iter().enumerate() {
            let row_sum: f64 = row.iter().sum();
            assert_relative_eq!(row_sum, tableau.c[i], epsilon = 1e-14);
        }
    }

    #[test]
    fn tableau_is_lower_triangular() {
        let tableau = ButcherTableau::from_preset(TableauPreset::CashKarp54);
        for (i, row) in tableau.a.iter().enumerate() {
            assert_eq!(row.len(), i);
        }
    }
}
