//! Solver for the compressibility-factor form of the Peng-Robinson equation.
//!
//! In terms of the dimensionless parameters A and B the equation of state
//! becomes a cubic in the compressibility factor,
//! $$Z^3+(B-1)Z^2+(A-3B^2-2B)Z+(B^3+B^2-AB)=0,$$
//! with one or three real roots depending on the discriminant.

use crate::errors::{EosError, EosResult};
use std::f64::consts::PI;

/// Phase designation used to select the compressibility-factor root.
///
/// The smallest admissible root is treated as liquid-like, the largest as
/// vapor-like. This is the conventional branch selection for cubic equations
/// of state, not a phase stability criterion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    Vapor,
}

/// All real roots of the compressibility-factor cubic, sorted ascending.
pub fn real_roots(a_red: f64, b_red: f64) -> Vec<f64> {
    let c2 = b_red - 1.0;
    let c1 = a_red - 3.0 * b_red * b_red - 2.0 * b_red;
    let c0 = b_red.powi(3) + b_red.powi(2) - a_red * b_red;

    // depressed cubic t³ + pt + q with Z = t - c2/3
    let shift = c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = 2.0 * c2.powi(3) / 27.0 - c2 * c1 / 3.0 + c0;
    let discriminant = (q / 2.0).powi(2) + (p / 3.0).powi(3);

    if discriminant > 0.0 {
        let sq = discriminant.sqrt();
        vec![(-q / 2.0 + sq).cbrt() + (-q / 2.0 - sq).cbrt() - shift]
    } else {
        // three real roots (Viète); p <= 0 holds whenever the discriminant does not exceed 0
        let m = (-p / 3.0).sqrt();
        if m == 0.0 {
            return vec![-shift; 3];
        }
        let theta = (3.0 * q / (2.0 * p * m)).clamp(-1.0, 1.0).acos();
        let mut roots: Vec<f64> = (0..3)
            .map(|k| 2.0 * m * (theta / 3.0 - 2.0 * PI * k as f64 / 3.0).cos() - shift)
            .collect();
        roots.sort_by(f64::total_cmp);
        roots
    }
}

/// Compressibility factor of the requested phase branch.
///
/// Only roots with Z > B describe a state with positive free volume. Among
/// those the smallest is returned for [Phase::Liquid] and the largest for
/// [Phase::Vapor].
pub fn z_factor(a_red: f64, b_red: f64, phase: Phase) -> EosResult<f64> {
    let roots = real_roots(a_red, b_red);
    let mut admissible = roots.into_iter().filter(|&z| z > b_red);
    match phase {
        Phase::Liquid => admissible.next(),
        Phase::Vapor => admissible.last(),
    }
    .ok_or_else(|| EosError::IterationFailed(String::from("cubic root selection")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn residual(z: f64, a_red: f64, b_red: f64) -> f64 {
        z.powi(3)
            + (b_red - 1.0) * z.powi(2)
            + (a_red - 3.0 * b_red * b_red - 2.0 * b_red) * z
            + b_red.powi(3) + b_red.powi(2) - a_red * b_red
    }

    #[test]
    fn ideal_gas_limit() {
        // A = B = 0 factorizes to Z²(Z-1)
        let roots = real_roots(0.0, 0.0);
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(roots[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(roots[2], 1.0, max_relative = 1e-12);
        assert_relative_eq!(
            z_factor(0.0, 0.0, Phase::Vapor).unwrap(),
            1.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn single_root_region() {
        // supercritical methane at 50 bar and 250 K
        let (a_red, b_red) = (0.257317179576624, 0.06447252173913043);
        let roots = real_roots(a_red, b_red);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(residual(roots[0], a_red, b_red), 0.0, epsilon = 1e-10);
        assert_relative_eq!(roots[0], 0.81112764, max_relative = 1e-7);
        // both branches collapse onto the same root
        let zl = z_factor(a_red, b_red, Phase::Liquid).unwrap();
        let zv = z_factor(a_red, b_red, Phase::Vapor).unwrap();
        assert_eq!(zl, zv);
    }

    #[test]
    fn three_root_region() {
        // propane at 5 bar and 300 K
        let (a_red, b_red) = (0.091940, 0.011288);
        let roots = real_roots(a_red, b_red);
        assert_eq!(roots.len(), 3);
        for &z in &roots {
            assert_relative_eq!(residual(z, a_red, b_red), 0.0, epsilon = 1e-10);
        }
        assert!(roots[0] < roots[1] && roots[1] < roots[2]);

        let zl = z_factor(a_red, b_red, Phase::Liquid).unwrap();
        let zv = z_factor(a_red, b_red, Phase::Vapor).unwrap();
        assert_eq!(zl, roots[0]);
        assert_eq!(zv, roots[2]);
        assert!(zl > b_red);
        assert!(zv < 1.0);
    }

    #[test]
    fn roots_match_reference_values() {
        // reference roots from an independent polynomial solver
        let (a_red, b_red) = (0.091940, 0.011288);
        let roots = real_roots(a_red, b_red);
        for (z, reference) in roots.iter().zip([0.01747776, 0.05687799, 0.91435625]) {
            assert_relative_eq!(*z, reference, epsilon = 1e-7);
        }
    }
}
