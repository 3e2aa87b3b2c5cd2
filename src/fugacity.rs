//! Mixing rules and partial fugacity coefficients for the Peng-Robinson
//! equation of state.

use crate::cubic::{self, Phase};
use crate::errors::{EosError, EosResult};
use crate::parameter::Component;
use ndarray::{Array1, Array2};
use std::f64::consts::SQRT_2;

/// Dimensionless mixture parameters at fixed pressure and temperature.
///
/// The cross parameters follow the van der Waals one-fluid mixing rules with
/// a geometric mean for the attraction term corrected by the binary
/// interaction parameters, and linear mixing for the covolume.
pub(crate) struct MixtureParameters {
    /// cross attraction matrix √(AᵢAⱼ)(1-kᵢⱼ)
    a_ij: Array2<f64>,
    /// dimensionless covolumes
    b_i: Array1<f64>,
}

impl MixtureParameters {
    pub fn new(
        components: &[Component],
        k_ij: &Array2<f64>,
        pressure: f64,
        temperature: f64,
    ) -> Self {
        let n = components.len();
        let params: Vec<_> = components
            .iter()
            .map(|c| c.pr_params(pressure, temperature))
            .collect();
        let a_i = Array1::from_iter(params.iter().map(|p| p.a_red));
        let b_i = Array1::from_iter(params.iter().map(|p| p.b_red));
        let a_ij =
            Array2::from_shape_fn((n, n), |(i, j)| (a_i[i] * a_i[j]).sqrt() * (1.0 - k_ij[(i, j)]));
        Self { a_ij, b_i }
    }

    /// Mixture A and B for the composition x.
    fn mix(&self, x: &Array1<f64>) -> (f64, f64) {
        (x.dot(&self.a_ij.dot(x)), self.b_i.dot(x))
    }

    /// Compressibility factor of the phase with composition x.
    pub fn z_factor(&self, x: &Array1<f64>, phase: Phase) -> EosResult<f64> {
        let (a, b) = self.mix(x);
        cubic::z_factor(a, b, phase)
    }

    /// Partial fugacity coefficients and the compressibility factor of the
    /// phase with composition x.
    pub fn fugacity_coefficients(
        &self,
        x: &Array1<f64>,
        phase: Phase,
    ) -> EosResult<(Array1<f64>, f64)> {
        let (a, b) = self.mix(x);
        let z = cubic::z_factor(a, b, phase)?;
        let ratio = (z + (1.0 + SQRT_2) * b) / (z + (1.0 - SQRT_2) * b);
        if z - b <= 0.0 || ratio <= 0.0 {
            return Err(EosError::IterationFailed(String::from(
                "fugacity coefficients",
            )));
        }
        let ln_ratio = ratio.ln();
        let sum_a = self.a_ij.dot(x);
        let phi = Array1::from_shape_fn(x.len(), |i| {
            let bi_b = self.b_i[i] / b;
            (bi_b * (z - 1.0)
                - (z - b).ln()
                - a / (2.0 * SQRT_2 * b) * (2.0 * sum_a[i] / a - bi_b) * ln_ratio)
                .exp()
        });
        Ok((phi, z))
    }
}
