use crate::errors::{EosError, EosResult};
use itertools::izip;
use ndarray::Array1;

const MAX_ITER_RR: usize = 200;
const ABS_TOL_RR: f64 = 1e-10;

/// Solve the Rachford-Rice equation
/// $$\sum_i\frac{z_i(K_i-1)}{1+V(K_i-1)}=0$$
/// for the vapor molar fraction V by bisection.
///
/// The objective has poles at 1/(1-Kᵢ); the root is bracketed between the
/// poles of the largest and smallest equilibrium ratio, with both bounds
/// nudged inward to keep the denominators away from zero. Requires
/// min(K) < 1 < max(K), otherwise no phase split exists and the feed
/// composition is a trivial root of the mass balance.
pub(crate) fn rachford_rice(feed: &Array1<f64>, k: &Array1<f64>) -> EosResult<f64> {
    let k_max = k.iter().fold(f64::MIN, |acc, &ki| acc.max(ki));
    let k_min = k.iter().fold(f64::MAX, |acc, &ki| acc.min(ki));
    if !(k_min < 1.0 && 1.0 < k_max) {
        return Err(EosError::IterationFailed(String::from("rachford_rice")));
    }

    let mut v_min = 1.0 / (1.0 - k_max);
    let mut v_max = 1.0 / (1.0 - k_min);
    v_min += v_min.abs() * 1e-6;
    v_max -= v_max.abs() * 1e-6;

    let g = |v: f64| {
        izip!(feed.iter(), k.iter())
            .map(|(&zi, &ki)| zi * (ki - 1.0) / (1.0 + v * (ki - 1.0)))
            .sum::<f64>()
    };

    // the objective decreases monotonically between the two poles
    if !(g(v_min) > 0.0 && g(v_max) < 0.0) {
        return Err(EosError::IterationFailed(String::from("rachford_rice")));
    }

    for _ in 0..MAX_ITER_RR {
        let v = 0.5 * (v_min + v_max);
        let g_mid = g(v);
        if g_mid == 0.0 || v_max - v_min < ABS_TOL_RR {
            return Ok(v);
        }
        if g_mid > 0.0 {
            v_min = v;
        } else {
            v_max = v;
        }
    }
    Ok(0.5 * (v_min + v_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn symmetric_binary() {
        // for K = [2, 1/2] and an equimolar feed the root is V = 1/2
        let v = rachford_rice(&arr1(&[0.5, 0.5]), &arr1(&[2.0, 0.5])).unwrap();
        assert_relative_eq!(v, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn root_stays_inside_the_nudged_bracket() {
        // equilibrium ratios barely straddling unity stretch the bracket
        // far beyond [0, 1]
        let feed = arr1(&[0.5, 0.5]);
        let k = arr1(&[1.001, 0.999]);
        let v = rachford_rice(&feed, &k).unwrap();
        assert!(v.is_finite());
        assert!(v > 1.0 / (1.0 - 1.001) && v < 1.0 / (1.0 - 0.999));
        assert_relative_eq!(v, 0.0, epsilon = 1e-8);
    }

    #[test]
    fn rejects_one_sided_equilibrium_ratios() {
        let feed = arr1(&[0.5, 0.5]);
        assert!(rachford_rice(&feed, &arr1(&[2.0, 1.5])).is_err());
        assert!(rachford_rice(&feed, &arr1(&[0.9, 0.5])).is_err());
    }

    #[test]
    fn solution_satisfies_the_objective() {
        let feed = arr1(&[0.6, 0.3, 0.1]);
        let k = arr1(&[18.0, 0.99, 0.11]);
        let v = rachford_rice(&feed, &k).unwrap();
        let g: f64 = izip!(feed.iter(), k.iter())
            .map(|(&zi, &ki)| zi * (ki - 1.0) / (1.0 + v * (ki - 1.0)))
            .sum();
        assert_relative_eq!(g, 0.0, epsilon = 1e-8);
    }
}
