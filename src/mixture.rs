//! A multi-component mixture with feed composition and binary interaction
//! parameters.

use crate::errors::{EosError, EosResult};
use crate::parameter::Component;
use ndarray::{Array1, Array2, Axis};

/// Feed fractions below this threshold are treated as trace components and
/// removed from the composition.
pub(crate) const TRACE_THRESHOLD: f64 = 1e-4;

/// An ordered list of components together with a feed composition and a
/// matrix of binary interaction parameters.
///
/// The composition is set with [Mixture::set_composition] and normalized to
/// unit sum with trace entries zeroed out. Flash calculations borrow the
/// mixture immutably and return their results by value, so a `Mixture` can be
/// shared between concurrent calculations.
#[derive(Debug, Clone)]
pub struct Mixture {
    components: Vec<Component>,
    molefracs: Array1<f64>,
    k_ij: Array2<f64>,
}

impl Mixture {
    /// Create a new mixture with zero binary interaction parameters and an
    /// unset composition.
    pub fn new(components: Vec<Component>) -> Self {
        let n = components.len();
        Self {
            components,
            molefracs: Array1::zeros(n),
            k_ij: Array2::zeros((n, n)),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Feed mole fractions.
    pub fn molefracs(&self) -> &Array1<f64> {
        &self.molefracs
    }

    /// Binary interaction parameters.
    pub fn binary_parameters(&self) -> &Array2<f64> {
        &self.k_ij
    }

    /// Set the feed composition.
    ///
    /// The input is normalized to unit sum. Entries below the trace threshold
    /// of 1e-4 (after normalization) are set to zero and the composition is
    /// renormalized, so that trace components do not enter the phase split
    /// iteration.
    pub fn set_composition(&mut self, molefracs: &[f64]) -> EosResult<()> {
        if molefracs.len() != self.components.len() {
            return Err(EosError::InvalidComposition(format!(
                "expected {} mole fractions, got {}",
                self.components.len(),
                molefracs.len()
            )));
        }
        if molefracs.iter().any(|&z| z < 0.0) {
            return Err(EosError::InvalidComposition(String::from(
                "mole fractions have to be non-negative",
            )));
        }
        let total: f64 = molefracs.iter().sum();
        if !(total > 0.0) {
            return Err(EosError::InvalidComposition(String::from(
                "mole fractions have to add up to a positive value",
            )));
        }
        let mut z = Array1::from_iter(molefracs.iter().map(|&zi| zi / total));
        z.mapv_inplace(|zi| if zi < TRACE_THRESHOLD { 0.0 } else { zi });
        let remaining = z.sum();
        if !(remaining > 0.0) {
            return Err(EosError::InvalidComposition(String::from(
                "all mole fractions are below the trace threshold",
            )));
        }
        self.molefracs = z / remaining;
        Ok(())
    }

    /// Replace the binary interaction parameters, or reset them to zero.
    ///
    /// The matrix has to be square with one row per component, symmetric,
    /// and zero on the diagonal.
    pub fn set_binary_parameters(&mut self, k_ij: Option<Array2<f64>>) -> EosResult<()> {
        let n = self.components.len();
        let k_ij = match k_ij {
            None => Array2::zeros((n, n)),
            Some(k_ij) => {
                if k_ij.shape() != [n, n] {
                    return Err(EosError::IncompatibleParameters(format!(
                        "binary parameter matrix has shape {:?}, expected [{}, {}]",
                        k_ij.shape(),
                        n,
                        n
                    )));
                }
                for i in 0..n {
                    if k_ij[(i, i)] != 0.0 {
                        return Err(EosError::IncompatibleParameters(String::from(
                            "binary parameter matrix has to be zero on the diagonal",
                        )));
                    }
                    for j in 0..i {
                        if k_ij[(i, j)] != k_ij[(j, i)] {
                            return Err(EosError::IncompatibleParameters(String::from(
                                "binary parameter matrix has to be symmetric",
                            )));
                        }
                    }
                }
                k_ij
            }
        };
        self.k_ij = k_ij;
        Ok(())
    }

    /// Return the mixture restricted to the given component indices.
    pub fn subset(&self, component_list: &[usize]) -> Self {
        Self {
            components: component_list
                .iter()
                .map(|&i| self.components[i].clone())
                .collect(),
            molefracs: self.molefracs.select(Axis(0), component_list),
            k_ij: self
                .k_ij
                .select(Axis(0), component_list)
                .select(Axis(1), component_list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    fn ternary() -> Mixture {
        Mixture::new(vec![
            Component::new("methane", 46.0, 190.6, 0.008).unwrap(),
            Component::new("n-butane", 38.0, 425.2, 0.199).unwrap(),
            Component::new("n-pentane", 33.7, 469.7, 0.251).unwrap(),
        ])
    }

    #[test]
    fn composition_is_normalized() {
        let mut mixture = ternary();
        mixture.set_composition(&[2.0, 1.0, 1.0]).unwrap();
        assert_relative_eq!(mixture.molefracs().sum(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(mixture.molefracs()[0], 0.5, max_relative = 1e-12);
    }

    #[test]
    fn trace_components_are_removed() {
        let mut mixture = ternary();
        mixture.set_composition(&[0.6, 0.4, 1e-5]).unwrap();
        assert_eq!(mixture.molefracs()[2], 0.0);
        assert_relative_eq!(mixture.molefracs().sum(), 1.0, max_relative = 1e-12);
        assert!(mixture.molefracs().iter().all(|&z| z == 0.0 || z >= 1e-4));
    }

    #[test]
    fn invalid_compositions_are_rejected() {
        let mut mixture = ternary();
        assert!(mixture.set_composition(&[0.5, 0.5]).is_err());
        assert!(mixture.set_composition(&[0.5, -0.1, 0.6]).is_err());
        assert!(mixture.set_composition(&[0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn binary_parameters_are_validated() {
        let mut mixture = ternary();
        assert!(mixture
            .set_binary_parameters(Some(arr2(&[[0.0, 0.1], [0.1, 0.0]])))
            .is_err());
        assert!(mixture
            .set_binary_parameters(Some(arr2(&[
                [0.0, 0.1, 0.0],
                [0.2, 0.0, 0.0],
                [0.0, 0.0, 0.0]
            ])))
            .is_err());
        assert!(mixture
            .set_binary_parameters(Some(arr2(&[
                [0.1, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0]
            ])))
            .is_err());
        let k_ij = arr2(&[[0.0, 0.02, 0.05], [0.02, 0.0, 0.01], [0.05, 0.01, 0.0]]);
        mixture.set_binary_parameters(Some(k_ij.clone())).unwrap();
        assert_eq!(mixture.binary_parameters(), &k_ij);
        mixture.set_binary_parameters(None).unwrap();
        assert_eq!(mixture.binary_parameters().sum(), 0.0);
    }

    #[test]
    fn subset_selects_rows_and_columns() {
        let mut mixture = ternary();
        mixture.set_composition(&[0.6, 0.4, 1e-5]).unwrap();
        mixture
            .set_binary_parameters(Some(arr2(&[
                [0.0, 0.02, 0.05],
                [0.02, 0.0, 0.01],
                [0.05, 0.01, 0.0],
            ])))
            .unwrap();
        let sub = mixture.subset(&[0, 2]);
        assert_eq!(sub.components().len(), 2);
        assert_eq!(sub.components()[1].name(), "n-pentane");
        assert_eq!(sub.molefracs()[0], mixture.molefracs()[0]);
        assert_eq!(sub.binary_parameters()[(0, 1)], 0.05);
    }
}
