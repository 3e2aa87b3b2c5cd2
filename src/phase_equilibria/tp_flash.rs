//! Isothermal flash calculation by successive substitution.

use super::{rachford_rice, FlashResult, SinglePhaseState, SolverOptions, TwoPhaseState};
use crate::cubic::{self, Phase};
use crate::errors::{EosError, EosResult};
use crate::fugacity::MixtureParameters;
use crate::mixture::Mixture;
use crate::parameter::{GAS_CONSTANT, PA_PER_BAR};
use crate::{log_iter, log_result};
use itertools::izip;
use ndarray::{Array1, Axis};

const MAX_ITER_TP: usize = 200;
const TOL_TP: f64 = 1e-6;

/// Outcome of the successive substitution iteration on the components with
/// nonzero feed fraction.
enum SsResult {
    /// All equilibrium ratios moved to the same side of unity.
    SinglePhase(Phase),
    /// The equilibrium ratios converged to a phase split.
    Split {
        vapor_fraction: f64,
        liquid_molefracs: Array1<f64>,
        vapor_molefracs: Array1<f64>,
        k_values: Array1<f64>,
        liquid_z_factor: f64,
        vapor_z_factor: f64,
    },
}

/// # Flash calculations
impl Mixture {
    /// Perform a PT flash calculation at the given pressure (bar) and
    /// temperature (K).
    ///
    /// The equilibrium ratios are initialized with the Wilson correlation
    /// unless an explicit estimate is passed in `initial_k`. The result
    /// vectors have one entry per feed component; trace components that were
    /// removed from the composition report zero mole fractions and NaN
    /// equilibrium ratios.
    pub fn pt_flash(
        &self,
        pressure: f64,
        temperature: f64,
        initial_k: Option<&Array1<f64>>,
        options: SolverOptions,
    ) -> EosResult<FlashResult> {
        if !(pressure > 0.0) {
            return Err(EosError::InvalidState(
                String::from("PT flash"),
                String::from("pressure"),
                pressure,
            ));
        }
        if !(temperature > 0.0) {
            return Err(EosError::InvalidState(
                String::from("PT flash"),
                String::from("temperature"),
                temperature,
            ));
        }
        if !(self.molefracs().sum() > 0.0) {
            return Err(EosError::InvalidComposition(String::from(
                "the feed composition has not been set",
            )));
        }
        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_TP, TOL_TP);

        let molar_volume = |z: f64| z * GAS_CONSTANT * temperature / (pressure * PA_PER_BAR);

        // components with nonzero feed fraction
        let present: Vec<usize> = self
            .molefracs()
            .iter()
            .enumerate()
            .filter_map(|(i, &zi)| (zi > 0.0).then_some(i))
            .collect();

        // a single component does not require an equilibrium iteration
        if let [i] = present[..] {
            let component = &self.components()[i];
            let phase = if component.wilson_k(pressure, temperature) > 1.0 {
                Phase::Vapor
            } else {
                Phase::Liquid
            };
            let p = component.pr_params(pressure, temperature);
            let z = cubic::z_factor(p.a_red, p.b_red, phase)?;
            return Ok(FlashResult::SingleComponent {
                phase,
                state: SinglePhaseState {
                    molefracs: self.molefracs().clone(),
                    z_factor: z,
                    molar_volume: molar_volume(z),
                },
            });
        }

        let sub = self.subset(&present);
        let k0 = match initial_k {
            Some(k) => {
                if k.len() != self.components().len() {
                    return Err(EosError::IncompatibleParameters(format!(
                        "expected {} initial equilibrium ratios, got {}",
                        self.components().len(),
                        k.len()
                    )));
                }
                let k = k.select(Axis(0), &present);
                if k.iter().any(|&ki| !(ki > 0.0) || !ki.is_finite()) {
                    return Err(EosError::IncompatibleParameters(String::from(
                        "initial equilibrium ratios have to be positive and finite",
                    )));
                }
                k
            }
            None => Array1::from_iter(
                sub.components()
                    .iter()
                    .map(|c| c.wilson_k(pressure, temperature)),
            ),
        };

        let parameters =
            MixtureParameters::new(sub.components(), sub.binary_parameters(), pressure, temperature);
        let single_phase = |phase: Phase| -> EosResult<SinglePhaseState> {
            let z = parameters.z_factor(sub.molefracs(), phase)?;
            Ok(SinglePhaseState {
                molefracs: self.molefracs().clone(),
                z_factor: z,
                molar_volume: molar_volume(z),
            })
        };

        match successive_substitution(&sub, &parameters, k0, max_iter, tol, verbosity)? {
            SsResult::SinglePhase(Phase::Liquid) => Ok(FlashResult::Liquid(single_phase(Phase::Liquid)?)),
            SsResult::SinglePhase(Phase::Vapor) => Ok(FlashResult::Vapor(single_phase(Phase::Vapor)?)),
            SsResult::Split {
                vapor_fraction,
                liquid_molefracs,
                vapor_molefracs,
                k_values,
                liquid_z_factor,
                vapor_z_factor,
            } => {
                // the mass balance can place the root outside [0, 1] even
                // though the equilibrium ratios straddle unity; the feed is
                // then single phase after all
                if vapor_fraction >= 1.0 {
                    return Ok(FlashResult::Vapor(single_phase(Phase::Vapor)?));
                }
                if vapor_fraction <= 0.0 {
                    return Ok(FlashResult::Liquid(single_phase(Phase::Liquid)?));
                }

                let n = self.components().len();
                let mut x = Array1::zeros(n);
                let mut y = Array1::zeros(n);
                let mut k = Array1::from_elem(n, f64::NAN);
                for (slot, &i) in present.iter().enumerate() {
                    x[i] = liquid_molefracs[slot];
                    y[i] = vapor_molefracs[slot];
                    k[i] = k_values[slot];
                }

                Ok(FlashResult::TwoPhase(TwoPhaseState {
                    vapor_fraction,
                    liquid_fraction: 1.0 - vapor_fraction,
                    liquid_molefracs: x,
                    vapor_molefracs: y,
                    k_values: k,
                    liquid_z_factor,
                    vapor_z_factor,
                    liquid_molar_volume: molar_volume(liquid_z_factor),
                    vapor_molar_volume: molar_volume(vapor_z_factor),
                }))
            }
        }
    }
}

/// Iterate the equilibrium ratios of the filtered mixture to convergence.
fn successive_substitution(
    mixture: &Mixture,
    parameters: &MixtureParameters,
    mut k: Array1<f64>,
    max_iter: usize,
    tol: f64,
    verbosity: super::Verbosity,
) -> EosResult<SsResult> {
    let feed = mixture.molefracs();

    log_iter!(verbosity, " iter |    residual    | vapor fraction");
    log_iter!(verbosity, "{:-<40}", "");

    for iter in 1..=max_iter {
        if k.iter().all(|&ki| ki < 1.0) {
            log_result!(verbosity, "PT flash: single phase liquid after {} step(s)", iter);
            return Ok(SsResult::SinglePhase(Phase::Liquid));
        }
        if k.iter().all(|&ki| ki > 1.0) {
            log_result!(verbosity, "PT flash: single phase vapor after {} step(s)", iter);
            return Ok(SsResult::SinglePhase(Phase::Vapor));
        }

        let v = rachford_rice(feed, &k)?;
        let x = Array1::from_iter(
            izip!(feed.iter(), k.iter()).map(|(&zi, &ki)| zi / (1.0 + v * (ki - 1.0))),
        );
        let y = &x * &k;

        let (phi_l, z_l) = parameters.fugacity_coefficients(&x, Phase::Liquid)?;
        let (phi_v, z_v) = parameters.fugacity_coefficients(&y, Phase::Vapor)?;
        let k_new = phi_l / phi_v;

        let residual: f64 = izip!(k_new.iter(), k.iter())
            .map(|(&kn, &ko)| (kn / ko - 1.0).abs())
            .sum();
        log_iter!(verbosity, " {:4} | {:14.8e} | {:.8}", iter, residual, v);

        if residual < tol {
            log_result!(verbosity, "PT flash: calculation converged in {} step(s)", iter);
            return Ok(SsResult::Split {
                vapor_fraction: v,
                liquid_molefracs: x,
                vapor_molefracs: y,
                k_values: k_new,
                liquid_z_factor: z_l,
                vapor_z_factor: z_v,
            });
        }
        k = k_new;
    }
    Err(EosError::NotConverged(String::from("PT flash")))
}
