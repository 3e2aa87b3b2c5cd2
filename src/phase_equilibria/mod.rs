//! Vapor-liquid equilibrium of mixtures at given pressure and temperature.

use crate::cubic::Phase;
use ndarray::Array1;
use std::fmt;

mod rachford_rice;
mod tp_flash;
pub(crate) use rachford_rice::rachford_rice;

/// Level of detail in the iteration output.
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Debug, Default)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success or failure of the iteration.
    Result,
    /// Print a detailed output for every iteration.
    Iter,
}

/// Options for the flash solver.
///
/// If the values are [None], solver specific default values are used.
#[derive(Copy, Clone, Default)]
pub struct SolverOptions {
    /// Maximum number of iterations.
    pub max_iter: Option<usize>,
    /// Tolerance.
    pub tol: Option<f64>,
    /// Iteration output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn unwrap_or(self, max_iter: usize, tol: f64) -> (usize, f64, Verbosity) {
        (
            self.max_iter.unwrap_or(max_iter),
            self.tol.unwrap_or(tol),
            self.verbosity,
        )
    }
}

/// A single homogeneous phase at the flash conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct SinglePhaseState {
    /// Mole fractions of the phase (equal to the feed composition).
    pub molefracs: Array1<f64>,
    /// Compressibility factor.
    pub z_factor: f64,
    /// Molar volume in m³/mol.
    pub molar_volume: f64,
}

/// A converged vapor-liquid phase split.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPhaseState {
    /// Molar fraction of the vapor phase.
    pub vapor_fraction: f64,
    /// Molar fraction of the liquid phase.
    pub liquid_fraction: f64,
    /// Mole fractions in the liquid phase. Zero for trace components.
    pub liquid_molefracs: Array1<f64>,
    /// Mole fractions in the vapor phase. Zero for trace components.
    pub vapor_molefracs: Array1<f64>,
    /// Equilibrium ratios. NaN for trace components.
    pub k_values: Array1<f64>,
    /// Compressibility factor of the liquid phase.
    pub liquid_z_factor: f64,
    /// Compressibility factor of the vapor phase.
    pub vapor_z_factor: f64,
    /// Molar volume of the liquid phase in m³/mol.
    pub liquid_molar_volume: f64,
    /// Molar volume of the vapor phase in m³/mol.
    pub vapor_molar_volume: f64,
}

/// Result of a PT flash calculation.
///
/// Every variant carries exactly the quantities that are defined for it;
/// a single phase result, e.g., has no equilibrium ratios or phase split.
#[derive(Debug, Clone, PartialEq)]
pub enum FlashResult {
    /// The feed is entirely liquid at the given conditions.
    Liquid(SinglePhaseState),
    /// The feed is entirely vapor at the given conditions.
    Vapor(SinglePhaseState),
    /// The feed splits into a vapor and a liquid phase.
    TwoPhase(TwoPhaseState),
    /// Only one component has a nonzero feed fraction. The phase label
    /// classifies the component as liquid- or vapor-like based on the
    /// Wilson equilibrium ratio.
    SingleComponent {
        phase: Phase,
        state: SinglePhaseState,
    },
}

impl FlashResult {
    /// Molar fraction of the vapor phase, 0 or 1 for single phase results.
    pub fn vapor_phase_fraction(&self) -> f64 {
        match self {
            Self::Liquid(_) => 0.0,
            Self::Vapor(_) => 1.0,
            Self::TwoPhase(state) => state.vapor_fraction,
            Self::SingleComponent { phase, .. } => match phase {
                Phase::Liquid => 0.0,
                Phase::Vapor => 1.0,
            },
        }
    }

    /// Molar fraction of the liquid phase, 0 or 1 for single phase results.
    pub fn liquid_phase_fraction(&self) -> f64 {
        1.0 - self.vapor_phase_fraction()
    }

    /// Mole fractions in the liquid phase, if a liquid phase is present.
    pub fn liquid_molefracs(&self) -> Option<&Array1<f64>> {
        match self {
            Self::Liquid(state) => Some(&state.molefracs),
            Self::Vapor(_) => None,
            Self::TwoPhase(state) => Some(&state.liquid_molefracs),
            Self::SingleComponent { phase, state } => match phase {
                Phase::Liquid => Some(&state.molefracs),
                Phase::Vapor => None,
            },
        }
    }

    /// Mole fractions in the vapor phase, if a vapor phase is present.
    pub fn vapor_molefracs(&self) -> Option<&Array1<f64>> {
        match self {
            Self::Liquid(_) => None,
            Self::Vapor(state) => Some(&state.molefracs),
            Self::TwoPhase(state) => Some(&state.vapor_molefracs),
            Self::SingleComponent { phase, state } => match phase {
                Phase::Liquid => None,
                Phase::Vapor => Some(&state.molefracs),
            },
        }
    }

    /// Equilibrium ratios of a two-phase result.
    pub fn k_values(&self) -> Option<&Array1<f64>> {
        match self {
            Self::TwoPhase(state) => Some(&state.k_values),
            _ => None,
        }
    }
}

impl fmt::Display for FlashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liquid(state) => {
                writeln!(f, "phase: liquid")?;
                writeln!(f, "mole fractions: {:.5}", state.molefracs)?;
                write!(f, "Z = {:.5}, Vm = {:.5e} m³/mol", state.z_factor, state.molar_volume)
            }
            Self::Vapor(state) => {
                writeln!(f, "phase: vapor")?;
                writeln!(f, "mole fractions: {:.5}", state.molefracs)?;
                write!(f, "Z = {:.5}, Vm = {:.5e} m³/mol", state.z_factor, state.molar_volume)
            }
            Self::TwoPhase(state) => {
                writeln!(f, "phase: vapor-liquid")?;
                writeln!(f, "vapor fraction : {:.5}", state.vapor_fraction)?;
                writeln!(f, "liquid fraction: {:.5}", state.liquid_fraction)?;
                writeln!(f, "liquid mole fractions: {:.5}", state.liquid_molefracs)?;
                writeln!(f, "vapor mole fractions : {:.5}", state.vapor_molefracs)?;
                writeln!(f, "K values: {:.5}", state.k_values)?;
                writeln!(
                    f,
                    "liquid: Z = {:.5}, Vm = {:.5e} m³/mol",
                    state.liquid_z_factor, state.liquid_molar_volume
                )?;
                write!(
                    f,
                    "vapor : Z = {:.5}, Vm = {:.5e} m³/mol",
                    state.vapor_z_factor, state.vapor_molar_volume
                )
            }
            Self::SingleComponent { phase, state } => {
                let label = match phase {
                    Phase::Liquid => "liquid",
                    Phase::Vapor => "vapor",
                };
                writeln!(f, "phase: single component ({})", label)?;
                writeln!(f, "mole fractions: {:.5}", state.molefracs)?;
                write!(f, "Z = {:.5}, Vm = {:.5e} m³/mol", state.z_factor, state.molar_volume)
            }
        }
    }
}
