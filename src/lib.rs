//! PT flash calculations for multi-component mixtures with the
//! Peng-Robinson equation of state.
//!
//! Given the critical properties of the components, a feed composition, and
//! binary interaction parameters, [Mixture::pt_flash] determines whether the
//! mixture is a single liquid or vapor phase or splits into two phases at
//! the given pressure and temperature. For a two-phase state it reports the
//! vapor fraction, the compositions and compressibility factors of both
//! phases, and the equilibrium ratios.
//!
//! The equilibrium ratios are iterated by successive substitution starting
//! from the Wilson correlation, with the vapor fraction obtained from the
//! Rachford-Rice mass balance in every step. Liquid- and vapor-like states
//! are distinguished by the smallest and largest root of the cubic equation
//! of state, which works well away from the critical region but is no
//! substitute for a phase stability analysis.
//!
//! ```
//! use ptflash::{Component, Mixture, SolverOptions};
//!
//! # fn main() -> ptflash::EosResult<()> {
//! let mut mixture = Mixture::new(vec![
//!     Component::new("methane", 46.0, 190.6, 0.008)?,
//!     Component::new("n-butane", 38.0, 425.2, 0.199)?,
//! ]);
//! mixture.set_composition(&[0.6, 0.4])?;
//! let result = mixture.pt_flash(50.0, 311.0, None, SolverOptions::default())?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```
#![warn(clippy::all)]

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            println!($($arg)*);
        }
    }
}

pub mod cubic;
mod errors;
mod fugacity;
mod mixture;
mod parameter;
mod phase_equilibria;

pub use cubic::Phase;
pub use errors::{EosError, EosResult};
pub use mixture::Mixture;
pub use parameter::{Component, PrParameters, GAS_CONSTANT};
pub use phase_equilibria::{
    FlashResult, SinglePhaseState, SolverOptions, TwoPhaseState, Verbosity,
};
