//! Critical-property records and Peng-Robinson parameters for pure components.

use crate::errors::{EosError, EosResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Universal gas constant in kPa m³ / (kmol K).
pub const GAS_CONSTANT: f64 = 8.3142;

/// Conversion factor from bar to Pascal.
pub(crate) const PA_PER_BAR: f64 = 1e5;

/// Critical properties of a single substance.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Component {
    /// substance name
    name: String,
    /// critical pressure in bar
    pc: f64,
    /// critical temperature in Kelvin
    tc: f64,
    /// acentric factor
    acentric_factor: f64,
}

impl Component {
    /// Create a new pure substance record.
    ///
    /// Fails if the critical pressure or critical temperature is not positive.
    pub fn new(name: &str, pc: f64, tc: f64, acentric_factor: f64) -> EosResult<Self> {
        if !(pc > 0.0) {
            return Err(EosError::IncompatibleParameters(format!(
                "critical pressure of {} has to be positive.",
                name
            )));
        }
        if !(tc > 0.0) {
            return Err(EosError::IncompatibleParameters(format!(
                "critical temperature of {} has to be positive.",
                name
            )));
        }
        Ok(Self {
            name: name.to_owned(),
            pc,
            tc,
            acentric_factor,
        })
    }

    /// Read a list of components from a JSON string.
    pub fn from_json_str(json: &str) -> EosResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a list of components from a JSON file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> EosResult<Vec<Self>> {
        let reader = BufReader::new(File::open(file)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Critical pressure in bar.
    pub fn pc(&self) -> f64 {
        self.pc
    }

    /// Critical temperature in Kelvin.
    pub fn tc(&self) -> f64 {
        self.tc
    }

    pub fn acentric_factor(&self) -> f64 {
        self.acentric_factor
    }

    /// Peng-Robinson parameters at the given pressure (bar) and temperature (K).
    pub fn pr_params(&self, pressure: f64, temperature: f64) -> PrParameters {
        let m = 0.37464 + (1.54226 - 0.26992 * self.acentric_factor) * self.acentric_factor;
        let alpha = (1.0 + m * (1.0 - (temperature / self.tc).sqrt())).powi(2);
        let a = 0.45724 * (GAS_CONSTANT * self.tc).powi(2) * alpha / (self.pc * PA_PER_BAR);
        let b = 0.07780 * GAS_CONSTANT * self.tc / (self.pc * PA_PER_BAR);
        let rt = GAS_CONSTANT * temperature;
        PrParameters {
            alpha,
            a,
            b,
            a_red: a * pressure * PA_PER_BAR / (rt * rt),
            b_red: b * pressure * PA_PER_BAR / rt,
        }
    }

    /// Equilibrium ratio estimated with the Wilson correlation.
    pub fn wilson_k(&self, pressure: f64, temperature: f64) -> f64 {
        self.pc / pressure
            * (5.37 * (1.0 + self.acentric_factor) * (1.0 - self.tc / temperature)).exp()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component(name={}", self.name)?;
        write!(f, ", pc={} bar", self.pc)?;
        write!(f, ", tc={} K", self.tc)?;
        write!(f, ", acentric factor={})", self.acentric_factor)
    }
}

/// Peng-Robinson parameters of a pure component at fixed pressure and
/// temperature. Recomputed for every calculation, never stored.
#[derive(Debug, Clone, Copy)]
pub struct PrParameters {
    /// temperature correction of the attraction parameter
    pub alpha: f64,
    /// attraction parameter
    pub a: f64,
    /// covolume
    pub b: f64,
    /// dimensionless attraction parameter aP/(RT)²
    pub a_red: f64,
    /// dimensionless covolume bP/(RT)
    pub b_red: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn methane() -> Component {
        Component::new("methane", 46.0, 190.6, 0.008).unwrap()
    }

    #[test]
    fn records_from_json() {
        let records = r#"[
            {
                "name": "propane",
                "pc": 42.5,
                "tc": 369.96,
                "acentric_factor": 0.153
            },
            {
                "name": "butane",
                "pc": 38.0,
                "tc": 425.2,
                "acentric_factor": 0.199
            }
        ]"#;
        let components = Component::from_json_str(records).expect("Unable to parse json.");
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].name(), "propane");
        assert_eq!(components[1].pc(), 38.0);
    }

    #[test]
    fn invalid_critical_properties() {
        assert!(Component::new("broken", 0.0, 190.6, 0.008).is_err());
        assert!(Component::new("broken", 46.0, -10.0, 0.008).is_err());
    }

    #[test]
    fn alpha_is_one_at_critical_temperature() {
        let p = methane().pr_params(30.0, 190.6);
        assert_relative_eq!(p.alpha, 1.0, max_relative = 1e-14);
    }

    #[test]
    fn reduced_parameters_scale_linearly_with_pressure() {
        let c = methane();
        let p1 = c.pr_params(10.0, 250.0);
        let p2 = c.pr_params(20.0, 250.0);
        assert_relative_eq!(p2.a_red, 2.0 * p1.a_red, max_relative = 1e-14);
        assert_relative_eq!(p2.b_red, 2.0 * p1.b_red, max_relative = 1e-14);
        // a and b do not depend on pressure
        assert_eq!(p1.a, p2.a);
        assert_eq!(p1.b, p2.b);
    }

    #[test]
    fn wilson_k_is_one_at_critical_point() {
        let c = methane();
        assert_relative_eq!(c.wilson_k(46.0, 190.6), 1.0, max_relative = 1e-14);
        assert!(c.wilson_k(50.0, 250.0) > 1.0);
    }
}
