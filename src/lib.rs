//! Configuration contract for a distributed grid-based atmospheric
//! simulation.
//!
//! This crate re-exports the two member crates and ties their pieces
//! together in a single [`SimulationConfig`] document:
//!
//! - `sirocco-core`: domain decomposition and discretization
//!   ([`GridParametrization`]) and per-variable boundary conditions
//!   ([`BoundaryConditionSet`]).
//! - `sirocco-radiation`: radiative optics ([`OpticsParametrization`]) and
//!   atmospheric state ([`AtmosphericStateParametrization`]).
//!
//! All configuration values are immutable after construction; a setup phase
//! builds and validates them once, then shares them read-only with every
//! distributed core. Validation collects every violation in one pass.

use serde::{Deserialize, Serialize};

pub use sirocco_core::boundary::{BoundaryConditionSet, BoundaryConditionType, BoundaryInfo};
pub use sirocco_core::errors::{ConfigError, ConfigResult};
pub use sirocco_core::grid::GridParametrization;
pub use sirocco_core::triple::{Axis, CoordinateTriple, Face};
pub use sirocco_core::validation::{Validate, ValidationIssue, ValidationReport};
pub use sirocco_core::FloatValue;
pub use sirocco_radiation::atmosphere::{
    AtmosphericStateParametrization, ReferenceColumn, ReferenceDataset, ResolvedAtmosphericState,
};
pub use sirocco_radiation::optics::{
    GrayAtmosphereOptics, OpticsParametrization, OpticsScheme, ResolvedOptics, RrtmOptics,
};

/// Complete configuration document for one simulation run.
///
/// The solver sections (`grid`, `boundary_conditions`) are always present;
/// the radiation sections (`optics`, `atmospheric_state`) are independent
/// and may be omitted for runs without a radiation sub-model.
///
/// An axis counts as periodic for the boundary completeness check either
/// when `periodic_dims` marks it, or when a variable declares a
/// [`BoundaryConditionType::Periodic`] face on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub grid: GridParametrization,

    /// Axes on which the domain wraps around.
    #[serde(default)]
    pub periodic_dims: CoordinateTriple<bool>,

    /// One set per transported variable.
    #[serde(default)]
    pub boundary_conditions: Vec<BoundaryConditionSet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optics: Option<OpticsParametrization>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmospheric_state: Option<AtmosphericStateParametrization>,
}

impl SimulationConfig {
    /// Parse a TOML configuration document.
    ///
    /// Parsing applies documented field defaults but performs no semantic
    /// checks; call [`validate`](Validate::validate) before handing the
    /// configuration to a solver.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Serialize back to TOML. Unset optional fields are omitted from the
    /// document entirely.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Axes exempt from the six-face completeness requirement for `set`.
    fn periodic_axes_for(&self, set: &BoundaryConditionSet) -> Vec<Axis> {
        let mut axes: Vec<Axis> = Axis::ALL
            .into_iter()
            .filter(|axis| self.periodic_dims[*axis])
            .collect();
        for info in &set.boundary_info {
            if info.kind == BoundaryConditionType::Periodic && !axes.contains(&info.dim) {
                axes.push(info.dim);
            }
        }
        axes
    }
}

impl Validate for SimulationConfig {
    fn check(&self, report: &mut ValidationReport) {
        let mut grid_report = ValidationReport::new();
        self.grid.check(&mut grid_report);
        report.extend_prefixed("grid", grid_report);

        for (index, set) in self.boundary_conditions.iter().enumerate() {
            let mut set_report = ValidationReport::new();
            set.check_with_periodic(&mut set_report, &self.periodic_axes_for(set));
            report.extend_prefixed(&format!("boundary_conditions[{index}]"), set_report);

            let duplicated = self.boundary_conditions[..index]
                .iter()
                .any(|earlier| earlier.name == set.name);
            if duplicated {
                report.push(
                    format!("boundary_conditions[{index}].name"),
                    format!("variable '{}' is declared more than once", set.name),
                );
            }
        }

        if let Some(optics) = &self.optics {
            let mut optics_report = ValidationReport::new();
            optics.check(&mut optics_report);
            report.extend_prefixed("optics", optics_report);
        }
        if let Some(state) = &self.atmospheric_state {
            let mut state_report = ValidationReport::new();
            state.check(&mut state_report);
            report.extend_prefixed("atmospheric_state", state_report);
        }
    }
}
