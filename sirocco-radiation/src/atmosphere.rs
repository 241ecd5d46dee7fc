//! Atmospheric state parametrization.
//!
//! The radiation kernel draws its reference atmosphere from an external
//! RFMIP-style dataset of atmospheric columns, selected by an experiment
//! label and a site index. Any of the surface/solar scalars can be
//! overridden individually; presence of an override field, not a sentinel
//! value, decides whether the dataset value is replaced.

use log::debug;
use serde::{Deserialize, Serialize};
use sirocco_core::errors::{ConfigError, ConfigResult};
use sirocco_core::validation::{Validate, ValidationReport};
use sirocco_core::FloatValue;

/// Default RFMIP experiment label.
pub const DEFAULT_RFMIP_EXPT_LABEL: i64 = 0;
/// Default RFMIP site (column) index.
pub const DEFAULT_RFMIP_SITE: i64 = 9;

/// Scalar state drawn from one column of the reference dataset.
///
/// Produced by the out-of-scope dataset loader; this crate only merges it
/// with the configured overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceColumn {
    pub sfc_emis: FloatValue,
    pub sfc_alb: FloatValue,
    pub zenith: FloatValue,
    pub irrad: FloatValue,
    /// Top-of-atmosphere longwave flux, when the dataset provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toa_flux_lw: Option<FloatValue>,
}

/// Lookup into the external RFMIP-style dataset.
///
/// Implemented by the radiation kernel's loader. Returns `None` when the
/// dataset holds no column for the requested experiment/site pair.
pub trait ReferenceDataset {
    fn column(&self, expt_label: i64, site: i64) -> Option<ReferenceColumn>;
}

/// Reference atmosphere selection plus optional scalar overrides.
///
/// # Examples
///
/// ```rust
/// use sirocco_radiation::atmosphere::AtmosphericStateParametrization;
///
/// let state = AtmosphericStateParametrization {
///     atmospheric_state_nc_filepath: "vmr/rfmip.nc".to_string(),
///     sfc_alb: Some(0.3),
///     ..Default::default()
/// };
/// assert_eq!(state.rfmip_expt_label, 0);
/// assert_eq!(state.rfmip_site, 9);
/// assert_eq!(state.sfc_emis, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphericStateParametrization {
    /// Path to the volume-mixing-ratio data. Carried, never opened here.
    pub atmospheric_state_nc_filepath: String,

    /// Index of the reference experiment in the dataset.
    /// Default: 0
    pub rfmip_expt_label: i64,

    /// Index of the reference column (site) in the dataset.
    /// Default: 9
    pub rfmip_site: i64,

    /// Surface emissivity override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfc_emis: Option<FloatValue>,

    /// Surface albedo override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfc_alb: Option<FloatValue>,

    /// Solar zenith angle override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zenith: Option<FloatValue>,

    /// Total solar irradiance override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irrad: Option<FloatValue>,

    /// Top-of-atmosphere longwave flux override. When neither this override
    /// nor the dataset provides a value, the resolved flux is 0.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toa_flux_lw: Option<FloatValue>,
}

impl Default for AtmosphericStateParametrization {
    fn default() -> Self {
        Self {
            atmospheric_state_nc_filepath: String::new(),
            rfmip_expt_label: DEFAULT_RFMIP_EXPT_LABEL,
            rfmip_site: DEFAULT_RFMIP_SITE,
            sfc_emis: None,
            sfc_alb: None,
            zenith: None,
            irrad: None,
            toa_flux_lw: None,
        }
    }
}

/// Fully resolved scalar state handed to the radiation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAtmosphericState {
    pub sfc_emis: FloatValue,
    pub sfc_alb: FloatValue,
    pub zenith: FloatValue,
    pub irrad: FloatValue,
    pub toa_flux_lw: FloatValue,
}

impl AtmosphericStateParametrization {
    /// Merge the configured overrides with the dataset column selected by
    /// `(rfmip_expt_label, rfmip_site)`.
    ///
    /// Each override field replaces the dataset value when present and
    /// leaves it untouched when absent. Fails with
    /// [`ConfigError::UnresolvedReference`] when the dataset has no such
    /// column.
    pub fn resolve<D: ReferenceDataset>(&self, dataset: &D) -> ConfigResult<ResolvedAtmosphericState> {
        let column = dataset
            .column(self.rfmip_expt_label, self.rfmip_site)
            .ok_or(ConfigError::UnresolvedReference {
                expt_label: self.rfmip_expt_label,
                site: self.rfmip_site,
            })?;
        debug!(
            "resolved atmospheric state from experiment {} site {}",
            self.rfmip_expt_label, self.rfmip_site
        );
        Ok(ResolvedAtmosphericState {
            sfc_emis: self.sfc_emis.unwrap_or(column.sfc_emis),
            sfc_alb: self.sfc_alb.unwrap_or(column.sfc_alb),
            zenith: self.zenith.unwrap_or(column.zenith),
            irrad: self.irrad.unwrap_or(column.irrad),
            toa_flux_lw: self.toa_flux_lw.or(column.toa_flux_lw).unwrap_or(0.0),
        })
    }
}

impl Validate for AtmosphericStateParametrization {
    fn check(&self, report: &mut ValidationReport) {
        if self.atmospheric_state_nc_filepath.is_empty() {
            report.push("atmospheric_state_nc_filepath", "must be non-empty");
        }
        if self.rfmip_expt_label < 0 {
            report.push("rfmip_expt_label", "must be non-negative");
        }
        if self.rfmip_site < 0 {
            report.push("rfmip_site", "must be non-negative");
        }

        for (field, bounded) in [("sfc_emis", self.sfc_emis), ("sfc_alb", self.sfc_alb)] {
            if let Some(v) = bounded {
                if !(v.is_finite() && (0.0..=1.0).contains(&v)) {
                    report.push(field, "must lie in [0, 1]");
                }
            }
        }
        for (field, non_negative) in [
            ("zenith", self.zenith),
            ("irrad", self.irrad),
        ] {
            if let Some(v) = non_negative {
                if !(v.is_finite() && v >= 0.0) {
                    report.push(field, "must be non-negative and finite");
                }
            }
        }
        if let Some(v) = self.toa_flux_lw {
            if !v.is_finite() {
                report.push("toa_flux_lw", "must be finite");
            }
        }
    }
}
