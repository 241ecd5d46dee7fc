//! Radiative optics parametrization.
//!
//! Exactly one optics scheme drives the radiation kernel: either lookup
//! tables in the RRTM family (spectrally resolved longwave/shortwave
//! absorption read from external files) or an analytic gray atmosphere
//! parameterized by bulk optical depths. The serialized form keeps both
//! branches optional; [`OpticsParametrization::scheme`] collapses them into
//! the [`OpticsScheme`] sum type, rejecting a selection of zero or both.

use serde::{Deserialize, Serialize};
use sirocco_core::errors::{ConfigError, ConfigResult};
use sirocco_core::validation::{Validate, ValidationReport};
use sirocco_core::FloatValue;

/// Reference surface pressure used by the gray-atmosphere scheme [Pa].
pub const DEFAULT_P0: FloatValue = 1e5;
/// Pressure/absorber scale-height ratio used by the gray-atmosphere scheme.
pub const DEFAULT_ALPHA: FloatValue = 3.5;
/// Order of accuracy for reconstructing face values at grid-cell boundaries.
pub const DEFAULT_FACE_INTERP_SCHEME_ORDER: usize = 3;

fn default_face_interp_scheme_order() -> usize {
    DEFAULT_FACE_INTERP_SCHEME_ORDER
}

/// Lookup-table optics: paths to the longwave and shortwave tables.
///
/// The paths are carried as opaque strings; the radiation kernel's loader
/// opens them, never this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrtmOptics {
    pub longwave_nc_filepath: String,
    pub shortwave_nc_filepath: String,
}

/// Analytic gray-atmosphere optics.
///
/// `d0_lw` and `d0_sw` have no defaults and must be provided; `p0` and
/// `alpha` fall back to the documented reference values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrayAtmosphereOptics {
    /// Reference surface pressure [Pa].
    /// Default: 1e5
    pub p0: FloatValue,

    /// Ratio of the pressure scale height to the absorber scale height.
    /// Default: 3.5
    pub alpha: FloatValue,

    /// Total longwave optical depth. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d0_lw: Option<FloatValue>,

    /// Total shortwave optical depth. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d0_sw: Option<FloatValue>,
}

impl Default for GrayAtmosphereOptics {
    fn default() -> Self {
        Self {
            p0: DEFAULT_P0,
            alpha: DEFAULT_ALPHA,
            d0_lw: None,
            d0_sw: None,
        }
    }
}

impl GrayAtmosphereOptics {
    /// Gray-atmosphere optics with the given optical depths and default
    /// `p0`/`alpha`.
    pub fn new(d0_lw: FloatValue, d0_sw: FloatValue) -> Self {
        Self {
            d0_lw: Some(d0_lw),
            d0_sw: Some(d0_sw),
            ..Self::default()
        }
    }
}

/// Serialized optics selection: at most one branch populated, plus the
/// scheme-independent interpolation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticsParametrization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrtm: Option<RrtmOptics>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gray_atmosphere: Option<GrayAtmosphereOptics>,

    /// Order of accuracy for reconstructing face-centered pressure and
    /// temperature values; independent of the scheme choice.
    /// Default: 3
    #[serde(default = "default_face_interp_scheme_order")]
    pub face_interp_scheme_order: usize,
}

impl Default for OpticsParametrization {
    fn default() -> Self {
        Self {
            rrtm: None,
            gray_atmosphere: None,
            face_interp_scheme_order: DEFAULT_FACE_INTERP_SCHEME_ORDER,
        }
    }
}

impl OpticsParametrization {
    /// RRTM lookup-table selection with the default interpolation order.
    pub fn rrtm(
        longwave_nc_filepath: impl Into<String>,
        shortwave_nc_filepath: impl Into<String>,
    ) -> Self {
        Self {
            rrtm: Some(RrtmOptics {
                longwave_nc_filepath: longwave_nc_filepath.into(),
                shortwave_nc_filepath: shortwave_nc_filepath.into(),
            }),
            ..Self::default()
        }
    }

    /// Gray-atmosphere selection with the default interpolation order.
    pub fn gray_atmosphere(optics: GrayAtmosphereOptics) -> Self {
        Self {
            gray_atmosphere: Some(optics),
            ..Self::default()
        }
    }

    /// The active scheme with every default resolved.
    ///
    /// Fails when zero or both branches are populated, or when a selected
    /// gray-atmosphere branch is missing a required optical depth.
    pub fn scheme(&self) -> ConfigResult<ResolvedOptics> {
        let scheme = match (&self.rrtm, &self.gray_atmosphere) {
            (Some(_), Some(_)) => return Err(ConfigError::MultipleOpticsSchemes),
            (None, None) => return Err(ConfigError::NoOpticsScheme),
            (Some(rrtm), None) => OpticsScheme::Rrtm {
                longwave_nc_filepath: rrtm.longwave_nc_filepath.clone(),
                shortwave_nc_filepath: rrtm.shortwave_nc_filepath.clone(),
            },
            (None, Some(gray)) => {
                let mut report = ValidationReport::new();
                if gray.d0_lw.is_none() {
                    report.push("gray_atmosphere.d0_lw", "required, no default");
                }
                if gray.d0_sw.is_none() {
                    report.push("gray_atmosphere.d0_sw", "required, no default");
                }
                report.into_result()?;
                OpticsScheme::GrayAtmosphere {
                    p0: gray.p0,
                    alpha: gray.alpha,
                    // Checked above.
                    d0_lw: gray.d0_lw.unwrap_or_default(),
                    d0_sw: gray.d0_sw.unwrap_or_default(),
                }
            }
        };
        Ok(ResolvedOptics {
            scheme,
            face_interp_scheme_order: self.face_interp_scheme_order,
        })
    }
}

impl Validate for OpticsParametrization {
    fn check(&self, report: &mut ValidationReport) {
        match (&self.rrtm, &self.gray_atmosphere) {
            (Some(_), Some(_)) => report.push(
                "optics",
                "both rrtm and gray_atmosphere are set; exactly one scheme must be selected",
            ),
            (None, None) => report.push(
                "optics",
                "neither rrtm nor gray_atmosphere is set; exactly one scheme must be selected",
            ),
            (Some(rrtm), None) => {
                if rrtm.longwave_nc_filepath.is_empty() {
                    report.push("rrtm.longwave_nc_filepath", "must be non-empty");
                }
                if rrtm.shortwave_nc_filepath.is_empty() {
                    report.push("rrtm.shortwave_nc_filepath", "must be non-empty");
                }
            }
            (None, Some(gray)) => {
                if !(gray.p0.is_finite() && gray.p0 > 0.0) {
                    report.push("gray_atmosphere.p0", "must be positive and finite");
                }
                if !(gray.alpha.is_finite() && gray.alpha > 0.0) {
                    report.push("gray_atmosphere.alpha", "must be positive and finite");
                }
                match gray.d0_lw {
                    None => report.push("gray_atmosphere.d0_lw", "required, no default"),
                    Some(d0) if !(d0.is_finite() && d0 >= 0.0) => {
                        report.push("gray_atmosphere.d0_lw", "must be non-negative and finite")
                    }
                    Some(_) => {}
                }
                match gray.d0_sw {
                    None => report.push("gray_atmosphere.d0_sw", "required, no default"),
                    Some(d0) if !(d0.is_finite() && d0 >= 0.0) => {
                        report.push("gray_atmosphere.d0_sw", "must be non-negative and finite")
                    }
                    Some(_) => {}
                }
            }
        }

        if self.face_interp_scheme_order < 1 {
            report.push("face_interp_scheme_order", "must be at least 1");
        }
    }
}

/// Optics selection with the scheme collapsed to a tagged union and every
/// default resolved; this is what downstream readers observe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOptics {
    pub scheme: OpticsScheme,
    pub face_interp_scheme_order: usize,
}

/// The active optics scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpticsScheme {
    Rrtm {
        longwave_nc_filepath: String,
        shortwave_nc_filepath: String,
    },
    GrayAtmosphere {
        p0: FloatValue,
        alpha: FloatValue,
        d0_lw: FloatValue,
        d0_sw: FloatValue,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn rrtm_selection_resolves() {
        let optics = OpticsParametrization::rrtm("lw.nc", "sw.nc");
        let resolved = optics.scheme().unwrap();
        assert_eq!(resolved.face_interp_scheme_order, 3);
        assert_eq!(
            resolved.scheme,
            OpticsScheme::Rrtm {
                longwave_nc_filepath: "lw.nc".to_string(),
                shortwave_nc_filepath: "sw.nc".to_string(),
            }
        );
        assert!(optics.validate().is_ok());
    }

    #[test]
    fn gray_atmosphere_defaults_resolve() {
        let optics = OpticsParametrization::gray_atmosphere(GrayAtmosphereOptics::new(6.0, 0.22));
        let resolved = optics.scheme().unwrap();
        match resolved.scheme {
            OpticsScheme::GrayAtmosphere { p0, alpha, d0_lw, d0_sw } => {
                assert!(is_close!(p0, 1e5));
                assert!(is_close!(alpha, 3.5));
                assert!(is_close!(d0_lw, 6.0));
                assert!(is_close!(d0_sw, 0.22));
            }
            other => panic!("unexpected scheme: {other:?}"),
        }
        assert_eq!(resolved.face_interp_scheme_order, 3);
    }

    #[test]
    fn neither_branch_is_a_structural_error() {
        let optics = OpticsParametrization::default();
        assert!(matches!(
            optics.scheme(),
            Err(ConfigError::NoOpticsScheme)
        ));
        assert!(optics.validate().is_err());
    }

    #[test]
    fn both_branches_are_a_structural_error() {
        let optics = OpticsParametrization {
            rrtm: Some(RrtmOptics {
                longwave_nc_filepath: "lw.nc".to_string(),
                shortwave_nc_filepath: "sw.nc".to_string(),
            }),
            gray_atmosphere: Some(GrayAtmosphereOptics::new(6.0, 0.22)),
            ..Default::default()
        };
        assert!(matches!(
            optics.scheme(),
            Err(ConfigError::MultipleOpticsSchemes)
        ));
        assert!(optics.validate().is_err());
    }

    #[test]
    fn missing_optical_depths_are_reported() {
        let optics = OpticsParametrization::gray_atmosphere(GrayAtmosphereOptics::default());
        let err = optics.scheme().unwrap_err();
        match err {
            ConfigError::Invalid(report) => {
                assert_eq!(report.len(), 2);
                assert_eq!(report.issues()[0].field, "gray_atmosphere.d0_lw");
                assert_eq!(report.issues()[1].field, "gray_atmosphere.d0_sw");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_gray_fields_and_order_reported_together() {
        let optics = OpticsParametrization {
            gray_atmosphere: Some(GrayAtmosphereOptics {
                p0: -1.0,
                alpha: FloatValue::NAN,
                d0_lw: Some(-0.5),
                d0_sw: None,
            }),
            face_interp_scheme_order: 0,
            ..Default::default()
        };
        let err = optics.validate().unwrap_err();
        match err {
            ConfigError::Invalid(report) => {
                let fields: Vec<&str> =
                    report.issues().iter().map(|i| i.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec![
                        "gray_atmosphere.p0",
                        "gray_atmosphere.alpha",
                        "gray_atmosphere.d0_lw",
                        "gray_atmosphere.d0_sw",
                        "face_interp_scheme_order",
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn toml_deserialization_applies_defaults() {
        let source = r#"
            [gray_atmosphere]
            d0_lw = 6.0
            d0_sw = 0.22
        "#;
        let optics: OpticsParametrization = toml::from_str(source).unwrap();
        assert_eq!(optics.face_interp_scheme_order, 3);
        let gray = optics.gray_atmosphere.unwrap();
        assert!(is_close!(gray.p0, 1e5));
        assert!(is_close!(gray.alpha, 3.5));
    }

    #[test]
    fn toml_roundtrip_preserves_branch_selection() {
        let optics = OpticsParametrization::rrtm("lookup/lw.nc", "lookup/sw.nc");
        let serialized = toml::to_string(&optics).unwrap();
        let back: OpticsParametrization = toml::from_str(&serialized).unwrap();
        assert_eq!(optics, back);
        assert!(back.gray_atmosphere.is_none());
    }

    #[test]
    fn json_roundtrip() {
        let optics = OpticsParametrization {
            gray_atmosphere: Some(GrayAtmosphereOptics::new(4.0, 0.1)),
            face_interp_scheme_order: 5,
            ..Default::default()
        };
        let json = serde_json::to_string(&optics).unwrap();
        let back: OpticsParametrization = serde_json::from_str(&json).unwrap();
        assert_eq!(optics, back);
    }
}
