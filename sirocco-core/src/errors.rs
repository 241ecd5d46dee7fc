use crate::validation::ValidationReport;
use thiserror::Error;

/// Error type for invalid configurations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(ValidationReport),
    #[error("no optics scheme selected; exactly one of rrtm or gray_atmosphere must be set")]
    NoOpticsScheme,
    #[error("multiple optics schemes selected; exactly one of rrtm or gray_atmosphere must be set")]
    MultipleOpticsSchemes,
    #[error("no reference column for RFMIP experiment {expt_label}, site {site}")]
    UnresolvedReference { expt_label: i64, site: i64 },
}

/// Convenience type for `Result<T, ConfigError>`.
pub type ConfigResult<T> = Result<T, ConfigError>;
