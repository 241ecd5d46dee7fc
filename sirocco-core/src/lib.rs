pub mod boundary;
pub mod errors;
pub mod grid;
pub mod triple;
pub mod validation;

pub use boundary::{BoundaryConditionSet, BoundaryConditionType, BoundaryInfo};
pub use errors::{ConfigError, ConfigResult};
pub use grid::GridParametrization;
pub use triple::{Axis, CoordinateTriple, Face};
pub use validation::{Validate, ValidationIssue, ValidationReport};

/// Float type used for physical scalar values throughout the configuration.
pub type FloatValue = f64;
