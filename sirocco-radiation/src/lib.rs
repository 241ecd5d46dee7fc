pub mod atmosphere;
pub mod optics;

pub use atmosphere::{
    AtmosphericStateParametrization, ReferenceColumn, ReferenceDataset, ResolvedAtmosphericState,
};
pub use optics::{
    GrayAtmosphereOptics, OpticsParametrization, OpticsScheme, ResolvedOptics, RrtmOptics,
};
