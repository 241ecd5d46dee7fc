//! Domain decomposition and discretization parameters.
//!
//! A [`GridParametrization`] describes how the 3-D computational domain is
//! split across compute cores and discretized on each of them. It is
//! constructed once at simulation setup, validated, and then shared
//! read-only by every core's solver instance; all shape arithmetic the
//! solver needs is exposed as pure accessors so every core computes the same
//! answers.

use crate::triple::{Axis, CoordinateTriple};
use crate::validation::{Validate, ValidationReport};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Decomposition and discretization of the simulation domain.
///
/// Construction never fails; invalid combinations are representable and are
/// rejected by [`validate`](Validate::validate) before use. Fields without a
/// documented default deserialize to zeroed values that validation rejects.
///
/// # Examples
///
/// ```rust
/// use sirocco_core::grid::GridParametrization;
/// use sirocco_core::triple::Axis;
///
/// let grid = GridParametrization {
///     computation_shape: [2, 2, 1].into(),
///     grid_size: [64, 64, 128].into(),
///     halo_width: 2,
///     ..Default::default()
/// };
/// assert_eq!(grid.global_grid_size(Axis::Dim0), 128);
/// assert_eq!(grid.local_core_grid_size_with_halo(Axis::Dim0), 68);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParametrization {
    /// Number of compute cores along each axis. All components must be at
    /// least 1.
    pub computation_shape: CoordinateTriple<usize>,

    /// Full (padded) physical domain extent along each axis.
    pub length: CoordinateTriple<FloatValue>,

    /// Number of grid points along each axis *per core*.
    pub grid_size: CoordinateTriple<usize>,

    /// Global grid points per axis excluding padding. Must not exceed
    /// `computation_shape * grid_size` on any axis; equal when no padding is
    /// used.
    pub physical_full_grid_size: CoordinateTriple<usize>,

    /// Ghost-cell width added to each end of a core's local grid for
    /// inter-core stencil support.
    pub halo_width: usize,

    /// Simulation time step. Must be positive.
    pub dt: FloatValue,

    /// Stencil/convolution footprint of the discretization operators.
    /// The halo must be wide enough to support it:
    /// `halo_width >= (kernel_size - 1) / 2`.
    pub kernel_size: usize,

    /// I/O batching granularity on input. Independent of the numerical grid.
    /// Default: 1
    pub input_chunk_size: usize,

    /// Number of splits applied to output batches.
    /// Default: 1
    pub num_output_splits: usize,

    /// Boundary-layer points appended at each end of the computational
    /// domain for physical boundary-condition stencils. Distinct from
    /// `halo_width`, which supports inter-core communication.
    /// Default: 1
    pub num_boundary_points: usize,
}

impl Default for GridParametrization {
    fn default() -> Self {
        Self {
            computation_shape: CoordinateTriple::splat(0),
            length: CoordinateTriple::splat(0.0),
            grid_size: CoordinateTriple::splat(0),
            physical_full_grid_size: CoordinateTriple::splat(0),
            halo_width: 0,
            dt: 0.0,
            kernel_size: 0,
            input_chunk_size: 1,
            num_output_splits: 1,
            num_boundary_points: 1,
        }
    }
}

impl GridParametrization {
    /// Global (padded) number of grid points along `axis`:
    /// `computation_shape * grid_size`.
    pub fn global_grid_size(&self, axis: Axis) -> usize {
        self.computation_shape[axis] * self.grid_size[axis]
    }

    /// Number of grid points a single core holds along `axis`, including the
    /// halo on both ends: `grid_size + 2 * halo_width`.
    pub fn local_core_grid_size_with_halo(&self, axis: Axis) -> usize {
        self.grid_size[axis] + 2 * self.halo_width
    }

    /// Total number of compute cores in the partition topology.
    pub fn num_cores(&self) -> usize {
        self.computation_shape.iter().product()
    }

    /// Uniform grid spacing along `axis`, or `None` when the axis has fewer
    /// than two global points.
    pub fn grid_spacing(&self, axis: Axis) -> Option<FloatValue> {
        let n = self.global_grid_size(axis);
        if n < 2 {
            return None;
        }
        Some(self.length[axis] / (n - 1) as FloatValue)
    }
}

impl Validate for GridParametrization {
    fn check(&self, report: &mut ValidationReport) {
        for axis in Axis::ALL {
            if self.computation_shape[axis] < 1 {
                report.push(
                    format!("computation_shape.{axis}"),
                    "must be at least 1 core",
                );
            }
            if self.grid_size[axis] < 1 {
                report.push(format!("grid_size.{axis}"), "must be at least 1 point");
            }

            let length = self.length[axis];
            if !(length.is_finite() && length > 0.0) {
                report.push(format!("length.{axis}"), "must be positive and finite");
            }

            let full = self.physical_full_grid_size[axis];
            let padded = self.global_grid_size(axis);
            if full < 1 {
                report.push(
                    format!("physical_full_grid_size.{axis}"),
                    "must be at least 1 point",
                );
            } else if full > padded {
                report.push(
                    format!("physical_full_grid_size.{axis}"),
                    format!("{full} exceeds computation_shape * grid_size = {padded}"),
                );
            }
        }

        if !(self.dt.is_finite() && self.dt > 0.0) {
            report.push("dt", "must be positive and finite");
        }

        if self.kernel_size < 1 {
            report.push("kernel_size", "must be at least 1");
        } else {
            let required_halo = (self.kernel_size - 1) / 2;
            if self.halo_width < required_halo {
                report.push(
                    "halo_width",
                    format!(
                        "halo width {} cannot support a kernel of size {}; at least {} is needed",
                        self.halo_width, self.kernel_size, required_halo
                    ),
                );
            }
        }

        if self.input_chunk_size < 1 {
            report.push("input_chunk_size", "must be at least 1");
        }
        if self.num_output_splits < 1 {
            report.push("num_output_splits", "must be at least 1");
        }
        if self.num_boundary_points < 1 {
            report.push("num_boundary_points", "must be at least 1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use is_close::is_close;

    fn valid_grid() -> GridParametrization {
        GridParametrization {
            computation_shape: [2, 2, 1].into(),
            length: [1000.0, 1000.0, 2000.0].into(),
            grid_size: [64, 64, 128].into(),
            physical_full_grid_size: [128, 128, 128].into(),
            halo_width: 2,
            dt: 0.05,
            kernel_size: 5,
            ..Default::default()
        }
    }

    #[test]
    fn valid_grid_passes() {
        assert!(valid_grid().validate().is_ok());
    }

    #[test]
    fn global_grid_size_per_axis() {
        let grid = valid_grid();
        for axis in Axis::ALL {
            assert_eq!(
                grid.global_grid_size(axis),
                grid.computation_shape[axis] * grid.grid_size[axis]
            );
        }
        assert_eq!(grid.global_grid_size(Axis::Dim0), 128);
        assert_eq!(grid.global_grid_size(Axis::Dim1), 128);
        assert_eq!(grid.global_grid_size(Axis::Dim2), 128);
    }

    #[test]
    fn local_size_includes_halo_on_both_ends() {
        let grid = valid_grid();
        assert_eq!(grid.local_core_grid_size_with_halo(Axis::Dim0), 68);
        assert_eq!(grid.local_core_grid_size_with_halo(Axis::Dim2), 132);
    }

    #[test]
    fn num_cores_is_topology_product() {
        assert_eq!(valid_grid().num_cores(), 4);
    }

    #[test]
    fn grid_spacing_uses_global_point_count() {
        let mut grid = valid_grid();
        grid.length = [254.0, 254.0, 254.0].into();
        let spacing = grid.grid_spacing(Axis::Dim0).unwrap();
        assert!(is_close!(spacing, 2.0));

        grid.computation_shape = [1, 1, 1].into();
        grid.grid_size = [1, 1, 1].into();
        assert_eq!(grid.grid_spacing(Axis::Dim0), None);
    }

    #[test]
    fn oversized_physical_grid_is_reported_per_axis() {
        let mut grid = valid_grid();
        grid.physical_full_grid_size = [129, 128, 200].into();
        let err = grid.validate().unwrap_err();
        match err {
            ConfigError::Invalid(report) => {
                assert_eq!(report.len(), 2);
                assert_eq!(report.issues()[0].field, "physical_full_grid_size.dim_0");
                assert_eq!(report.issues()[1].field, "physical_full_grid_size.dim_2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn padded_grid_is_legal() {
        let mut grid = valid_grid();
        // 120 physical points per axis packed into 128 padded points.
        grid.physical_full_grid_size = [120, 120, 120].into();
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn halo_too_narrow_for_kernel() {
        let mut grid = valid_grid();
        grid.kernel_size = 9;
        let err = grid.validate().unwrap_err();
        match err {
            ConfigError::Invalid(report) => {
                assert_eq!(report.len(), 1);
                assert_eq!(report.issues()[0].field, "halo_width");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn every_violation_is_reported_in_one_pass() {
        let grid = GridParametrization {
            computation_shape: [0, 2, 1].into(),
            length: [-1.0, 1000.0, 1000.0].into(),
            grid_size: [64, 0, 128].into(),
            physical_full_grid_size: [0, 0, 256].into(),
            dt: 0.0,
            kernel_size: 0,
            input_chunk_size: 0,
            ..Default::default()
        };
        let err = grid.validate().unwrap_err();
        match err {
            ConfigError::Invalid(report) => {
                let fields: Vec<&str> =
                    report.issues().iter().map(|i| i.field.as_str()).collect();
                assert!(fields.contains(&"computation_shape.dim_0"));
                assert!(fields.contains(&"grid_size.dim_1"));
                assert!(fields.contains(&"length.dim_0"));
                assert!(fields.contains(&"physical_full_grid_size.dim_0"));
                assert!(fields.contains(&"physical_full_grid_size.dim_1"));
                assert!(fields.contains(&"physical_full_grid_size.dim_2"));
                assert!(fields.contains(&"dt"));
                assert!(fields.contains(&"kernel_size"));
                assert!(fields.contains(&"input_chunk_size"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn batching_fields_default_to_one() {
        let grid = GridParametrization::default();
        assert_eq!(grid.input_chunk_size, 1);
        assert_eq!(grid.num_output_splits, 1);
        assert_eq!(grid.num_boundary_points, 1);
    }

    #[test]
    fn toml_roundtrip_resolves_defaults() {
        let source = r#"
            halo_width = 2
            dt = 0.05
            kernel_size = 5

            [computation_shape]
            dim_0 = 2
            dim_1 = 2
            dim_2 = 1

            [length]
            dim_0 = 1000.0
            dim_1 = 1000.0
            dim_2 = 2000.0

            [grid_size]
            dim_0 = 64
            dim_1 = 64
            dim_2 = 128

            [physical_full_grid_size]
            dim_0 = 128
            dim_1 = 128
            dim_2 = 128
        "#;
        let grid: GridParametrization = toml::from_str(source).unwrap();
        assert_eq!(grid, valid_grid());
        assert_eq!(grid.num_boundary_points, 1);

        let serialized = toml::to_string(&grid).unwrap();
        let back: GridParametrization = toml::from_str(&serialized).unwrap();
        assert_eq!(grid, back);
    }

    #[test]
    fn json_roundtrip() {
        let grid = valid_grid();
        let json = serde_json::to_string(&grid).unwrap();
        let back: GridParametrization = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
