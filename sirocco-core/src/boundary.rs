//! Per-variable boundary-condition declarations.
//!
//! Each transported variable (velocity components, scalars, pressure, ...)
//! carries one [`BoundaryConditionSet`] naming the condition applied on each
//! of the six domain faces (three axes, low and high end). Faces on periodic
//! axes need no declaration. The serialized form is an ordered list of
//! entries keyed by `(dim, location)`; duplicates are resolved
//! last-writer-wins.

use crate::triple::{Axis, Face};
use crate::validation::{Validate, ValidationReport};
use crate::FloatValue;
use log::warn;
use serde::{Deserialize, Serialize};

/// Kind of condition applied on a single face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryConditionType {
    /// No condition declared. Invalid on any face of a non-periodic axis.
    #[default]
    Unknown,
    /// Fixed value on the face; requires an associated value.
    Dirichlet,
    /// Zero-gradient condition.
    Neumann,
    /// Second-order variant of the zero-gradient condition.
    Neumann2,
    /// Freeze whatever value the face currently holds.
    NoTouch,
    /// The axis wraps around; the face needs no physical condition.
    Periodic,
}

/// Condition for one `(dim, location)` face of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryInfo {
    pub dim: Axis,
    pub location: Face,
    #[serde(default)]
    pub kind: BoundaryConditionType,
    /// Face value; only meaningful when `kind` is
    /// [`BoundaryConditionType::Dirichlet`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FloatValue>,
}

impl BoundaryInfo {
    /// The Dirichlet face value, gated on the kind actually being Dirichlet.
    ///
    /// A value carried by a non-Dirichlet entry is legal in the serialized
    /// form but has no physical meaning; this accessor is how consumers must
    /// read face values.
    pub fn dirichlet_value(&self) -> Option<FloatValue> {
        match self.kind {
            BoundaryConditionType::Dirichlet => self.value,
            _ => None,
        }
    }
}

/// Boundary declarations for a single named variable.
///
/// For a fully specified domain, exactly one entry exists per
/// `(dim, location)` pair, six in total, unless an axis is periodic, in
/// which case that axis's entries may be omitted.
///
/// # Examples
///
/// ```rust
/// use sirocco_core::boundary::{BoundaryConditionSet, BoundaryConditionType};
/// use sirocco_core::triple::{Axis, Face};
///
/// let bc = BoundaryConditionSet::new("u")
///     .dirichlet(Axis::Dim0, Face::Low, 0.0)
///     .dirichlet(Axis::Dim0, Face::High, 0.0)
///     .face(Axis::Dim2, Face::Low, BoundaryConditionType::Neumann)
///     .face(Axis::Dim2, Face::High, BoundaryConditionType::Neumann);
///
/// // Axis 1 is periodic, so its faces need no declaration.
/// assert!(bc.is_complete(&[Axis::Dim1]));
/// assert!(!bc.is_complete(&[]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConditionSet {
    /// Variable identifier. Must be non-empty.
    pub name: String,
    #[serde(default)]
    pub boundary_info: Vec<BoundaryInfo>,
}

impl BoundaryConditionSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boundary_info: Vec::new(),
        }
    }

    /// Append a face declaration without a value.
    pub fn face(mut self, dim: Axis, location: Face, kind: BoundaryConditionType) -> Self {
        self.boundary_info.push(BoundaryInfo {
            dim,
            location,
            kind,
            value: None,
        });
        self
    }

    /// Append a Dirichlet face declaration with its value.
    pub fn dirichlet(mut self, dim: Axis, location: Face, value: FloatValue) -> Self {
        self.boundary_info.push(BoundaryInfo {
            dim,
            location,
            kind: BoundaryConditionType::Dirichlet,
            value: Some(value),
        });
        self
    }

    /// The entry governing `(dim, location)`, or `None` when that face was
    /// never declared. A declared face whose kind is still
    /// [`BoundaryConditionType::Unknown`] returns `Some`, so "not specified"
    /// and "specified as unknown" stay distinguishable.
    ///
    /// Duplicate declarations resolve last-writer-wins.
    pub fn info_for(&self, dim: Axis, location: Face) -> Option<&BoundaryInfo> {
        self.boundary_info
            .iter()
            .rev()
            .find(|info| info.dim == dim && info.location == location)
    }

    /// Whether every face of every non-periodic axis carries a known
    /// condition. Axes listed in `periodic_axes` are exempt.
    pub fn is_complete(&self, periodic_axes: &[Axis]) -> bool {
        Axis::ALL
            .into_iter()
            .filter(|axis| !periodic_axes.contains(axis))
            .all(|axis| {
                Face::BOTH.into_iter().all(|face| {
                    self.info_for(axis, face)
                        .is_some_and(|info| info.kind != BoundaryConditionType::Unknown)
                })
            })
    }

    /// Copy with duplicate `(dim, location)` entries collapsed
    /// last-writer-wins, in canonical axis-major order.
    pub fn normalized(&self) -> Self {
        let mut boundary_info = Vec::new();
        for axis in Axis::ALL {
            for face in Face::BOTH {
                if let Some(info) = self.info_for(axis, face) {
                    boundary_info.push(*info);
                }
            }
        }
        Self {
            name: self.name.clone(),
            boundary_info,
        }
    }

    /// Record every violation, exempting the given periodic axes from the
    /// six-face completeness requirement.
    pub fn check_with_periodic(&self, report: &mut ValidationReport, periodic_axes: &[Axis]) {
        if self.name.is_empty() {
            report.push("name", "variable name must be non-empty");
        }

        for axis in Axis::ALL {
            if periodic_axes.contains(&axis) {
                continue;
            }
            for face in Face::BOTH {
                match self.info_for(axis, face) {
                    None => report.push(
                        format!("boundary_info.{axis}.{face}"),
                        format!("no condition declared for variable '{}'", self.name),
                    ),
                    Some(info) if info.kind == BoundaryConditionType::Unknown => report.push(
                        format!("boundary_info.{axis}.{face}"),
                        format!(
                            "condition for variable '{}' is unknown on a non-periodic axis",
                            self.name
                        ),
                    ),
                    Some(_) => {}
                }
            }
        }

        for info in &self.boundary_info {
            if info.value.is_some() && info.kind != BoundaryConditionType::Dirichlet {
                warn!(
                    "variable '{}', face ({}, {}): value is ignored for {:?} conditions",
                    self.name, info.dim, info.location, info.kind
                );
            }
        }
    }
}

impl Validate for BoundaryConditionSet {
    /// Checks with no axis treated as periodic. Use
    /// [`check_with_periodic`](BoundaryConditionSet::check_with_periodic)
    /// when some axes wrap.
    fn check(&self, report: &mut ValidationReport) {
        self.check_with_periodic(report, &[]);
    }
}
