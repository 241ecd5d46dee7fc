//! Collect-then-report validation machinery.
//!
//! Constructing a configuration value never fails: any combination of field
//! values is representable. Semantic checks run in an explicit validation
//! pass that gathers *every* violation before reporting, so a caller can fix
//! a configuration in one round trip instead of chasing errors one at a
//! time.

use crate::errors::{ConfigError, ConfigResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single violated invariant, identified by the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub reason: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Ordered list of every invariant a configuration violates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against `field`.
    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(ValidationIssue::new(field, reason));
    }

    /// Absorb another report, prefixing each issue's field path.
    ///
    /// Used when validating an aggregate document whose members each run
    /// their own checks.
    pub fn extend_prefixed(&mut self, prefix: &str, other: ValidationReport) {
        for issue in other.issues {
            self.issues.push(ValidationIssue::new(
                format!("{}.{}", prefix, issue.field),
                issue.reason,
            ));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// `Ok(())` when empty, otherwise the full report as a
    /// [`ConfigError::Invalid`].
    pub fn into_result(self) -> ConfigResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
            first = false;
        }
        Ok(())
    }
}

/// Validation entry point shared by every configuration component.
pub trait Validate {
    /// Record every violated invariant into `report`.
    fn check(&self, report: &mut ValidationReport);

    /// Run [`check`](Validate::check) and convert a non-empty report into
    /// [`ConfigError::Invalid`].
    fn validate(&self) -> ConfigResult<()> {
        let mut report = ValidationReport::new();
        self.check(&mut report);
        if report.is_empty() {
            debug!("{} validated cleanly", std::any::type_name::<Self>());
        }
        report.into_result()
    }
}
