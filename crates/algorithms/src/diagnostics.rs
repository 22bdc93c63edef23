//! Extrapolation diagnostics per load case
//!
//! A report never alters results. It summarizes which targets fell outside
//! the region spanned by the known points so an operator can extend the
//! input field.

use std::fmt;

use serde::{Deserialize, Serialize};
use settlefield_core::{LoadCaseId, NodeId, SkipStats, TargetNode};

/// A target that received no value, coordinates rounded to 0.1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndefinedTarget {
    pub node: NodeId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub load_case: LoadCaseId,
    pub total: usize,
    pub undefined: usize,
    /// Empty when every target is defined
    pub undefined_targets: Vec<UndefinedTarget>,
    /// Known points fed to the interpolant, after mirroring
    pub known_points: usize,
    /// Table content that did not become a known point
    pub skipped: SkipStats,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl DiagnosticReport {
    /// Summarize `values`, which must line up with `targets`.
    pub fn new(
        load_case: LoadCaseId,
        targets: &[TargetNode],
        values: &[Option<f64>],
        known_points: usize,
        skipped: SkipStats,
    ) -> Self {
        assert_eq!(targets.len(), values.len(), "one value per target");

        let undefined_targets: Vec<UndefinedTarget> = targets
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_none())
            .map(|(t, _)| UndefinedTarget {
                node: t.id.clone(),
                x: round1(t.x),
                y: round1(t.y),
            })
            .collect();

        Self {
            load_case,
            total: targets.len(),
            undefined: undefined_targets.len(),
            undefined_targets,
            known_points,
            skipped,
        }
    }

    /// Share of undefined targets in `[0, 1]`; 0 for an empty target list
    pub fn undefined_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.undefined as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.undefined == 0
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LC{}:", self.load_case)?;
        writeln!(
            f,
            "  {} known points ({} skipped: {} missing, {} malformed)",
            self.known_points,
            self.skipped.total(),
            self.skipped.missing,
            self.skipped.malformed
        )?;

        if self.is_complete() {
            return write!(f, "  All {} values interpolated successfully", self.total);
        }

        writeln!(
            f,
            "  {} of {} values undefined ({:.1}%): outside the region spanned by the known points",
            self.undefined,
            self.total,
            100.0 * self.undefined_fraction()
        )?;
        write!(f, "  (X, Y) of undefined targets:")?;
        for t in &self.undefined_targets {
            write!(f, "\n    node {}: ({:.1}, {:.1})", t.node, t.x, t.y)?;
        }
        Ok(())
    }
}
