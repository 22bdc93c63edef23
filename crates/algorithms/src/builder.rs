//! Settlement field construction for a batch of load cases
//!
//! For every load case: resolve its method descriptor, pull its known points
//! out of the shared table, interpolate onto the shared target list and
//! summarize the undefined targets. A failing load case is reported next to
//! the others and never aborts the batch.

use settlefield_core::{
    Dimension, Error, KnownPointLayout, KnownPointSet, LoadCaseEntry, LoadCaseId, LoadCaseRegistry,
    LoadCaseSpec, NodeId, Result, Table, TargetNode,
};
use tracing::{debug, warn};

use crate::diagnostics::DiagnosticReport;
use crate::interpolation::{build_interpolant, interpolate_targets};
use crate::maybe_rayon::*;

/// Reflection of 2D known points about the longitudinal axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MirrorPolicy {
    #[default]
    None,
    /// Add every 2D point again with `y → -y`
    AboutCenterline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    Sequential,
    /// Load cases on the rayon pool; sequential without the `parallel` feature
    Parallel,
}

impl Default for ProcessingMode {
    fn default() -> Self {
        if parallel_available() {
            ProcessingMode::Parallel
        } else {
            ProcessingMode::Sequential
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldConfig {
    pub mirror: MirrorPolicy,
    pub mode: ProcessingMode,
}

/// Interpolated settlements of one load case, in target input order
#[derive(Debug, Clone)]
pub struct SettlementField {
    spec: LoadCaseSpec,
    values: Vec<(NodeId, Option<f64>)>,
    report: DiagnosticReport,
}

impl SettlementField {
    pub fn spec(&self) -> &LoadCaseSpec {
        &self.spec
    }

    pub fn values(&self) -> &[(NodeId, Option<f64>)] {
        &self.values
    }

    pub fn report(&self) -> &DiagnosticReport {
        &self.report
    }

    pub fn value_of(&self, node: &NodeId) -> Option<f64> {
        self.values
            .iter()
            .find(|(id, _)| id == node)
            .and_then(|(_, v)| *v)
    }
}

/// Result of one load case within a batch
#[derive(Debug)]
pub struct LoadCaseOutcome {
    pub id: LoadCaseId,
    pub title: String,
    pub result: Result<SettlementField>,
}

#[derive(Debug)]
pub struct BatchOutcome {
    /// Load cases whose descriptor resolved, in input order
    pub registry: LoadCaseRegistry,
    /// One outcome per input entry, in input order
    pub outcomes: Vec<LoadCaseOutcome>,
}

impl BatchOutcome {
    pub fn fields(&self) -> impl Iterator<Item = &SettlementField> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&LoadCaseId, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.id, e)))
    }

    pub fn n_succeeded(&self) -> usize {
        self.fields().count()
    }

    pub fn n_failed(&self) -> usize {
        self.outcomes.len() - self.n_succeeded()
    }

    /// True when there was at least one load case and none succeeded
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.n_succeeded() == 0
    }
}

/// Interpolate one load case onto `targets`.
///
/// # Errors
/// [`Error::InsufficientPoints`] if `known` cannot support the scheme,
/// [`Error::InvalidParameter`] if `known` has a different dimension than `spec`.
pub fn interpolate_load_case(
    spec: &LoadCaseSpec,
    known: &KnownPointSet,
    targets: &[TargetNode],
) -> Result<SettlementField> {
    if known.dimension() != spec.dimension() {
        return Err(Error::InvalidParameter {
            name: "known",
            value: known.dimension().to_string(),
            reason: format!("load case {} is {}", spec.id(), spec.dimension()),
        });
    }

    let interpolant = build_interpolant(known, spec.scheme())?;
    let values = interpolate_targets(interpolant.as_ref(), targets);

    let only_values: Vec<Option<f64>> = values.iter().map(|(_, v)| *v).collect();
    let report = DiagnosticReport::new(
        spec.id().clone(),
        targets,
        &only_values,
        known.len(),
        known.skipped(),
    );

    Ok(SettlementField {
        spec: spec.clone(),
        values,
        report,
    })
}

/// Runs load cases against one known-point table and one target list
#[derive(Debug, Clone)]
pub struct SettlementFieldBuilder<'a> {
    config: FieldConfig,
    table: &'a Table,
    layout: KnownPointLayout,
    targets: &'a [TargetNode],
}

impl<'a> SettlementFieldBuilder<'a> {
    pub fn new(table: &'a Table, layout: KnownPointLayout, targets: &'a [TargetNode]) -> Self {
        Self {
            config: FieldConfig::default(),
            table,
            layout,
            targets,
        }
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> FieldConfig {
        self.config
    }

    /// Known points of `spec` from the table, mirrored per the configured policy
    pub fn known_points(&self, spec: &LoadCaseSpec, value_columns: &[String]) -> Result<KnownPointSet> {
        if value_columns.is_empty() {
            return Err(Error::InvalidParameter {
                name: "columns",
                value: String::new(),
                reason: format!("load case {} lists no settlement columns", spec.id()),
            });
        }
        let cols = value_columns
            .iter()
            .map(|name| self.table.require_column(name))
            .collect::<Result<Vec<_>>>()?;

        let set = KnownPointSet::from_table(
            spec.id().clone(),
            spec.dimension(),
            self.table,
            &self.layout,
            &cols,
        )?;

        let skipped = set.skipped();
        if skipped.total() > 0 {
            debug!(
                load_case = %spec.id(),
                missing = skipped.missing,
                malformed = skipped.malformed,
                "skipped known-point cells"
            );
        }

        match (self.config.mirror, spec.dimension()) {
            (MirrorPolicy::AboutCenterline, Dimension::TwoD) => Ok(set.mirrored()),
            _ => Ok(set),
        }
    }

    /// Build the settlement field of one resolved load case
    pub fn build_one(&self, spec: &LoadCaseSpec, value_columns: &[String]) -> Result<SettlementField> {
        let known = self.known_points(spec, value_columns)?;
        debug!(
            load_case = %spec.id(),
            dimension = %spec.dimension(),
            scheme = %spec.scheme(),
            known_points = known.len(),
            targets = self.targets.len(),
            "interpolating load case"
        );

        let field = interpolate_load_case(spec, &known, self.targets)?;

        let report = field.report();
        if !report.is_complete() {
            warn!(
                load_case = %spec.id(),
                undefined = report.undefined,
                total = report.total,
                "targets outside the known region left undefined"
            );
        }
        Ok(field)
    }

    /// Process every entry, one outcome per entry in input order.
    ///
    /// Descriptors resolve sequentially so duplicate ids are caught in input
    /// order; interpolation then runs per [`ProcessingMode`].
    pub fn run(&self, entries: &[LoadCaseEntry]) -> BatchOutcome {
        let mut registry = LoadCaseRegistry::new();

        let jobs: Vec<(&LoadCaseEntry, Result<LoadCaseSpec>)> = entries
            .iter()
            .map(|entry| {
                let spec = LoadCaseSpec::from_descriptor(
                    entry.id.clone(),
                    entry.title.clone(),
                    &entry.descriptor,
                )
                .and_then(|spec| registry.insert(spec.clone()).map(|()| spec));
                (entry, spec)
            })
            .collect();

        let work = |(entry, spec): (&LoadCaseEntry, Result<LoadCaseSpec>)| {
            let result = spec.and_then(|spec| self.build_one(&spec, &entry.value_columns));
            if let Err(e) = &result {
                warn!(load_case = %entry.id, error = %e, "load case failed");
            }
            LoadCaseOutcome {
                id: entry.id.clone(),
                title: entry.title.clone(),
                result,
            }
        };

        let outcomes: Vec<LoadCaseOutcome> = match self.config.mode {
            ProcessingMode::Parallel => jobs.into_par_iter().map(work).collect(),
            ProcessingMode::Sequential => jobs.into_iter().map(work).collect(),
        };

        BatchOutcome { registry, outcomes }
    }
}
