//! # settlefield algorithms
//!
//! Settlement field reconstruction for settlefield.
//!
//! ## Modules
//!
//! - **interpolation**: 1D curves along the chainage, 2D linear, cubic and
//!   nearest interpolation over scattered points
//! - **diagnostics**: extrapolation reports per load case
//! - **builder**: batch processing of load cases onto structural nodes

pub mod builder;
pub mod diagnostics;
pub mod interpolation;
pub(crate) mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::builder::{
        interpolate_load_case, BatchOutcome, FieldConfig, LoadCaseOutcome, MirrorPolicy,
        ProcessingMode, SettlementField, SettlementFieldBuilder,
    };
    pub use crate::diagnostics::{DiagnosticReport, UndefinedTarget};
    pub use crate::interpolation::{
        build_interpolant, interpolate_targets, CubicInterpolant, CurveInterpolant, Interpolant,
        NearestInterpolant, TinInterpolant,
    };
    pub use settlefield_core::prelude::*;
}
