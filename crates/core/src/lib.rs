//! # settlefield core
//!
//! Core types, errors and table I/O for settlement field reconstruction.
//!
//! This crate provides:
//! - `LoadCaseSpec` / `LoadCaseRegistry`: validated load case metadata
//! - `KnownPointSet`: settlement samples of a load case
//! - `TargetNode`: structural nodes to interpolate at
//! - `Table` / `Cell`: typed tabular input handed over by readers
//! - I/O collaborators: CSV tables in, SOFiSTiK Teddy `.dat` files out

pub mod error;
pub mod io;
pub mod loadcase;
pub mod points;
pub mod table;

pub use error::{Error, Result};
pub use loadcase::{Dimension, LoadCaseEntry, LoadCaseId, LoadCaseRegistry, LoadCaseSpec, Scheme};
pub use points::{KnownPoint, KnownPointLayout, KnownPointSet, NodeId, SkipStats, TargetNode};
pub use table::{Cell, Row, Table};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::loadcase::{Dimension, LoadCaseEntry, LoadCaseId, LoadCaseSpec, Scheme};
    pub use crate::points::{KnownPoint, KnownPointSet, NodeId, TargetNode};
    pub use crate::table::{Cell, Table};
}
