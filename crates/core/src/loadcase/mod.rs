//! Load case metadata: identifiers, interpolation descriptors and the registry

mod entry;
mod registry;
mod spec;

pub use entry::{load_case_entries_from_table, LoadCaseEntry};
pub use registry::LoadCaseRegistry;
pub use spec::{Dimension, LoadCaseId, LoadCaseSpec, Scheme};
