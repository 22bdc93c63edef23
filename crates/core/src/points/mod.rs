//! Known settlement samples and target nodes

mod known;
mod target;

pub use known::{KnownPoint, KnownPointLayout, KnownPointSet, SkipStats};
pub use target::{retain_below_z, target_nodes_from_table, NodeColumns, NodeId, TargetNode};
