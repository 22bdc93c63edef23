//! Structural nodes that receive interpolated settlements

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SkipStats;
use crate::error::Result;
use crate::table::{Cell, Table};

/// Opaque node identifier, passed through to the result table unchanged
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A model node to interpolate at. 1D load cases only read `x`; `z` is the
/// model elevation, used only to select nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl TargetNode {
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z: None,
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn chainage(id: impl Into<NodeId>, x: f64) -> Self {
        Self::new(id, x, 0.0)
    }
}

/// Column names of a node table export
#[derive(Debug, Clone)]
pub struct NodeColumns<'a> {
    pub id: &'a str,
    pub x: &'a str,
    pub y: Option<&'a str>,
    /// Read when the table has it
    pub z: Option<&'a str>,
}

impl Default for NodeColumns<'_> {
    fn default() -> Self {
        Self {
            id: "NR",
            x: "X [m]",
            y: Some("Y [m]"),
            z: Some("Z [m]"),
        }
    }
}

/// Read target nodes from a table, in row order.
///
/// Rows without an id or a numeric x are skipped and counted; a missing y
/// reads as 0. The z column is optional and left as `None` when absent.
pub fn target_nodes_from_table(
    table: &Table,
    columns: &NodeColumns<'_>,
) -> Result<(Vec<TargetNode>, SkipStats)> {
    let id_col = table.require_column(columns.id)?;
    let x_col = table.require_column(columns.x)?;
    let y_col = columns.y.map(|y| table.require_column(y)).transpose()?;
    let z_col = columns.z.and_then(|z| table.column(z));

    let mut nodes = Vec::with_capacity(table.n_rows());
    let mut skipped = SkipStats::default();

    for row in table.rows() {
        let get = |col: usize| row.get(col).unwrap_or(&Cell::Empty);

        let Some(id) = get(id_col).as_text() else {
            skipped.missing += 1;
            continue;
        };
        let x = match get(x_col) {
            Cell::Number(v) if !v.is_nan() => *v,
            Cell::Text(_) => {
                skipped.malformed += 1;
                continue;
            }
            _ => {
                skipped.missing += 1;
                continue;
            }
        };
        let y = y_col.and_then(|c| get(c).as_f64()).unwrap_or(0.0);

        let mut node = TargetNode::new(NodeId::new(id), x, y);
        node.z = z_col.and_then(|c| get(c).as_f64());
        nodes.push(node);
    }

    Ok((nodes, skipped))
}

/// Keep the nodes strictly below `max_z`, in order. Nodes without a z are
/// dropped as well. Returns the kept nodes and the number dropped.
pub fn retain_below_z(nodes: Vec<TargetNode>, max_z: f64) -> (Vec<TargetNode>, usize) {
    let before = nodes.len();
    let kept: Vec<TargetNode> = nodes
        .into_iter()
        .filter(|n| n.z.is_some_and(|z| z < max_z))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell::{Empty, Number as N, Text};

    #[test]
    fn test_nodes_from_table() {
        let t = Table::new(
            vec!["NR ".into(), " X [m]".into(), "Y [m]".into(), "Z [m]".into()],
            vec![
                vec![N(1001.0), N(6800.0), N(-12.5), N(-10.0)],
                vec![N(1002.0), N(6810.0), Empty, N(-10.0)],
                vec![Empty, N(6820.0), N(1.0), N(-10.0)],
                vec![N(1004.0), Text("?".into()), N(1.0), N(-10.0)],
            ],
        );
        let (nodes, skipped) = target_nodes_from_table(&t, &NodeColumns::default()).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], TargetNode::new("1001", 6800.0, -12.5).with_z(-10.0));
        assert_eq!(nodes[1].y, 0.0);
        assert_eq!(skipped.missing, 1);
        assert_eq!(skipped.malformed, 1);
    }

    #[test]
    fn test_z_column_is_optional() {
        let t = Table::new(
            vec!["NR".into(), "X [m]".into(), "Y [m]".into()],
            vec![vec![N(1.0), N(2.0), N(3.0)]],
        );
        let (nodes, _) = target_nodes_from_table(&t, &NodeColumns::default()).unwrap();
        assert_eq!(nodes[0].z, None);
    }

    #[test]
    fn test_retain_below_z() {
        let nodes = vec![
            TargetNode::new(1u64, 0.0, 0.0).with_z(-12.0),
            TargetNode::new(2u64, 1.0, 0.0).with_z(-9.591),
            TargetNode::new(3u64, 2.0, 0.0),
            TargetNode::new(4u64, 3.0, 0.0).with_z(-9.6),
        ];
        let (kept, dropped) = retain_below_z(nodes, -9.591);

        let ids: Vec<&str> = kept.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_nodes_missing_column() {
        let t = Table::new(vec!["NR".into()], vec![]);
        assert!(target_nodes_from_table(&t, &NodeColumns::default()).is_err());
    }
}
