//! CSV reading into typed tables
//!
//! Uses the `csv` crate. Spreadsheet exports are expected to be saved as CSV
//! with a single header row.

use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::loadcase::{load_case_entries_from_table, LoadCaseEntry};
use crate::points::{target_nodes_from_table, NodeColumns, SkipStats, TargetNode};
use crate::table::{Cell, Table};

/// Read a CSV file with a header row into a [`Table`]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    read_table_from_reader(file)
}

/// Read CSV from any reader into a [`Table`].
///
/// Rows may have differing lengths; short rows are kept as they are so that
/// consumers can count them as malformed.
pub fn read_table_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::parse).collect());
    }

    Ok(Table::new(headers, rows))
}

/// Read the structural node export (`NR`, `X [m]`, `Y [m]`)
pub fn read_target_nodes<P: AsRef<Path>>(path: P) -> Result<(Vec<TargetNode>, SkipStats)> {
    let table = read_table(path)?;
    target_nodes_from_table(&table, &NodeColumns::default())
}

/// Read the load case list (`id`, `title`, `method`, `columns`)
pub fn read_load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<LoadCaseEntry>> {
    let table = read_table(path)?;
    load_case_entries_from_table(&table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell::{Empty, Number as N, Text};

    #[test]
    fn test_read_from_reader() {
        let data = "X, Y1 ,LC125\n6800,0,-12.5\n6850,,nan\n6900,2.5\n";
        let t = read_table_from_reader(data.as_bytes()).unwrap();

        assert_eq!(t.headers(), &["X", "Y1", "LC125"]);
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.rows()[0], vec![N(6800.0), N(0.0), N(-12.5)]);
        assert_eq!(t.rows()[1], vec![N(6850.0), Empty, Empty]);
        assert_eq!(t.rows()[2].len(), 2);
    }

    #[test]
    fn test_text_cells() {
        let data = "id,title\n125,Settlements before\n";
        let t = read_table_from_reader(data.as_bytes()).unwrap();
        assert_eq!(t.rows()[0][1], Text("Settlements before".into()));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.csv");
        std::fs::write(&path, "NR,X [m],Y [m]\n1,0.0,1.0\n").unwrap();

        let t = read_table(&path).unwrap();
        assert_eq!(t.column("Y [m]"), Some(2));
        assert_eq!(t.rows()[0][0], N(1.0));
    }

    #[test]
    fn test_read_nodes_and_load_cases() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = dir.path().join("nodes.csv");
        let cases = dir.path().join("load_cases.csv");
        std::fs::write(&nodes, " NR ,X [m],Y [m]\n1001,6800,-2.5\n1002,6810,\n,6820,1.0\n").unwrap();
        std::fs::write(&cases, "id,title,method,columns\n125,Before,2D linear,Z1;Z2\n").unwrap();

        let (nodes, skipped) = read_target_nodes(&nodes).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].y, 0.0);
        assert_eq!(skipped.missing, 1);

        let entries = read_load_cases(&cases).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value_columns, vec!["Z1".to_string(), "Z2".to_string()]);
    }

    #[test]
    fn test_load_case_without_columns_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let cases = dir.path().join("load_cases.csv");
        std::fs::write(
            &cases,
            "id,title,method,columns\n1,A,1D linear,Z1\n2,B,2D linear,\n3,C,2D cubic,Z1;Z2\n",
        )
        .unwrap();

        let entries = read_load_cases(&cases).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[1].value_columns.is_empty());
        assert_eq!(entries[2].descriptor, "2D cubic");
    }

    #[test]
    fn test_missing_file() {
        let err = read_table("/nonexistent/settlefield/known.csv").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
