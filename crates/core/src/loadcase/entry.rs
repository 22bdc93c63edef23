//! Unresolved load case rows as read from the load case table

use serde::{Deserialize, Serialize};

use super::LoadCaseId;
use crate::error::Result;
use crate::table::Table;

/// A load case as supplied by the input table, before its method descriptor
/// has been resolved into a [`super::LoadCaseSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCaseEntry {
    pub id: LoadCaseId,
    pub title: String,
    /// Free-form method string, e.g. `"2D cubic"`
    pub descriptor: String,
    /// Headers of the settlement columns in the known-point table
    pub value_columns: Vec<String>,
}

impl LoadCaseEntry {
    pub fn new(
        id: impl Into<LoadCaseId>,
        title: impl Into<String>,
        descriptor: impl Into<String>,
        value_columns: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            descriptor: descriptor.into(),
            value_columns,
        }
    }
}

/// Read load case entries from a table with `id`, `title`, `method` and
/// `columns` headers. `columns` lists settlement headers separated by `;`.
///
/// Rows without an id are ignored. A row with an empty `columns` cell is
/// kept with no value columns; it fails on its own when the batch runs.
pub fn load_case_entries_from_table(table: &Table) -> Result<Vec<LoadCaseEntry>> {
    let id_col = table.require_column("id")?;
    let title_col = table.require_column("title")?;
    let method_col = table.require_column("method")?;
    let columns_col = table.require_column("columns")?;

    let mut entries = Vec::new();
    for row in table.rows() {
        let text = |col: usize| row.get(col).and_then(|c| c.as_text()).unwrap_or_default();

        let id = text(id_col);
        if id.is_empty() {
            continue;
        }
        let value_columns: Vec<String> = text(columns_col)
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        entries.push(LoadCaseEntry::new(
            id,
            text(title_col),
            text(method_col),
            value_columns,
        ));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell::{self, Empty, Number as N, Text};

    fn header() -> Vec<String> {
        ["id", "title", "method", "columns"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_entries_from_table() {
        let t = Table::new(
            header(),
            vec![
                vec![
                    N(125.0),
                    Text("Settlements before".into()),
                    Text("2D cubic".into()),
                    Text("Z125_1; Z125_2;Z125_3".into()),
                ],
                vec![Empty, Empty, Empty, Empty],
                vec![
                    N(126.0),
                    Text("LT range 1".into()),
                    Text("1D linear".into()),
                    Text("Z126".into()),
                ],
            ],
        );
        let entries = load_case_entries_from_table(&t).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, LoadCaseId::from(125u32));
        assert_eq!(entries[0].value_columns, vec!["Z125_1", "Z125_2", "Z125_3"]);
        assert_eq!(entries[1].descriptor, "1D linear");
    }

    #[test]
    fn test_entry_without_columns_keeps_other_rows() {
        let row = |id: f64, method: &str, columns: Cell| {
            vec![N(id), Text(format!("LC{id}")), Text(method.into()), columns]
        };
        let t = Table::new(
            header(),
            vec![
                row(1.0, "1D linear", Text("Z1".into())),
                row(2.0, "2D linear", Empty),
                row(3.0, "2D cubic", Text("Z1;Z2".into())),
            ],
        );
        let entries = load_case_entries_from_table(&t).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[1].value_columns.is_empty());
        assert_eq!(entries[2].value_columns, vec!["Z1", "Z2"]);
    }
}
