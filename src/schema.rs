use crate::error::{ReportGridError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum ReportKind {
    #[schemars(description = "Statement of financial position: assets, liabilities, equity")]
    BalanceSheet,

    #[schemars(description = "Profit and loss statement: revenue, expenses, net result")]
    ProfitLoss,

    #[schemars(description = "Revenue breakdown report: income lines only")]
    Revenue,
}

/// A single grid cell as it arrives from spreadsheet import or the web
/// editor: a number, free text, or nothing at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Cell::Number(value)
    }

    /// Empty, null, or whitespace-only cells all count as blank when
    /// deciding row structure.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// The flat, rectangular representation of a report: one header row naming
/// label and period columns, followed by data rows. This is the only form
/// that is ever persisted; the hierarchical forest is derived from it on
/// demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GridData {
    #[schemars(description = "Column names: label columns first, then one column per period")]
    pub header: Vec<String>,

    #[schemars(description = "Data rows; each row has one cell per header column")]
    pub rows: Vec<Vec<Cell>>,
}

impl GridData {
    pub fn new(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { header, rows }
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Strict rectangularity check for data arriving over the persistence
    /// boundary. Rows longer than the header are also rejected.
    pub fn ensure_rectangular(&self) -> Result<()> {
        let expected = self.header.len();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ReportGridError::RaggedRow {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Defensive padding: extend short rows with empty cells and truncate
    /// overlong ones so every row matches the header width.
    pub fn pad_rows(&mut self) {
        let expected = self.header.len();
        for row in &mut self.rows {
            if row.len() < expected {
                row.resize(expected, Cell::Empty);
            } else if row.len() > expected {
                row.truncate(expected);
            }
        }
    }

    pub fn is_rectangular(&self) -> bool {
        let expected = self.header.len();
        self.rows.iter().all(|r| r.len() == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> GridData {
        GridData::new(
            vec!["Category".into(), "Sub".into(), "Jan".into()],
            vec![
                vec![Cell::text("Aset"), Cell::Empty, Cell::Empty],
                vec![Cell::Empty, Cell::text("Kas"), Cell::number(100.0)],
            ],
        )
    }

    #[test]
    fn test_cell_blankness() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::text("   ").is_blank());
        assert!(!Cell::text("Kas").is_blank());
        assert!(!Cell::number(0.0).is_blank());
    }

    #[test]
    fn test_cell_from_str_trims_to_empty() {
        assert_eq!(Cell::from("  "), Cell::Empty);
        assert_eq!(Cell::from("Kas"), Cell::text("Kas"));
    }

    #[test]
    fn test_cell_serde_shapes() {
        let json = serde_json::to_string(&vec![
            Cell::text("Kas"),
            Cell::number(50.5),
            Cell::Empty,
        ])
        .unwrap();
        assert_eq!(json, r#"["Kas",50.5,null]"#);

        let cells: Vec<Cell> = serde_json::from_str(r#"["Aset",0,null,""]"#).unwrap();
        assert_eq!(cells[0], Cell::text("Aset"));
        assert_eq!(cells[1], Cell::number(0.0));
        assert_eq!(cells[2], Cell::Empty);
        assert_eq!(cells[3], Cell::Text(String::new()));
    }

    #[test]
    fn test_ensure_rectangular() {
        let mut grid = sample_grid();
        assert!(grid.ensure_rectangular().is_ok());

        grid.rows[1].pop();
        let err = grid.ensure_rectangular().unwrap_err();
        match err {
            ReportGridError::RaggedRow {
                row,
                expected,
                found,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pad_rows() {
        let mut grid = sample_grid();
        grid.rows[0].pop();
        grid.rows[1].push(Cell::number(1.0));
        grid.pad_rows();

        assert!(grid.is_rectangular());
        assert_eq!(grid.cell(0, 2), &Cell::Empty);
        assert_eq!(grid.rows[1].len(), 3);
    }

    #[test]
    fn test_out_of_bounds_cell_is_empty() {
        let grid = sample_grid();
        assert_eq!(grid.cell(10, 10), &Cell::Empty);
    }
}
