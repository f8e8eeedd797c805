use crate::error::{ReportGridError, Result};
use crate::schema::{Cell, GridData};
use serde::{Deserialize, Serialize};

/// A single structural edit to a grid, as issued by the table editor.
/// Every edit preserves rectangularity; edits that would leave the grid
/// without any rows or columns are rejected outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GridEdit {
    /// Append an empty row after the last row.
    AppendRow,

    /// Insert an empty row so it ends up at `index`; rows at `index` and
    /// below shift down. `index` equal to the row count appends.
    InsertRowAbove { index: usize },

    /// Insert an empty row immediately after `index`.
    InsertRowBelow { index: usize },

    DeleteRow { index: usize },

    /// Insert an empty column (with the given header name) at `index`;
    /// columns at `index` and to the right shift right.
    InsertColumnLeft { index: usize, name: String },

    /// Insert an empty column immediately to the right of `index`.
    InsertColumnRight { index: usize, name: String },

    DeleteColumn { index: usize },

    /// Overwrite one cell.
    SetCell {
        row: usize,
        column: usize,
        value: Cell,
    },
}

impl GridEdit {
    pub fn apply(&self, grid: &mut GridData) -> Result<()> {
        match self {
            GridEdit::AppendRow => {
                grid.rows.push(empty_row(grid.column_count()));
            }

            GridEdit::InsertRowAbove { index } => {
                if *index > grid.row_count() {
                    return Err(row_bounds(*index, grid));
                }
                grid.rows.insert(*index, empty_row(grid.column_count()));
            }

            GridEdit::InsertRowBelow { index } => {
                if *index >= grid.row_count() {
                    return Err(row_bounds(*index, grid));
                }
                grid.rows.insert(index + 1, empty_row(grid.column_count()));
            }

            GridEdit::DeleteRow { index } => {
                if *index >= grid.row_count() {
                    return Err(row_bounds(*index, grid));
                }
                if grid.row_count() == 1 {
                    return Err(ReportGridError::LastRowUndeletable);
                }
                grid.rows.remove(*index);
            }

            GridEdit::InsertColumnLeft { index, name } => {
                if *index >= grid.column_count() {
                    return Err(column_bounds(*index, grid));
                }
                insert_column(grid, *index, name);
            }

            GridEdit::InsertColumnRight { index, name } => {
                if *index >= grid.column_count() {
                    return Err(column_bounds(*index, grid));
                }
                insert_column(grid, index + 1, name);
            }

            GridEdit::DeleteColumn { index } => {
                if *index >= grid.column_count() {
                    return Err(column_bounds(*index, grid));
                }
                if grid.column_count() == 1 {
                    return Err(ReportGridError::LastColumnUndeletable);
                }
                grid.header.remove(*index);
                for row in &mut grid.rows {
                    if *index < row.len() {
                        row.remove(*index);
                    }
                }
            }

            GridEdit::SetCell { row, column, value } => {
                if *row >= grid.row_count() {
                    return Err(row_bounds(*row, grid));
                }
                if *column >= grid.column_count() {
                    return Err(column_bounds(*column, grid));
                }
                grid.rows[*row][*column] = value.clone();
            }
        }

        Ok(())
    }
}

/// Applies edits in order, stopping at the first rejected one. The grid is
/// left as of the last successful edit.
pub fn apply_edits(grid: &mut GridData, edits: &[GridEdit]) -> Result<()> {
    for edit in edits {
        edit.apply(grid)?;
    }
    Ok(())
}

fn empty_row(width: usize) -> Vec<Cell> {
    vec![Cell::Empty; width]
}

fn insert_column(grid: &mut GridData, at: usize, name: &str) {
    grid.header.insert(at, name.to_string());
    for row in &mut grid.rows {
        row.insert(at.min(row.len()), Cell::Empty);
    }
}

fn row_bounds(index: usize, grid: &GridData) -> ReportGridError {
    ReportGridError::RowOutOfBounds {
        index,
        rows: grid.row_count(),
    }
}

fn column_bounds(index: usize, grid: &GridData) -> ReportGridError {
    ReportGridError::ColumnOutOfBounds {
        index,
        columns: grid.column_count(),
    }
}
