use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportGridError {
    #[error("no period columns found in header")]
    NoPeriodColumns,

    #[error("invalid label column count {0}: must be at least 1")]
    InvalidLabelColumnCount(usize),

    #[error("row {row} has {found} cells but the header has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("node depth {depth} exceeds the {label_columns} configured label columns")]
    DepthExceedsLabels { depth: usize, label_columns: usize },

    #[error("row index {index} out of bounds for grid with {rows} rows")]
    RowOutOfBounds { index: usize, rows: usize },

    #[error("column index {index} out of bounds for grid with {columns} columns")]
    ColumnOutOfBounds { index: usize, columns: usize },

    #[error("cannot delete the last remaining row")]
    LastRowUndeletable,

    #[error("cannot delete the last remaining column")]
    LastColumnUndeletable,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportGridError>;
