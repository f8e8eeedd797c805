use crate::error::Result;
use crate::schema::{Cell, GridData, ReportKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A report as the persistence layer stores it: flat grid only, field
/// names matching the upstream document store (`jsonHeader`/`jsonData`).
/// The hierarchical forest is always re-derived and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    #[schemars(description = "Display title, e.g. 'Neraca 2021'")]
    pub title: String,

    #[schemars(description = "Which financial statement this report is")]
    pub kind: ReportKind,

    #[schemars(description = "Reporting year the period columns belong to")]
    pub year: i32,

    #[schemars(description = "Header row: label columns followed by period columns")]
    pub json_header: Vec<String>,

    #[schemars(description = "Data rows, one array of cells per grid row")]
    pub json_data: Vec<Vec<Cell>>,
}

impl ReportDocument {
    pub fn from_grid(title: impl Into<String>, kind: ReportKind, year: i32, grid: GridData) -> Self {
        Self {
            title: title.into(),
            kind,
            year,
            json_header: grid.header,
            json_data: grid.rows,
        }
    }

    /// Rehydrates the grid, padding ragged rows: documents written by
    /// older importers sometimes drop trailing empty cells.
    pub fn into_grid(self) -> GridData {
        let mut grid = GridData::new(self.json_header, self.json_data);
        grid.pad_rows();
        grid
    }

    pub fn to_grid(&self) -> GridData {
        self.clone().into_grid()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportDocument)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ReportDocument {
        ReportDocument {
            title: "Neraca 2021".to_string(),
            kind: ReportKind::BalanceSheet,
            year: 2021,
            json_header: vec!["Category".into(), "Sub1".into(), "Jan".into()],
            json_data: vec![
                vec![Cell::text("Aset"), Cell::Empty, Cell::Empty],
                vec![Cell::Empty, Cell::text("Kas"), Cell::number(100.0)],
            ],
        }
    }

    #[test]
    fn test_document_field_names_are_camel_case() {
        let json = sample_document().to_json().unwrap();
        assert!(json.contains("\"jsonHeader\""));
        assert!(json.contains("\"jsonData\""));
        assert!(json.contains("\"BalanceSheet\""));
        assert!(!json.contains("json_header"));
    }

    #[test]
    fn test_document_json_round_trip() {
        let document = sample_document();
        let json = document.to_json().unwrap();
        let restored = ReportDocument::from_json(&json).unwrap();
        assert_eq!(restored, document);
    }

    #[test]
    fn test_rehydration_pads_ragged_rows() {
        let mut document = sample_document();
        document.json_data[0].pop();
        document.json_data[0].pop();

        let grid = document.into_grid();
        assert!(grid.is_rectangular());
        assert_eq!(grid.rows[0].len(), 3);
        assert_eq!(grid.cell(0, 0), &Cell::text("Aset"));
    }

    #[test]
    fn test_grid_round_trip_through_document() {
        let grid = sample_document().into_grid();
        let document =
            ReportDocument::from_grid("Neraca 2021", ReportKind::BalanceSheet, 2021, grid.clone());
        assert_eq!(document.to_grid(), grid);
    }

    #[test]
    fn test_schema_generation() {
        let schema = ReportDocument::schema_as_json().unwrap();
        assert!(schema.contains("jsonHeader"));
        assert!(schema.contains("jsonData"));
        assert!(schema.contains("year"));
    }
}
