//! # Report Grid
//!
//! A library for converting financial reports between their flat,
//! spreadsheet-shaped grid form and a hierarchical category tree, with the
//! editing and verification operations that surround the transform.
//!
//! ## Core Concepts
//!
//! - **Grid**: the rectangular form a report is imported, edited, and
//!   persisted in — a header row (label columns, then one column per
//!   period) plus data rows
//! - **Forest**: the derived category → subcategory → leaf view used for
//!   rendering; never persisted, always recomputed from the grid
//! - **Positional nesting**: which label columns a row populates decides
//!   its level; the parser resolves this once into an explicit `NodeKind`
//! - **Total lines**: rows whose label contains "total"/"jumlah" mark
//!   aggregates rather than entries, and can be cross-checked against the
//!   lines they summarize
//!
//! ## Example
//!
//! ```rust,ignore
//! use report_grid::*;
//!
//! let grid = GridData::new(
//!     vec!["Category".into(), "Sub1".into(), "Sub2".into(), "Jan".into(), "Feb".into()],
//!     vec![
//!         vec![Cell::text("Aset"), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
//!         vec![Cell::Empty, Cell::text("Kas"), Cell::Empty, Cell::text("50,5"), Cell::number(200.0)],
//!     ],
//! );
//!
//! let forest = parse_report_grid(&grid)?;
//! assert_eq!(forest.roots[0].children[0].value_for("Jan"), 50.5);
//!
//! let round_tripped = serialize_report_forest(&forest)?;
//! ```

pub mod document;
pub mod error;
pub mod grid;
pub mod outline;
pub mod parser;
pub mod periods;
pub mod schema;
pub mod serializer;
pub mod totals;
pub mod utils;
pub mod view;

pub use document::ReportDocument;
pub use error::{ReportGridError, Result};
pub use grid::{apply_edits, GridEdit};
pub use outline::{OutlineCategory, ReportOutline};
pub use parser::{parse_grid, GridParser, ParseOptions, DEFAULT_LABEL_COLUMNS};
pub use periods::{find_period_start, is_period_name};
pub use schema::{Cell, GridData, ReportKind};
pub use serializer::{serialize_forest, FillPolicy, SerializeOptions};
pub use totals::{verify_totals, TotalMismatch, TotalsReport};
pub use utils::*;
pub use view::{ExpandState, NodePath};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nesting level of a report line, decided once during parsing. Renderers
/// consume this tag instead of re-inferring structure from cell emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Category,
    Subcategory,
    Leaf,
}

impl NodeKind {
    pub fn depth(&self) -> usize {
        match self {
            NodeKind::Category => 0,
            NodeKind::Subcategory => 1,
            NodeKind::Leaf => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportNode {
    pub label: String,
    pub kind: NodeKind,
    /// Whether this line is an aggregate ("Jumlah Aset") rather than an
    /// individual entry.
    pub is_total: bool,
    /// Period-name → value. `Some` only on value-bearing lines, and then
    /// contains an entry for every period of the report.
    pub values: Option<BTreeMap<String, f64>>,
    pub children: Vec<ReportNode>,
}

impl ReportNode {
    pub fn depth(&self) -> usize {
        self.kind.depth()
    }

    /// Stored value for a period; value-less nodes and unknown periods
    /// read as 0, consistent with the lenient parse policy.
    pub fn value_for(&self, period: &str) -> f64 {
        self.values
            .as_ref()
            .and_then(|v| v.get(period))
            .copied()
            .unwrap_or(0.0)
    }
}

/// The hierarchical view of one report: ordered periods plus the top-level
/// category nodes in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportForest {
    pub periods: Vec<String>,
    pub roots: Vec<ReportNode>,
}

impl ReportForest {
    /// Resolves a view-state path to its node.
    pub fn node_at(&self, path: &NodePath) -> Option<&ReportNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.roots.get(*first)?;
        for &index in rest {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    pub fn node_count(&self) -> usize {
        fn count(node: &ReportNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

pub struct ReportGridProcessor;

impl ReportGridProcessor {
    pub fn parse(grid: &GridData, options: &ParseOptions) -> Result<ReportForest> {
        info!(
            "Parsing report grid: {} rows, {} columns",
            grid.row_count(),
            grid.column_count()
        );

        let forest = parser::parse_grid(grid, options)?;

        debug!(
            "Parsed {} top-level lines ({} nodes) across {} periods",
            forest.roots.len(),
            forest.node_count(),
            forest.periods.len()
        );

        Ok(forest)
    }

    /// Parses and additionally cross-checks every total line against the
    /// lines it summarizes. Mismatches are logged and reported, never
    /// corrected.
    pub fn parse_with_verification(
        grid: &GridData,
        options: &ParseOptions,
        tolerance: f64,
    ) -> Result<(ReportForest, TotalsReport)> {
        let forest = Self::parse(grid, options)?;
        let report = verify_totals(&forest, tolerance);

        for mismatch in &report.mismatches {
            warn!(
                "Total line '{}' for {} states {} but its lines sum to {}",
                mismatch.label, mismatch.period, mismatch.stated, mismatch.expected
            );
        }

        Ok((forest, report))
    }
}

pub fn parse_report_grid(grid: &GridData) -> Result<ReportForest> {
    ReportGridProcessor::parse(grid, &ParseOptions::default())
}

pub fn serialize_report_forest(forest: &ReportForest) -> Result<GridData> {
    serializer::serialize_forest(forest, &SerializeOptions::default())
}
