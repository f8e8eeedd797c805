use crate::error::{ReportGridError, Result};
use crate::periods::find_period_start;
use crate::schema::GridData;
use crate::utils::{is_total_label, lenient_number};
use crate::{NodeKind, ReportForest, ReportNode};
use log::debug;
use std::collections::BTreeMap;

pub const DEFAULT_LABEL_COLUMNS: usize = 3;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How many leading columns carry labels (category, first and second
    /// subcategory level). Columns past the first recognized period header
    /// are never treated as labels regardless of this setting.
    pub label_columns: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            label_columns: DEFAULT_LABEL_COLUMNS,
        }
    }
}

pub struct GridParser {
    options: ParseOptions,
}

impl GridParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Single left-to-right pass over the rows. Which label columns are
    /// populated decides each row's nesting level; the decision is made
    /// here exactly once and recorded as the node's `NodeKind`.
    pub fn parse(&self, grid: &GridData) -> Result<ReportForest> {
        if self.options.label_columns == 0 {
            return Err(ReportGridError::InvalidLabelColumnCount(0));
        }

        let period_start =
            find_period_start(&grid.header).ok_or(ReportGridError::NoPeriodColumns)?;
        let label_width = self.options.label_columns.min(period_start);
        if label_width == 0 {
            return Err(ReportGridError::InvalidLabelColumnCount(0));
        }

        let periods: Vec<String> = grid.header[period_start..].to_vec();
        let mut roots: Vec<ReportNode> = Vec::new();
        let mut skipped = 0usize;

        for row_idx in 0..grid.row_count() {
            let first_label = (0..label_width)
                .find_map(|col| grid.cell(row_idx, col).as_label().map(|l| (col, l)));

            let values = row_values(grid, row_idx, period_start, &periods);

            match first_label {
                Some((0, label)) => {
                    roots.push(make_node(label, NodeKind::Category, values));
                }
                Some((col, label)) => {
                    let kind = if col == 1 {
                        NodeKind::Subcategory
                    } else {
                        NodeKind::Leaf
                    };
                    attach(&mut roots, make_node(label, kind, values));
                }
                None => {
                    // No label at all: value-bearing rows still belong to
                    // the innermost open node, fully blank rows are noise.
                    if let Some(values) = values {
                        attach(&mut roots, make_node("", NodeKind::Leaf, Some(values)));
                    } else {
                        skipped += 1;
                    }
                }
            }
        }

        if skipped > 0 {
            debug!("skipped {} blank rows while parsing grid", skipped);
        }

        Ok(ReportForest { periods, roots })
    }
}

pub fn parse_grid(grid: &GridData, options: &ParseOptions) -> Result<ReportForest> {
    GridParser::new(options.clone()).parse(grid)
}

fn make_node(label: &str, kind: NodeKind, values: Option<BTreeMap<String, f64>>) -> ReportNode {
    ReportNode {
        label: label.to_string(),
        kind,
        is_total: is_total_label(label),
        values,
        children: Vec::new(),
    }
}

/// Period cells for one row. `Some` only when at least one cell is
/// non-blank; the map then carries every period, with unparseable cells
/// leniently coerced to 0.0.
fn row_values(
    grid: &GridData,
    row: usize,
    period_start: usize,
    periods: &[String],
) -> Option<BTreeMap<String, f64>> {
    let any_present = (0..periods.len()).any(|i| !grid.cell(row, period_start + i).is_blank());
    if !any_present {
        return None;
    }

    let mut values = BTreeMap::new();
    for (i, period) in periods.iter().enumerate() {
        values.insert(period.clone(), lenient_number(grid.cell(row, period_start + i)));
    }
    Some(values)
}

/// Attaches a subcategory or leaf to the innermost open node. A
/// subcategory goes under the current category; a leaf goes under the
/// current subcategory, or directly under the category when none is open.
/// With no category open at all the node is promoted to the top level.
fn attach(roots: &mut Vec<ReportNode>, node: ReportNode) {
    let Some(category) = roots.last_mut() else {
        let mut promoted = node;
        promoted.kind = NodeKind::Category;
        roots.push(promoted);
        return;
    };

    match node.kind {
        NodeKind::Subcategory => category.children.push(node),
        _ => {
            let open_subcategory = category
                .children
                .last_mut()
                .filter(|child| child.kind == NodeKind::Subcategory);
            match open_subcategory {
                Some(subcategory) => subcategory.children.push(node),
                None => category.children.push(node),
            }
        }
    }
}
