use crate::error::{ReportGridError, Result};
use crate::schema::{Cell, GridData};
use crate::{ReportForest, ReportNode};

/// What a period without a stored value serializes to. Nodes without any
/// values at all always serialize to empty period cells, so that parsing
/// the result reproduces a value-less node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    #[default]
    Empty,
    Zero,
}

#[derive(Debug, Clone)]
pub struct SerializeOptions {
    pub label_columns: usize,
    /// Header names for the label columns; padded with generated names if
    /// shorter than `label_columns`.
    pub label_headers: Vec<String>,
    pub fill: FillPolicy,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            label_columns: crate::parser::DEFAULT_LABEL_COLUMNS,
            label_headers: vec!["Category".to_string(), "Sub1".to_string(), "Sub2".to_string()],
            fill: FillPolicy::default(),
        }
    }
}

/// Flattens a forest back into the rectangular grid form: one row per node
/// in pre-order (category, its subcategories, their leaves), sibling order
/// untouched.
pub fn serialize_forest(forest: &ReportForest, options: &SerializeOptions) -> Result<GridData> {
    let mut header = Vec::with_capacity(options.label_columns + forest.periods.len());
    for i in 0..options.label_columns {
        match options.label_headers.get(i) {
            Some(name) => header.push(name.clone()),
            None => header.push(format!("Sub{}", i)),
        }
    }
    header.extend(forest.periods.iter().cloned());

    let mut rows = Vec::new();
    for root in &forest.roots {
        emit(root, forest, options, &mut rows)?;
    }

    Ok(GridData::new(header, rows))
}

fn emit(
    node: &ReportNode,
    forest: &ReportForest,
    options: &SerializeOptions,
    rows: &mut Vec<Vec<Cell>>,
) -> Result<()> {
    let depth = node.kind.depth();
    if depth >= options.label_columns {
        return Err(ReportGridError::DepthExceedsLabels {
            depth,
            label_columns: options.label_columns,
        });
    }

    let mut row = Vec::with_capacity(options.label_columns + forest.periods.len());
    for col in 0..options.label_columns {
        if col == depth && !node.label.is_empty() {
            row.push(Cell::text(node.label.clone()));
        } else {
            row.push(Cell::Empty);
        }
    }

    match &node.values {
        Some(values) => {
            for period in &forest.periods {
                match values.get(period) {
                    Some(value) => row.push(Cell::number(*value)),
                    None => row.push(match options.fill {
                        FillPolicy::Zero => Cell::number(0.0),
                        FillPolicy::Empty => Cell::Empty,
                    }),
                }
            }
        }
        None => {
            for _ in &forest.periods {
                row.push(Cell::Empty);
            }
        }
    }

    rows.push(row);

    for child in &node.children {
        emit(child, forest, options, rows)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_grid, ParseOptions};
    use crate::NodeKind;
    use std::collections::BTreeMap;

    fn values(pairs: &[(&str, f64)]) -> Option<BTreeMap<String, f64>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    fn node(
        label: &str,
        kind: NodeKind,
        values: Option<BTreeMap<String, f64>>,
        children: Vec<ReportNode>,
    ) -> ReportNode {
        ReportNode {
            label: label.to_string(),
            kind,
            is_total: crate::utils::is_total_label(label),
            values,
            children,
        }
    }

    fn sample_forest() -> ReportForest {
        ReportForest {
            periods: vec!["Jan".to_string(), "Feb".to_string()],
            roots: vec![
                node(
                    "Aset",
                    NodeKind::Category,
                    None,
                    vec![node(
                        "Aset Lancar",
                        NodeKind::Subcategory,
                        None,
                        vec![
                            node("Kas", NodeKind::Leaf, values(&[("Jan", 100.0), ("Feb", 200.0)]), vec![]),
                            node("Bank", NodeKind::Leaf, values(&[("Jan", 50.0), ("Feb", 75.0)]), vec![]),
                        ],
                    )],
                ),
                node(
                    "Jumlah Aset",
                    NodeKind::Category,
                    values(&[("Jan", 150.0), ("Feb", 275.0)]),
                    vec![],
                ),
            ],
        }
    }

    #[test]
    fn test_preorder_rows_and_label_placement() {
        let grid = serialize_forest(&sample_forest(), &SerializeOptions::default()).unwrap();

        assert_eq!(grid.header, vec!["Category", "Sub1", "Sub2", "Jan", "Feb"]);
        assert_eq!(grid.rows.len(), 5);

        assert_eq!(grid.rows[0][0], Cell::text("Aset"));
        assert_eq!(grid.rows[1][1], Cell::text("Aset Lancar"));
        assert_eq!(grid.rows[2][2], Cell::text("Kas"));
        assert_eq!(grid.rows[3][2], Cell::text("Bank"));
        assert_eq!(grid.rows[4][0], Cell::text("Jumlah Aset"));

        // Labels occupy exactly one column per row.
        assert_eq!(grid.rows[2][0], Cell::Empty);
        assert_eq!(grid.rows[2][1], Cell::Empty);
        assert_eq!(grid.rows[2][3], Cell::number(100.0));
        assert_eq!(grid.rows[2][4], Cell::number(200.0));

        // Value-less nodes serialize to empty period cells.
        assert_eq!(grid.rows[0][3], Cell::Empty);
        assert_eq!(grid.rows[0][4], Cell::Empty);
    }

    #[test]
    fn test_round_trip() {
        let forest = sample_forest();
        let grid = serialize_forest(&forest, &SerializeOptions::default()).unwrap();
        let reparsed = parse_grid(&grid, &ParseOptions::default()).unwrap();
        assert_eq!(reparsed, forest);
    }

    #[test]
    fn test_depth_exceeding_label_columns() {
        let forest = ReportForest {
            periods: vec!["Jan".to_string()],
            roots: vec![node(
                "Orphan",
                NodeKind::Leaf,
                values(&[("Jan", 1.0)]),
                vec![],
            )],
        };

        let options = SerializeOptions {
            label_columns: 2,
            label_headers: vec!["Category".to_string(), "Sub1".to_string()],
            ..Default::default()
        };
        let err = serialize_forest(&forest, &options).unwrap_err();
        assert!(matches!(
            err,
            ReportGridError::DepthExceedsLabels {
                depth: 2,
                label_columns: 2
            }
        ));
    }

    #[test]
    fn test_fill_policy_for_missing_periods() {
        let forest = ReportForest {
            periods: vec!["Jan".to_string(), "Feb".to_string()],
            roots: vec![node(
                "Kas",
                NodeKind::Category,
                values(&[("Jan", 10.0)]),
                vec![],
            )],
        };

        let empty = serialize_forest(&forest, &SerializeOptions::default()).unwrap();
        assert_eq!(empty.rows[0][4], Cell::Empty);

        let zeroed = serialize_forest(
            &forest,
            &SerializeOptions {
                fill: FillPolicy::Zero,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(zeroed.rows[0][4], Cell::number(0.0));
    }

    #[test]
    fn test_sibling_order_preserved() {
        let forest = ReportForest {
            periods: vec!["Jan".to_string()],
            roots: vec![
                node("Zulu", NodeKind::Category, None, vec![]),
                node("Alpha", NodeKind::Category, None, vec![]),
                node("Mike", NodeKind::Category, None, vec![]),
            ],
        };

        let grid = serialize_forest(&forest, &SerializeOptions::default()).unwrap();
        assert_eq!(grid.rows[0][0], Cell::text("Zulu"));
        assert_eq!(grid.rows[1][0], Cell::text("Alpha"));
        assert_eq!(grid.rows[2][0], Cell::text("Mike"));
    }
}
