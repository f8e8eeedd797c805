use crate::{ReportForest, ReportNode};
use std::collections::BTreeMap;

/// One period of one total line whose stated value disagrees with the
/// lines it summarizes.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalMismatch {
    pub label: String,
    pub period: String,
    pub stated: f64,
    pub expected: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TotalsReport {
    /// Number of total lines that carried values and were checked.
    pub checked: usize,
    pub mismatches: Vec<TotalMismatch>,
}

impl TotalsReport {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Checks every `is_total` line against the non-total siblings it
/// summarizes. Reports with group subtotals state either "everything
/// since the previous total" or "everything so far" (grand totals), so a
/// total is accepted when it matches either sum within `tolerance`.
/// Advisory only: stored reports are authoritative and lenient parsing
/// legitimately produces grids whose totals disagree with their lines.
pub fn verify_totals(forest: &ReportForest, tolerance: f64) -> TotalsReport {
    let mut report = TotalsReport::default();
    check_siblings(&forest.roots, &forest.periods, tolerance, &mut report);
    report
}

fn check_siblings(
    siblings: &[ReportNode],
    periods: &[String],
    tolerance: f64,
    report: &mut TotalsReport,
) {
    let mut group: BTreeMap<String, f64> = BTreeMap::new();
    let mut cumulative: BTreeMap<String, f64> = BTreeMap::new();

    for node in siblings {
        if node.is_total {
            if let Some(stated) = &node.values {
                report.checked += 1;
                for period in periods {
                    let value = stated.get(period).copied().unwrap_or(0.0);
                    let group_sum = group.get(period).copied().unwrap_or(0.0);
                    let cumulative_sum = cumulative.get(period).copied().unwrap_or(0.0);

                    let (expected, difference) =
                        if (value - group_sum).abs() <= (value - cumulative_sum).abs() {
                            (group_sum, (value - group_sum).abs())
                        } else {
                            (cumulative_sum, (value - cumulative_sum).abs())
                        };

                    if difference > tolerance {
                        report.mismatches.push(TotalMismatch {
                            label: node.label.clone(),
                            period: period.clone(),
                            stated: value,
                            expected,
                            difference,
                        });
                    }
                }
            }
            group.clear();
        } else {
            let contribution = effective_values(node);
            for (period, value) in &contribution {
                *group.entry(period.clone()).or_default() += value;
                *cumulative.entry(period.clone()).or_default() += value;
            }
            check_siblings(&node.children, periods, tolerance, report);
        }
    }
}

/// A node's contribution per period: its own values when it carries them,
/// otherwise the sum of its non-total children.
pub(crate) fn effective_values(node: &ReportNode) -> BTreeMap<String, f64> {
    if let Some(values) = &node.values {
        return values.clone();
    }

    let mut sums = BTreeMap::new();
    for child in &node.children {
        if child.is_total {
            continue;
        }
        for (period, value) in effective_values(child) {
            *sums.entry(period).or_default() += value;
        }
    }
    sums
}
