use crate::totals::effective_values;
use crate::{NodeKind, ReportForest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineCategory {
    pub label: String,
    pub is_total: bool,
    pub subcategories: usize,
    pub leaves: usize,
    pub has_values: bool,
}

/// A flat summary of a report's shape, for listing and browsing surfaces
/// that do not need the full forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutline {
    pub periods: Vec<String>,
    pub categories: Vec<OutlineCategory>,
    /// Per-period sum over the non-total top-level lines.
    pub grand_totals: BTreeMap<String, f64>,
}

impl ReportOutline {
    pub fn from_forest(forest: &ReportForest) -> Self {
        let mut categories = Vec::with_capacity(forest.roots.len());
        let mut grand_totals: BTreeMap<String, f64> = BTreeMap::new();

        for root in &forest.roots {
            let subcategories = root
                .children
                .iter()
                .filter(|c| c.kind == NodeKind::Subcategory)
                .count();
            let leaves = root
                .children
                .iter()
                .map(|c| {
                    if c.kind == NodeKind::Leaf {
                        1
                    } else {
                        c.children.len()
                    }
                })
                .sum();

            categories.push(OutlineCategory {
                label: root.label.clone(),
                is_total: root.is_total,
                subcategories,
                leaves,
                has_values: root.values.is_some(),
            });

            if !root.is_total {
                for (period, value) in effective_values(root) {
                    *grand_totals.entry(period).or_default() += value;
                }
            }
        }

        Self {
            periods: forest.periods.clone(),
            categories,
            grand_totals,
        }
    }

    pub fn category_count(&self) -> usize {
        self.categories.iter().filter(|c| !c.is_total).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("Category,Is Total,Subcategories,Leaves\n");
        for category in &self.categories {
            output.push_str(&format!(
                "{},{},{},{}\n",
                category.label, category.is_total, category.subcategories, category.leaves
            ));
        }
        output
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "# Report Outline ({} periods: {})\n\n",
            self.periods.len(),
            self.periods.join(", ")
        ));

        output.push_str("## Categories\n\n");
        for category in &self.categories {
            let total_marker = if category.is_total { " **[TOTAL]**" } else { "" };
            output.push_str(&format!(
                "- {}{} — {} subcategories, {} lines\n",
                category.label, total_marker, category.subcategories, category.leaves
            ));
        }
        output.push('\n');

        output.push_str("## Grand Totals\n\n");
        for period in &self.periods {
            let value = self.grand_totals.get(period).copied().unwrap_or(0.0);
            output.push_str(&format!("- {}: {:.2}\n", period, value));
        }
        output.push('\n');

        output
    }
}
