//! Library analytics overview.
//!
//! Summarizes what has been ingested and planned: item counts, average
//! relevance, per-category distribution, and step completion across plans.
//! Used by `cgx analytics` and `GET /analytics`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ActionPlan, ContentItem};

/// Computed analytics snapshot. All ratios are 0 when their denominator is
/// zero — never NaN.
#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub total_items: usize,
    pub average_relevance: f64,
    /// Category → item count. BTreeMap keeps the JSON output stable.
    pub category_distribution: BTreeMap<String, usize>,
    pub total_plans: usize,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub completion_rate: f64,
}

/// Compute analytics over the current items and plans.
pub fn compute(items: &[ContentItem], plans: &[ActionPlan]) -> Analytics {
    let total_items = items.len();

    let average_relevance = if total_items > 0 {
        items
            .iter()
            .map(|item| item.relevance_score.unwrap_or(0.0))
            .sum::<f64>()
            / total_items as f64
    } else {
        0.0
    };

    let mut category_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for item in items {
        for category in &item.categories {
            *category_distribution.entry(category.clone()).or_insert(0) += 1;
        }
    }

    let total_steps: usize = plans.iter().map(|plan| plan.steps.len()).sum();
    let completed_steps: usize = plans
        .iter()
        .flat_map(|plan| plan.steps.iter())
        .filter(|step| step.completed)
        .count();
    let completion_rate = if total_steps > 0 {
        completed_steps as f64 / total_steps as f64
    } else {
        0.0
    };

    Analytics {
        total_items,
        average_relevance,
        category_distribution,
        total_plans: plans.len(),
        total_steps,
        completed_steps,
        completion_rate,
    }
}

/// Print an analytics summary table to stdout.
pub fn print_summary(analytics: &Analytics) {
    println!("Cognix — Library Analytics");
    println!("==========================");
    println!();
    println!("  Items:           {}", analytics.total_items);
    println!("  Avg relevance:   {:.2}", analytics.average_relevance);
    println!("  Plans:           {}", analytics.total_plans);
    println!(
        "  Steps done:      {} / {} ({}%)",
        analytics.completed_steps,
        analytics.total_steps,
        (analytics.completion_rate * 100.0).round() as i64
    );

    if !analytics.category_distribution.is_empty() {
        println!();
        println!("  By category:");
        println!("  {:<24} {:>6}", "CATEGORY", "ITEMS");
        println!("  {}", "-".repeat(32));
        for (category, count) in &analytics.category_distribution {
            println!("  {:<24} {:>6}", category, count);
        }
    }

    println!();
}
