//! Keyword categorization and relevance scoring.
//!
//! Maps free text to topical category tags via fixed keyword tables, and
//! scores actionable-content density from a fixed indicator list. Both
//! functions are pure and total: any string input, including the empty
//! string, produces a well-defined result.
//!
//! The category table and indicator list are compatibility contracts shared
//! with downstream consumers of the JSON API, so they are constants here
//! rather than configuration.

use crate::models::ContentItem;

/// Fallback tag assigned when no keyword matches.
pub const GENERAL_CATEGORY: &str = "general";

/// Fixed ordered category table. Matching is case-insensitive substring
/// search; a category is included when ANY of its keywords occurs.
const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "project-management",
        &["project", "timeline", "milestone", "deadline", "scope"],
    ),
    (
        "meeting-notes",
        &["meeting", "agenda", "attendees", "action items", "notes"],
    ),
    (
        "planning",
        &["plan", "strategy", "objective", "goal", "roadmap"],
    ),
    (
        "research",
        &["research", "analysis", "data", "study", "findings"],
    ),
    (
        "development",
        &["development", "code", "programming", "technical", "software"],
    ),
    (
        "marketing",
        &["marketing", "campaign", "promotion", "brand", "advertising"],
    ),
    (
        "finance",
        &["budget", "cost", "revenue", "financial", "expense"],
    ),
];

/// Quality-indicator terms used by [`relevance_score`].
const QUALITY_INDICATORS: &[&str] = &[
    "objective",
    "goal",
    "plan",
    "action",
    "timeline",
    "deliverable",
    "requirement",
    "milestone",
    "task",
];

/// Assign topical categories to `text`.
///
/// Returns the matching categories in table order, or `["general"]` when
/// nothing matches. The result is never empty.
pub fn categorize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    let categories: Vec<String> = CATEGORY_TABLE
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| category.to_string())
        .collect();

    if categories.is_empty() {
        vec![GENERAL_CATEGORY.to_string()]
    } else {
        categories
    }
}

/// Score actionable-content density of `text` in [0, 1].
///
/// Counts distinct quality-indicator terms present (case-insensitive
/// substring) over the indicator list length, capped at 1.0.
pub fn relevance_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let matches = QUALITY_INDICATORS
        .iter()
        .filter(|indicator| lowered.contains(*indicator))
        .count();

    (matches as f64 / QUALITY_INDICATORS.len() as f64).min(1.0)
}

/// Run categorization and relevance scoring over an item in place.
///
/// Categories are fully replaced (re-running is idempotent), never merged
/// with a previous assignment.
pub fn classify_item(item: &mut ContentItem) {
    item.categories = categorize(&item.extracted_text);
    item.relevance_score = Some(relevance_score(&item.extracted_text));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_general() {
        assert_eq!(categorize(""), vec!["general"]);
    }

    #[test]
    fn unmatched_text_yields_general() {
        let cats = categorize("The quick brown fox jumps over the lazy dog");
        assert_eq!(cats, vec!["general"]);
    }

    #[test]
    fn result_is_never_empty() {
        for text in ["", "xyz", "project kickoff", "word soup with no tags?"] {
            assert!(!categorize(text).is_empty(), "empty result for {:?}", text);
        }
    }

    #[test]
    fn project_keyword_triggers_project_management() {
        let cats = categorize("We need to finalize the project timeline");
        assert!(cats.contains(&"project-management".to_string()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let cats = categorize("QUARTERLY BUDGET REVIEW");
        assert_eq!(cats, vec!["finance"]);
    }

    #[test]
    fn multiple_categories_in_table_order() {
        let cats = categorize("meeting agenda for the marketing campaign budget");
        assert_eq!(cats, vec!["meeting-notes", "marketing", "finance"]);
    }

    #[test]
    fn general_not_added_alongside_matches() {
        let cats = categorize("software development sprint");
        assert!(!cats.contains(&"general".to_string()));
    }

    #[test]
    fn relevance_empty_is_zero() {
        assert_eq!(relevance_score(""), 0.0);
    }

    #[test]
    fn relevance_all_indicators_is_one() {
        let text = "objective goal plan action timeline deliverable requirement milestone task";
        assert!((relevance_score(text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn relevance_counts_distinct_indicators() {
        // "goal" and "plan" only — repeats must not inflate the count.
        let score = relevance_score("goal goal goal plan plan");
        assert!((score - 2.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn relevance_always_in_unit_interval() {
        for text in ["", "goal", "a goal and a plan and a task", "nothing here"] {
            let s = relevance_score(text);
            assert!((0.0..=1.0).contains(&s), "score out of range: {}", s);
        }
    }

    #[test]
    fn classify_item_replaces_previous_categories() {
        let mut item = crate::extract::extract_note("budget review", Some("Q3 costs"));
        classify_item(&mut item);
        assert_eq!(item.categories, vec!["finance"]);

        // Re-running after the text changed replaces, not merges.
        item.extracted_text = "research findings".to_string();
        classify_item(&mut item);
        assert_eq!(item.categories, vec!["research"]);
    }
}
