//! Action-plan synthesis.
//!
//! Consumes categorized content items plus user goals and deterministically
//! emits an ordered checklist with a priority classification, a duration
//! estimate, and dependency notes. Category-triggered steps come first, in
//! category-table order, followed by one step per goal in input order.
//!
//! Given the same items, goals, and reference time, the generated steps,
//! priority, duration, and dependencies are identical across calls; only the
//! plan id differs.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{ActionPlan, ActionStep, ContentItem, Priority};

const PLAN_TITLE: &str = "Intelligent Action Plan";

/// Follow-up steps generated from meeting notes come due this many days
/// after plan creation.
const FOLLOW_UP_DUE_DAYS: i64 = 3;

/// Synthesize an action plan from categorized items and user goals.
///
/// `now` is the plan's creation time; it anchors follow-up due dates, so
/// callers that need reproducible output pass a fixed value.
pub fn synthesize(items: &[ContentItem], goals: &[String], now: DateTime<Utc>) -> ActionPlan {
    let mut steps = Vec::new();
    let categories = unique_categories(items);

    if categories.iter().any(|c| c == "project-management") {
        steps.push(ActionStep {
            id: "step-1".to_string(),
            title: "Define Project Scope".to_string(),
            description: "Based on your documents, clearly define project boundaries and deliverables".to_string(),
            completed: false,
            due_date: None,
            resources: resources_for_category(items, "project-management"),
        });
    }

    if categories.iter().any(|c| c == "meeting-notes") {
        steps.push(ActionStep {
            id: "step-2".to_string(),
            title: "Follow Up on Action Items".to_string(),
            description: "Review meeting notes and ensure all action items are tracked and assigned".to_string(),
            completed: false,
            due_date: Some(now + Duration::days(FOLLOW_UP_DUE_DAYS)),
            resources: resources_for_category(items, "meeting-notes"),
        });
    }

    if categories.iter().any(|c| c == "planning") {
        steps.push(ActionStep {
            id: "step-3".to_string(),
            title: "Create Detailed Timeline".to_string(),
            description: "Develop a comprehensive timeline with milestones based on your planning documents".to_string(),
            completed: false,
            due_date: None,
            resources: resources_for_category(items, "planning"),
        });
    }

    if categories.iter().any(|c| c == "research") {
        steps.push(ActionStep {
            id: "step-4".to_string(),
            title: "Synthesize Research Findings".to_string(),
            description: "Compile and analyze research data to inform decision making".to_string(),
            completed: false,
            due_date: None,
            resources: resources_for_category(items, "research"),
        });
    }

    for (index, goal) in goals.iter().enumerate() {
        steps.push(ActionStep {
            id: format!("goal-step-{}", index + 1),
            title: format!("Work towards: {}", goal),
            description: "Take specific actions to achieve this goal based on your content"
                .to_string(),
            completed: false,
            due_date: None,
            resources: resources_for_goal(items, goal),
        });
    }

    let dependencies = identify_dependencies(&steps);
    let estimated_duration = estimate_duration(steps.len());
    let priority = calculate_priority(goals.len(), items.len());

    ActionPlan {
        id: Uuid::new_v4().to_string(),
        title: PLAN_TITLE.to_string(),
        steps,
        priority,
        estimated_duration,
        dependencies,
        created_at: now,
    }
}

/// Suggest follow-on actions for content that has no corresponding
/// completion marker yet. Markers are free-form strings recorded by the
/// caller as work finishes.
pub fn suggest_next_steps(items: &[ContentItem], completed: &[String]) -> Vec<String> {
    let mut suggestions = Vec::new();
    let categories = unique_categories(items);
    let done = |marker: &str| completed.iter().any(|c| c == marker);

    if categories.iter().any(|c| c == "project-management") && !done("timeline-review") {
        suggestions.push("Review and update project timelines based on recent progress".to_string());
    }

    if categories.iter().any(|c| c == "meeting-notes") && !done("followup-complete") {
        suggestions.push("Schedule follow-up meetings for unresolved action items".to_string());
    }

    if categories.iter().any(|c| c == "research") && !done("analysis-complete") {
        suggestions.push("Conduct deeper analysis on research findings".to_string());
    }

    suggestions
}

/// Union of all items' category tags, first-seen order.
fn unique_categories(items: &[ContentItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        for category in &item.categories {
            if !seen.contains(category) {
                seen.push(category.clone());
            }
        }
    }
    seen
}

/// Titles of all items carrying the given category tag, in input order.
fn resources_for_category(items: &[ContentItem], category: &str) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.categories.iter().any(|c| c == category))
        .map(|item| item.title.clone())
        .collect()
}

/// Titles of all items whose extracted text contains any whitespace-split
/// token of the goal string, case-insensitively.
fn resources_for_goal(items: &[ContentItem], goal: &str) -> Vec<String> {
    let goal_lower = goal.to_lowercase();
    let tokens: Vec<&str> = goal_lower.split_whitespace().collect();

    items
        .iter()
        .filter(|item| {
            let text = item.extracted_text.to_lowercase();
            tokens.iter().any(|token| text.contains(token))
        })
        .map(|item| item.title.clone())
        .collect()
}

fn calculate_priority(goal_count: usize, item_count: usize) -> Priority {
    let score = goal_count * 2 + item_count;
    if score >= 8 {
        Priority::High
    } else if score >= 4 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Bucket a step count into a textual duration estimate. One week minimum.
fn estimate_duration(step_count: usize) -> String {
    let days = (step_count * 2).max(7);
    if days <= 7 {
        "1 week".to_string()
    } else if days <= 14 {
        "2 weeks".to_string()
    } else if days <= 30 {
        "1 month".to_string()
    } else {
        format!("{} months", days.div_ceil(30))
    }
}

fn identify_dependencies(steps: &[ActionStep]) -> Vec<String> {
    let mut dependencies = Vec::new();

    if steps.iter().any(|step| step.title.contains("Timeline")) {
        dependencies.push("Project scope definition must be completed first".to_string());
    }

    dependencies
}
