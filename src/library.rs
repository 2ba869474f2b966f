//! In-memory content and plan collection.
//!
//! Holds everything the server (and one-shot CLI runs) operate on: content
//! items in insertion order and the plans generated from them. Guarded by
//! `std::sync::RwLock` so one instance can be shared across request handlers
//! behind an `Arc`. There is deliberately no persistence layer; the library
//! lives and dies with the process.

use std::sync::RwLock;

use crate::classify;
use crate::models::{ActionPlan, ActionStep, ContentItem, Relationship};
use crate::similarity;

/// Thread-safe in-memory collection of content items and action plans.
pub struct Library {
    items: RwLock<Vec<ContentItem>>,
    plans: RwLock<Vec<ActionPlan>>,
}

impl Library {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            plans: RwLock::new(Vec::new()),
        }
    }

    /// Seed the library with already-extracted items (CLI path).
    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items: RwLock::new(items),
            plans: RwLock::new(Vec::new()),
        }
    }

    pub fn add_item(&self, item: ContentItem) -> ContentItem {
        let mut items = self.items.write().unwrap();
        items.push(item.clone());
        item
    }

    pub fn items(&self) -> Vec<ContentItem> {
        self.items.read().unwrap().clone()
    }

    pub fn get_item(&self, id: &str) -> Option<ContentItem> {
        self.items
            .read()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Remove an item from the collection. Existing plans are untouched:
    /// they reference item titles, not ids, so there is nothing to cascade.
    pub fn remove_item(&self, id: &str) -> bool {
        let mut items = self.items.write().unwrap();
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() < before
    }

    /// Case-insensitive substring search over title and extracted text.
    pub fn search(&self, query: &str) -> Vec<ContentItem> {
        let needle = query.to_lowercase();
        self.items
            .read()
            .unwrap()
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item.extracted_text.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Items tagged with the given category. `"all"` disables the filter.
    pub fn filter_by_category(&self, category: &str) -> Vec<ContentItem> {
        let items = self.items.read().unwrap();
        if category == "all" {
            return items.clone();
        }
        items
            .iter()
            .filter(|item| item.categories.iter().any(|c| c == category))
            .cloned()
            .collect()
    }

    /// Run categorization and relevance scoring over every stored item.
    /// Categories are replaced, not merged, so re-running is idempotent.
    /// Returns the number of items classified.
    pub fn classify_all(&self) -> usize {
        let mut items = self.items.write().unwrap();
        for item in items.iter_mut() {
            classify::classify_item(item);
        }
        items.len()
    }

    /// Pairwise relationships over the current items, in insertion order.
    pub fn relationships(&self) -> Vec<Relationship> {
        similarity::relate(&self.items.read().unwrap())
    }

    pub fn add_plan(&self, plan: ActionPlan) -> ActionPlan {
        let mut plans = self.plans.write().unwrap();
        plans.push(plan.clone());
        plan
    }

    pub fn plans(&self) -> Vec<ActionPlan> {
        self.plans.read().unwrap().clone()
    }

    /// Toggle a step's completion flag. The only mutation a plan sees after
    /// creation. Returns the updated step, or `None` when either id is
    /// unknown.
    pub fn toggle_step(&self, plan_id: &str, step_id: &str) -> Option<ActionStep> {
        let mut plans = self.plans.write().unwrap();
        let plan = plans.iter_mut().find(|p| p.id == plan_id)?;
        let step = plan.steps.iter_mut().find(|s| s.id == step_id)?;
        step.completed = !step.completed;
        Some(step.clone())
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}
