//! Core data models used throughout Cognix.
//!
//! These types represent the content items, relationships, and action plans
//! that flow through the intake and planning pipeline. All of them serialize
//! to the JSON shapes served by the HTTP API and written by `cgx export`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of ingested material. Closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Document,
    Image,
    Video,
    Note,
}

/// Processing state of a content item. Starts at `Processing` (or
/// `Completed` when extraction is synchronous) and moves to a terminal
/// state once extraction finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Processing,
    Completed,
    Error,
}

/// A unit of ingested material with its extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    /// Original source handle (filename or URL). Informational only.
    pub raw_reference: String,
    /// Text body that the classification and planning stages operate on.
    /// Non-empty for successfully processed items.
    pub extracted_text: String,
    /// Open key→value map of source-specific facts (file size, duration,
    /// mime type). Keys are not contractually fixed.
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub status: ContentStatus,
    /// Topical tags assigned by the categorizer. Empty until categorization
    /// runs; never empty afterwards (falls back to `"general"`).
    pub categories: Vec<String>,
    /// Heuristic [0,1] measure of actionable-content density. Absent until
    /// the relevance scorer runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

/// Plan priority, computed once at synthesis time and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One checklist entry within an action plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionStep {
    /// Unique within the owning plan.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Starts `false`; toggled only by explicit user action.
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Titles of content items relevant to this step. Display-only
    /// references, not ownership links.
    pub resources: Vec<String>,
}

/// A generated, ordered checklist with priority and duration metadata.
///
/// Created atomically by the plan synthesizer. After creation the only field
/// that changes is `steps[*].completed`, via explicit step toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub id: String,
    pub title: String,
    pub steps: Vec<ActionStep>,
    pub priority: Priority,
    pub estimated_duration: String,
    /// Human-readable dependency notes, derived once from step titles.
    pub dependencies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A surfaced relationship between two stored content items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub item_a: String,
    pub item_b: String,
    pub similarity: f64,
    /// Intersection of the two items' category sets, ordered by item A's
    /// category list.
    pub common_categories: Vec<String>,
}
