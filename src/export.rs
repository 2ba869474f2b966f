//! Export the library as a JSON snapshot.
//!
//! Produces a single JSON document containing all content items and action
//! plans plus the export date, suitable for re-import by other tools or for
//! archival. The pipeline holds no persistent state, so this is the way to
//! take data out of a session.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::models::{ActionPlan, ContentItem};

/// Snapshot payload written by [`run_export`] and served by `GET /export`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub content_items: Vec<ContentItem>,
    pub action_plans: Vec<ActionPlan>,
    pub export_date: DateTime<Utc>,
}

/// Build a snapshot of the given items and plans, stamped with `now`.
pub fn snapshot(
    items: Vec<ContentItem>,
    plans: Vec<ActionPlan>,
    now: DateTime<Utc>,
) -> ExportData {
    ExportData {
        content_items: items,
        action_plans: plans,
        export_date: now,
    }
}

/// Serialize a snapshot as pretty JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes to
/// stdout for piping.
pub fn run_export(data: &ExportData, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            eprintln!(
                "Exported {} items, {} plans to {}",
                data.content_items.len(),
                data.action_plans.len(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_note;

    #[test]
    fn snapshot_serializes_expected_shape() {
        let data = snapshot(
            vec![extract_note("body text", Some("Note"))],
            Vec::new(),
            Utc::now(),
        );
        let value = serde_json::to_value(&data).unwrap();

        assert!(value["content_items"].is_array());
        assert!(value["action_plans"].is_array());
        assert!(value["export_date"].is_string());
        assert_eq!(value["content_items"][0]["title"], "Note");
        assert_eq!(value["content_items"][0]["kind"], "note");
        assert_eq!(value["content_items"][0]["status"], "completed");
    }

    #[test]
    fn export_writes_file_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("snapshot.json");
        let data = snapshot(Vec::new(), Vec::new(), Utc::now());

        run_export(&data, Some(&out)).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["content_items"].as_array().unwrap().len(), 0);
    }
}
