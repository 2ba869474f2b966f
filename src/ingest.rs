//! Intake pipeline orchestration.
//!
//! Coordinates the CLI flow: expand path/URL arguments into concrete
//! sources → extract each into a content item → categorize and score.
//! Directories are walked with the configured include/exclude globs;
//! results are sorted for deterministic ordering.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::classify;
use crate::config::Config;
use crate::extract;
use crate::models::ContentItem;
use crate::progress::{IntakeProgressEvent, IntakeProgressReporter};

/// A concrete source resolved from a CLI argument.
enum SourceRef {
    File(PathBuf),
    YouTube(String),
}

/// Run the full intake over CLI inputs: files, directories, or YouTube URLs.
///
/// Every source yields an item — extraction failures become `Error`-status
/// items rather than aborting the run. Items are classified before they are
/// returned, so categories and relevance scores are always populated.
pub fn run_intake(
    config: &Config,
    inputs: &[String],
    reporter: &dyn IntakeProgressReporter,
) -> Result<Vec<ContentItem>> {
    reporter.report(IntakeProgressEvent::Discovering);
    let sources = resolve_inputs(config, inputs)?;

    let total = sources.len() as u64;
    let mut items = Vec::with_capacity(sources.len());
    for (n, source) in sources.iter().enumerate() {
        let item = match source {
            SourceRef::File(path) => extract::extract_path(path),
            SourceRef::YouTube(url) => extract::extract_youtube(url, None),
        };
        items.push(item);
        reporter.report(IntakeProgressEvent::Extracting {
            n: n as u64 + 1,
            total,
        });
    }

    reporter.report(IntakeProgressEvent::Classifying {
        total: items.len() as u64,
    });
    for item in items.iter_mut() {
        classify::classify_item(item);
    }

    Ok(items)
}

fn resolve_inputs(config: &Config, inputs: &[String]) -> Result<Vec<SourceRef>> {
    let mut sources = Vec::new();

    for input in inputs {
        if input.starts_with("http://") || input.starts_with("https://") {
            sources.push(SourceRef::YouTube(input.clone()));
            continue;
        }

        let path = Path::new(input);
        if path.is_dir() {
            for file in collect_files(config, path)? {
                sources.push(SourceRef::File(file));
            }
        } else if path.is_file() {
            sources.push(SourceRef::File(path.to_path_buf()));
        } else {
            bail!("input does not exist: {}", input);
        }
    }

    Ok(sources)
}

/// Walk a directory and collect the files matching the configured globs,
/// sorted by relative path for deterministic ordering.
fn collect_files(config: &Config, root: &Path) -> Result<Vec<PathBuf>> {
    let include_set = build_globset(&config.ingest.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(config.ingest.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(config.ingest.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
