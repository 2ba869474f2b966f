//! # Cognix CLI (`cgx`)
//!
//! The `cgx` binary is the primary interface for Cognix. It provides
//! commands for extracting content from files and URLs, categorizing and
//! scoring it, surfacing relationships, generating action plans, and
//! starting the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! cgx [--config ./config/cognix.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cgx extract <inputs>` | Extract text from files, directories, or URLs |
//! | `cgx analyze <inputs>` | Extract, categorize, and score content |
//! | `cgx relate <inputs>` | Surface pairwise content relationships |
//! | `cgx plan <inputs> --goal <G>` | Generate an action plan |
//! | `cgx suggest <inputs>` | Suggest next steps for the content |
//! | `cgx analytics <inputs>` | Summarize a content set |
//! | `cgx export <inputs>` | Emit a JSON snapshot |
//! | `cgx serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Categorize everything under ./docs
//! cgx analyze ./docs
//!
//! # Plan against two goals, machine-readable output
//! cgx plan ./docs --goal "Ship v1" --goal "Hire a designer" --json
//!
//! # Start the HTTP server for the dashboard UI
//! cgx serve --config ./config/cognix.toml
//! ```

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cognix::analytics;
use cognix::config::{self, Config};
use cognix::export;
use cognix::ingest;
use cognix::models::{ActionPlan, ContentItem, ContentStatus, Priority};
use cognix::plan;
use cognix::progress::ProgressMode;
use cognix::server;
use cognix::similarity;

/// Cognix — a content intake and action-planning engine for unstructured
/// material.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; built-in defaults apply when the file is absent.
#[derive(Parser)]
#[command(
    name = "cgx",
    about = "Cognix — a content intake and action-planning engine for unstructured material",
    version,
    long_about = "Cognix extracts text from unstructured sources (files, notes, video URLs), \
    assigns topical categories and relevance scores, surfaces relationships between items, \
    and generates checklist-style action plans, via a CLI and a JSON HTTP server."
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults apply when absent.
    #[arg(long, global = true, default_value = "./config/cognix.toml")]
    config: PathBuf,

    /// Progress reporting on stderr. Defaults to `human` on a TTY, `off`
    /// otherwise.
    #[arg(long, global = true, value_enum)]
    progress: Option<ProgressArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProgressArg {
    Off,
    Human,
    Json,
}

impl ProgressArg {
    fn mode(self) -> ProgressMode {
        match self {
            ProgressArg::Off => ProgressMode::Off,
            ProgressArg::Human => ProgressMode::Human,
            ProgressArg::Json => ProgressMode::Json,
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Extract text from the given sources.
    ///
    /// Inputs may be files, directories (walked with the configured globs),
    /// or YouTube URLs. Extraction failures become error-status items, so
    /// the command always reports every source.
    Extract {
        /// Files, directories, or URLs to extract.
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Extract, categorize, and score the given sources.
    ///
    /// Prints each item's categories and relevance score.
    Analyze {
        /// Files, directories, or URLs to analyze.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Emit machine-readable JSON instead of the human summary.
        #[arg(long)]
        json: bool,
    },

    /// Surface pairwise relationships between the given sources.
    ///
    /// Reports every pair of items whose lexical similarity exceeds the
    /// relationship threshold, with their common categories.
    Relate {
        /// Files, directories, or URLs to compare.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Emit machine-readable JSON instead of the human summary.
        #[arg(long)]
        json: bool,
    },

    /// Generate an action plan from the given sources and goals.
    Plan {
        /// Files, directories, or URLs to plan from.
        inputs: Vec<String>,

        /// A goal to work towards. Repeatable; order is preserved.
        #[arg(long = "goal")]
        goals: Vec<String>,

        /// Emit machine-readable JSON instead of the checklist.
        #[arg(long)]
        json: bool,
    },

    /// Suggest next steps for the given sources.
    Suggest {
        /// Files, directories, or URLs to inspect.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Completion marker to exclude already-done suggestions.
        /// Repeatable.
        #[arg(long = "done")]
        done: Vec<String>,
    },

    /// Summarize a content set: counts, relevance, category distribution.
    Analytics {
        /// Files, directories, or URLs to summarize.
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Emit a JSON snapshot of the extracted content.
    Export {
        /// Files, directories, or URLs to export.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and holds content
    /// and plans in memory for the lifetime of the process.
    Serve,
}

/// Load the config file when it exists; otherwise fall back to built-in
/// defaults. A present-but-invalid file is still an error.
fn load_config_or_default(path: &PathBuf) -> Result<Config> {
    if path.exists() {
        config::load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config_or_default(&cli.config)?;
    let mode = cli
        .progress
        .map(ProgressArg::mode)
        .unwrap_or_else(ProgressMode::default_for_tty);
    let reporter = mode.reporter();

    match cli.command {
        Commands::Extract { inputs } => {
            let items = ingest::run_intake(&cfg, &inputs, reporter.as_ref())?;
            print_extract_summary(&items);
        }
        Commands::Analyze { inputs, json } => {
            let items = ingest::run_intake(&cfg, &inputs, reporter.as_ref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print_analysis(&items);
            }
        }
        Commands::Relate { inputs, json } => {
            let items = ingest::run_intake(&cfg, &inputs, reporter.as_ref())?;
            let relationships = similarity::relate(&items);
            if json {
                println!("{}", serde_json::to_string_pretty(&relationships)?);
            } else {
                print_relationships(&items, &relationships);
            }
        }
        Commands::Plan {
            inputs,
            goals,
            json,
        } => {
            let items = ingest::run_intake(&cfg, &inputs, reporter.as_ref())?;
            let generated = plan::synthesize(&items, &goals, Utc::now());
            if json {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            } else {
                print_plan(&generated);
            }
        }
        Commands::Suggest { inputs, done } => {
            let items = ingest::run_intake(&cfg, &inputs, reporter.as_ref())?;
            let suggestions = plan::suggest_next_steps(&items, &done);
            if suggestions.is_empty() {
                println!("No suggestions.");
            } else {
                for suggestion in &suggestions {
                    println!("- {}", suggestion);
                }
            }
        }
        Commands::Analytics { inputs } => {
            let items = ingest::run_intake(&cfg, &inputs, reporter.as_ref())?;
            let summary = analytics::compute(&items, &[]);
            analytics::print_summary(&summary);
        }
        Commands::Export { inputs, out } => {
            let items = ingest::run_intake(&cfg, &inputs, reporter.as_ref())?;
            let data = export::snapshot(items, Vec::new(), Utc::now());
            export::run_export(&data, out.as_deref())?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn status_label(status: ContentStatus) -> &'static str {
    match status {
        ContentStatus::Processing => "processing",
        ContentStatus::Completed => "completed",
        ContentStatus::Error => "error",
    }
}

fn print_extract_summary(items: &[ContentItem]) {
    let completed = items
        .iter()
        .filter(|i| i.status == ContentStatus::Completed)
        .count();

    for item in items {
        println!(
            "{:<10} {:<40} {} words",
            status_label(item.status),
            item.title,
            item.extracted_text.split_whitespace().count()
        );
        if item.status == ContentStatus::Error {
            if let Some(message) = item.metadata["error"].as_str() {
                println!("           {}", message);
            }
        }
    }

    println!();
    println!("extracted {} / {} sources", completed, items.len());
}

fn print_analysis(items: &[ContentItem]) {
    for item in items {
        let score = item
            .relevance_score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("{} [{}]", item.title, score);
        println!("    categories: {}", item.categories.join(", "));
    }
    println!();
    println!("analyzed {} items", items.len());
}

fn print_relationships(items: &[ContentItem], relationships: &[cognix::models::Relationship]) {
    if relationships.is_empty() {
        println!("No relationships above threshold.");
        return;
    }

    let title_of = |id: &str| {
        items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.title.clone())
            .unwrap_or_else(|| id.to_string())
    };

    for rel in relationships {
        println!(
            "[{:.2}] {} <-> {}",
            rel.similarity,
            title_of(&rel.item_a),
            title_of(&rel.item_b)
        );
        if !rel.common_categories.is_empty() {
            println!("    common: {}", rel.common_categories.join(", "));
        }
    }
    println!();
    println!("{} relationships", relationships.len());
}

fn print_plan(generated: &ActionPlan) {
    println!("{}", generated.title);
    println!(
        "priority: {}   duration: {}",
        priority_label(generated.priority),
        generated.estimated_duration
    );
    println!();

    for step in &generated.steps {
        let mark = if step.completed { "x" } else { " " };
        println!("[{}] {}", mark, step.title);
        println!("    {}", step.description);
        if let Some(due) = step.due_date {
            println!("    due: {}", due.format("%Y-%m-%d"));
        }
        if !step.resources.is_empty() {
            println!("    resources: {}", step.resources.join(", "));
        }
    }

    if !generated.dependencies.is_empty() {
        println!();
        println!("dependencies:");
        for dep in &generated.dependencies {
            println!("  - {}", dep);
        }
    }
}
