//! # Cognix
//!
//! A content intake and action-planning engine for unstructured material.
//!
//! Cognix extracts text from unstructured sources (files, pasted notes,
//! video URLs), assigns topical categories and relevance scores via fixed
//! keyword tables, surfaces lexical relationships between items, and
//! generates deterministic checklist-style action plans from content plus
//! user goals. Everything is served through a CLI and a JSON HTTP API;
//! state is held in memory for the lifetime of the process.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │   Sources    │──▶│   Pipeline    │──▶│   Library    │
//! │ file/note/url│   │ extract+class │   │  in-memory   │
//! └──────────────┘   └──────────────┘   └──────┬──────┘
//!                                              │
//!                          ┌───────────────────┤
//!                          ▼                   ▼
//!                     ┌──────────┐       ┌──────────┐
//!                     │   CLI    │       │   HTTP   │
//!                     │  (cgx)   │       │  (JSON)  │
//!                     └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cgx analyze ./docs                 # categorize and score local files
//! cgx relate ./docs                  # surface related content
//! cgx plan ./docs --goal "Ship v1"   # generate an action plan
//! cgx serve                          # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`extract`] | Source → content item extraction |
//! | [`classify`] | Keyword categorization + relevance scoring |
//! | [`similarity`] | Jaccard similarity + relationship discovery |
//! | [`plan`] | Action-plan synthesis and next-step suggestions |
//! | [`ingest`] | CLI intake orchestration |
//! | [`library`] | In-memory content and plan collection |
//! | [`analytics`] | Library analytics summaries |
//! | [`export`] | JSON snapshot export |
//! | [`server`] | JSON HTTP server |
//! | [`progress`] | Intake progress reporting |

pub mod analytics;
pub mod classify;
pub mod config;
pub mod export;
pub mod extract;
pub mod ingest;
pub mod library;
pub mod models;
pub mod plan;
pub mod progress;
pub mod server;
pub mod similarity;
