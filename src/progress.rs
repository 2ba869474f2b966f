//! Intake progress reporting.
//!
//! Reports observable progress while `cgx` extracts and classifies sources
//! so users see what is being read and how much is left. Progress is emitted
//! on **stderr** so stdout remains parseable for scripts.

use std::io::Write;

/// A single progress event for intake.
#[derive(Clone, Debug)]
pub enum IntakeProgressEvent {
    /// Walking directories and collecting candidate files. Total unknown.
    Discovering,
    /// Extraction phase: n sources processed out of total.
    Extracting { n: u64, total: u64 },
    /// Classification phase over the extracted items.
    Classifying { total: u64 },
}

/// Reports intake progress. Implementations write to stderr (human or JSON).
pub trait IntakeProgressReporter {
    fn report(&self, event: IntakeProgressEvent);
}

/// Human-friendly progress on stderr: "intake  extracting  12 / 340 sources".
pub struct StderrProgress;

impl IntakeProgressReporter for StderrProgress {
    fn report(&self, event: IntakeProgressEvent) {
        let line = match &event {
            IntakeProgressEvent::Discovering => "intake  discovering...\n".to_string(),
            IntakeProgressEvent::Extracting { n, total } => {
                format!(
                    "intake  extracting  {} / {} sources\n",
                    format_number(*n),
                    format_number(*total)
                )
            }
            IntakeProgressEvent::Classifying { total } => {
                format!("intake  classifying  {} items\n", format_number(*total))
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl IntakeProgressReporter for JsonProgress {
    fn report(&self, event: IntakeProgressEvent) {
        let obj = match &event {
            IntakeProgressEvent::Discovering => serde_json::json!({
                "event": "progress",
                "phase": "discovering"
            }),
            IntakeProgressEvent::Extracting { n, total } => serde_json::json!({
                "event": "progress",
                "phase": "extracting",
                "n": n,
                "total": total
            }),
            IntakeProgressEvent::Classifying { total } => serde_json::json!({
                "event": "progress",
                "phase": "classifying",
                "total": total
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl IntakeProgressReporter for NoProgress {
    fn report(&self, _event: IntakeProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode. Caller passes it to intake.
    pub fn reporter(&self) -> Box<dyn IntakeProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
