// src/links/import.rs
// =============================================================================
// Feeds resolved identifiers to the external importer, one at a time.
//
// How it works:
// 1. Load a JSON file holding an array of URLs
// 2. Resolve each URL to "owner/repo" (non-matching entries are skipped)
// 3. Run `<importer> repos <db> -r <owner/repo>` for each identifier
// 4. Record success or the importer's stderr, then move on
//
// One identifier failing never stops the batch.
// =============================================================================

use super::resolve::resolve_identifiers;
use crate::error::{RbError, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Importer command used when none is given on the command line
pub const DEFAULT_IMPORTER: &str = "uv run github-to-sqlite";

/// The external program that loads repository metadata into a database
#[derive(Debug, Clone)]
pub struct Importer {
    program: String,
    leading_args: Vec<String>,
}

impl Importer {
    // Parses an importer command line such as "uv run github-to-sqlite"
    //
    // Words are split with shell quoting rules, so paths with spaces can
    // be quoted.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let words = shell_words::split(command)
            .map_err(|e| RbError::InvalidConfig(format!("importer command: {}", e)))?;
        let mut words = words.into_iter();
        let program = words
            .next()
            .ok_or_else(|| RbError::InvalidConfig("importer command is empty".to_string()))?;

        Ok(Self {
            program,
            leading_args: words.collect(),
        })
    }

    /// Imports one repository identifier into `db`
    ///
    /// Errors:
    ///   ImportFailed carrying the importer's stderr on non-zero exit, or
    ///   the spawn error if the importer could not be started
    pub async fn import(&self, identifier: &str, db: &Path) -> Result<()> {
        let failed = |reason: String| RbError::ImportFailed {
            identifier: identifier.to_string(),
            reason,
        };

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg("repos")
            .arg(db)
            .arg("-r")
            .arg(identifier)
            .output()
            .await
            .map_err(|e| failed(format!("could not run {}: {}", self.program, e)))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// Where the `Processing:` and `✓ Processed:` lines are written
///
/// Failure lines always go to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Stdout,
    /// Keeps stdout free for machine-readable output
    Stderr,
}

impl Progress {
    fn line(self, text: &str) {
        match self {
            Progress::Stdout => println!("{}", text),
            Progress::Stderr => eprintln!("{}", text),
        }
    }
}

/// What happened to a single identifier
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportOutcome {
    pub identifier: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Loads the links file
//
// Errors:
//   InvalidPath if the file is missing, InvalidLinksFile if it isn't a
//   JSON array
//
// Non-string array entries are dropped here, the same way unresolvable
// URLs are dropped later.
pub fn load_links_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(RbError::InvalidPath(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|_| RbError::InvalidLinksFile("Invalid JSON file".to_string()))?;

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(link) => Some(link),
                _ => None,
            })
            .collect()),
        _ => Err(RbError::InvalidLinksFile(
            "JSON file must contain a list of URLs".to_string(),
        )),
    }
}

// Processes every link in order and reports each identifier
//
// Parameters:
//   links: URLs, typically the output of `extract-links`
//   db: database file handed to the importer
//   importer: the program to run per identifier
//   progress: where the per-identifier status lines go
//
// Returns: one ImportOutcome per resolved identifier
pub async fn process_links(
    links: &[String],
    db: &Path,
    importer: &Importer,
    progress: Progress,
) -> Vec<ImportOutcome> {
    let identifiers = resolve_identifiers(links.iter().map(String::as_str));
    let mut outcomes = Vec::with_capacity(identifiers.len());

    for identifier in identifiers {
        progress.line(&format!("Processing: {}", identifier));

        let outcome = match importer.import(&identifier, db).await {
            Ok(()) => {
                info!(%identifier, "imported");
                progress.line(&format!("✓ Processed: {}", identifier));
                ImportOutcome {
                    identifier,
                    ok: true,
                    error: None,
                }
            }
            Err(err) => {
                debug!(%identifier, "import failed");
                eprintln!("✗ {}", err);
                let reason = match err {
                    RbError::ImportFailed { reason, .. } => reason,
                    other => other.to_string(),
                };
                ImportOutcome {
                    identifier,
                    ok: false,
                    error: Some(reason),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}
