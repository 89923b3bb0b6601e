// src/commands/links.rs
// =============================================================================
// Handlers for extract-links and process-links.
//
// extract-links: location -> checkout -> README -> LinkSet -> JSON on stdout
// process-links: JSON file -> identifiers -> importer, one at a time
// =============================================================================

use crate::error::{RbError, Result};
use crate::links::{self, ImportOutcome, Importer, LinkSet, Progress};
use crate::repo::{find_readme, RepoFetcher};
use std::path::Path;
use tracing::info;

// Collects the repository links from a location's README
//
// The checkout (and any temporary clone) lives only for this call.
pub async fn collect_links(fetcher: &RepoFetcher, location: &str) -> Result<LinkSet> {
    let checkout = fetcher.fetch(location).await?;
    let readme = find_readme(checkout.path()).ok_or(RbError::NoReadme)?;

    let found = links::read_readme_links(&readme)?;
    info!(readme = %readme.display(), count = found.len(), "extracted links");
    Ok(found)
}

pub async fn extract_links(fetcher: &RepoFetcher, location: &str) -> Result<()> {
    let found = collect_links(fetcher, location).await?;
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}

// Runs the importer over every link in the file
//
// With `json` set, stdout carries only the outcome array; the progress
// lines move to stderr.
pub async fn process_links(
    json_path: &Path,
    db: &Path,
    importer: &str,
    json: bool,
) -> Result<Vec<ImportOutcome>> {
    let importer = Importer::from_command_line(importer)?;
    let entries = links::load_links_file(json_path)?;

    let progress = if json { Progress::Stderr } else { Progress::Stdout };
    let outcomes = links::process_links(&entries, db, &importer, progress).await;
    let failed = outcomes.iter().filter(|outcome| !outcome.ok).count();
    info!(total = outcomes.len(), failed, "batch finished");

    if json {
        println!("{}", render_outcomes(&outcomes)?);
    }
    Ok(outcomes)
}

fn render_outcomes(outcomes: &[ImportOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}
