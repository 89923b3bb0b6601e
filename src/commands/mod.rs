// src/commands/mod.rs
// =============================================================================
// Command handlers, one submodule per area:
// - survey: survey, list-repos, inspect
// - links: extract-links, process-links
// - datasette: the datasette command group
//
// `run` is the only entry point main.rs needs; every handler returns our
// Result so errors reach main untouched.
// =============================================================================

mod datasette;
mod links;
mod survey;

use crate::cli::Commands;
use crate::error::Result;
use crate::repo::RepoFetcher;

pub async fn run(command: Commands) -> Result<()> {
    let fetcher = RepoFetcher::default();

    match command {
        Commands::Survey { location } => survey::survey(&fetcher, &location).await,
        Commands::ListRepos { filter_term } => {
            survey::list_repos(filter_term.as_deref());
            Ok(())
        }
        Commands::Inspect {
            repo_name,
            stats,
            embeddings,
        } => {
            survey::inspect(&repo_name, stats, embeddings);
            Ok(())
        }
        Commands::ExtractLinks { location } => links::extract_links(&fetcher, &location).await,
        Commands::ProcessLinks {
            json_path,
            db,
            importer,
            json,
        } => links::process_links(&json_path, &db, &importer, json)
            .await
            .map(|_| ()),
        Commands::Datasette(command) => datasette::run(command).await,
    }
}
