// src/links/mod.rs
// =============================================================================
// Everything to do with GitHub repository links.
//
// Submodules:
// - extract: finds repository URLs in README text
// - resolve: turns URLs into "owner/repo" identifiers
// - import: runs the external importer for each identifier
// =============================================================================

mod extract;
mod import;
mod resolve;

pub use extract::{read_readme_links, LinkSet};
pub use import::{
    load_links_file, process_links, ImportOutcome, Importer, Progress, DEFAULT_IMPORTER,
};
