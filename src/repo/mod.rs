// src/repo/mod.rs
// =============================================================================
// This module turns a repository location into files on disk.
//
// Currently implements:
// - Shallow-cloning remote repositories into a scratch directory
// - Validating local repository paths
// - Locating the README among the usual filename variants
// =============================================================================

mod fetch;
mod readme;

pub use fetch::RepoFetcher;
pub use readme::find_readme;
