// src/repo/readme.rs
// =============================================================================
// Finds the README file at the root of a repository.
//
// Variants are tried in a fixed order. On a case-insensitive filesystem
// the first variant always wins.
// =============================================================================

use std::path::{Path, PathBuf};

const README_VARIANTS: [&str; 4] = ["README.md", "README.MD", "Readme.md", "readme.md"];

// Returns the path of the first README variant that exists, or None
//
// Absence is not an error here; callers decide what it means.
pub fn find_readme(repo_root: &Path) -> Option<PathBuf> {
    README_VARIANTS
        .iter()
        .map(|variant| repo_root.join(variant))
        .find(|path| path.exists())
}
