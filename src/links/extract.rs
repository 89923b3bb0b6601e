// src/links/extract.rs
// =============================================================================
// This module pulls GitHub repository links out of README text.
//
// Only links of the shape https://github.com/<owner>/<repo> are kept:
// the repo segment stops at the next '/', whitespace or ')', so deeper
// paths like /issues or /tree/main are cut off and the closing paren of
// a markdown link [text](url) is never part of the match.
//
// Markdown links and bare URLs go through the same scan, so a link inside
// a code block counts too.
//
// Rust concepts:
// - LazyLock: compile the regex once, the first time it is used
// - BTreeSet: a set that also keeps its items sorted
// =============================================================================

use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

static REPO_LINK: LazyLock<Regex> = LazyLock::new(|| {
    // A constant pattern; failing to compile is a programmer error
    Regex::new(r"https://github\.com/[^/]+/[^/\s)]+").expect("repo link pattern is valid")
});

/// Deduplicated repository URLs found in a README
pub type LinkSet = BTreeSet<String>;

// Extracts all GitHub repository links from README text
//
// Parameters:
//   text: the raw README content
//
// Returns: a LinkSet with every URL normalized (one trailing '/' removed)
//
// Example:
//   "[landscapist](https://github.com/skydoves/landscapist)"
//   -> {"https://github.com/skydoves/landscapist"}
pub fn extract_repo_links(text: &str) -> LinkSet {
    REPO_LINK
        .find_iter(text)
        .map(|m| {
            let url = m.as_str();
            url.strip_suffix('/').unwrap_or(url).to_string()
        })
        .collect()
}

/// Reads a README file and extracts its repository links
pub fn read_readme_links(readme: &Path) -> Result<LinkSet> {
    let content = std::fs::read_to_string(readme)?;
    Ok(extract_repo_links(&content))
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What does find_iter() return?
//    - An iterator over every non-overlapping match in the text
//    - m.as_str() borrows the matched slice, no allocation until to_string()
//
// 2. What does strip_suffix() do?
//    - Returns Some(rest) if the string ends with the suffix, None otherwise
//    - unwrap_or(url) falls back to the original slice
//
// 3. Owner segments use [^/]+, which also matches spaces. A README with
//    "github.com/ some text /x" will produce an odd link; that is accepted.
// -----------------------------------------------------------------------------
