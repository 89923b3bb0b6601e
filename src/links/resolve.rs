// src/links/resolve.rs
// =============================================================================
// Turns GitHub URLs into "owner/repo" identifiers.
//
// The capture is everything after "github.com/" up to the second path
// segment. Suffixes are then cut in a fixed order: first at "/tree/",
// then at the first ".git". Entries that don't look like GitHub URLs are
// dropped without an error.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static REPO_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([^/]+/[^/]+)").expect("repo path pattern is valid")
});

// Resolves one link to an identifier
//
// Examples:
//   "https://github.com/owner/repo/tree/main" -> Some("owner/repo")
//   "https://github.com/owner/repo.git"       -> Some("owner/repo")
//   "https://gitlab.com/owner/repo"           -> None
pub fn resolve_identifier(link: &str) -> Option<String> {
    let captured = REPO_PATH.captures(link)?.get(1)?.as_str();

    let before_tree = captured.split("/tree/").next().unwrap_or(captured);
    let before_git = before_tree.split(".git").next().unwrap_or(before_tree);

    Some(before_git.to_string())
}

/// Resolves every link that matches, in input order
pub fn resolve_identifiers<'a, I>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    links
        .into_iter()
        .filter_map(|link| {
            let resolved = resolve_identifier(link);
            if resolved.is_none() {
                debug!(link, "skipping entry without a GitHub repository path");
            }
            resolved
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_repo_url() {
        assert_eq!(
            resolve_identifier("https://github.com/skydoves/landscapist").as_deref(),
            Some("skydoves/landscapist")
        );
    }

    #[test]
    fn test_tree_suffix_is_stripped() {
        assert_eq!(
            resolve_identifier("https://github.com/owner/repo/tree/main").as_deref(),
            Some("owner/repo")
        );
    }

    #[test]
    fn test_git_suffix_is_stripped() {
        assert_eq!(
            resolve_identifier("https://github.com/owner/repo.git").as_deref(),
            Some("owner/repo")
        );
    }

    #[test]
    fn test_git_then_tree() {
        // The capture already ends at "repo.git", so only ".git" is cut
        assert_eq!(
            resolve_identifier("https://github.com/owner/repo.git/tree/main").as_deref(),
            Some("owner/repo")
        );
    }

    #[test]
    fn test_git_cut_happens_at_first_occurrence() {
        assert_eq!(
            resolve_identifier("https://github.com/owner/owner.github.io").as_deref(),
            Some("owner/owner")
        );
    }

    #[test]
    fn test_scheme_is_optional() {
        assert_eq!(
            resolve_identifier("github.com/rust-lang/rust").as_deref(),
            Some("rust-lang/rust")
        );
    }

    #[test]
    fn test_non_matching_entries_are_skipped() {
        let ids = resolve_identifiers([
            "https://gitlab.com/owner/repo",
            "https://github.com/tokio-rs/tokio",
            "not a url",
            "https://github.com/only-owner",
            "https://github.com/serde-rs/json/tree/master",
        ]);
        assert_eq!(ids, vec!["tokio-rs/tokio", "serde-rs/json"]);
    }
}
