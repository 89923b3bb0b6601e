// src/repo/fetch.rs
// =============================================================================
// This module produces a local checkout of a repository.
//
// Strategy:
// - Anything starting with "http" is treated as remote and shallow-cloned
//   (git clone --depth=1) into a fresh temporary directory
// - Anything else is a local path that must already exist
//
// Progress for a clone is announced on stderr before git starts.
//
// The temporary directory lives inside the returned `Checkout`. When the
// checkout is dropped the directory is deleted, whether the caller
// succeeded or not. A failed clone drops its directory before returning
// the error.
// =============================================================================

use crate::error::{RbError, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

/// A repository available on the local filesystem
#[derive(Debug)]
pub enum Checkout {
    /// An existing directory supplied by the user
    Local(PathBuf),
    /// A shallow clone; removed when this value is dropped
    Cloned(TempDir),
}

impl Checkout {
    /// Root of the repository contents
    pub fn path(&self) -> &Path {
        match self {
            Checkout::Local(path) => path.as_path(),
            Checkout::Cloned(dir) => dir.path(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Checkout::Cloned(_))
    }
}

/// Clones or validates repository locations
#[derive(Debug, Clone)]
pub struct RepoFetcher {
    git_program: String,
    scratch_root: Option<PathBuf>,
}

impl Default for RepoFetcher {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            scratch_root: None,
        }
    }
}

impl RepoFetcher {
    /// Uses a different executable in place of `git`
    #[cfg(test)]
    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    /// Creates clone directories under `root` instead of the system temp dir
    #[cfg(test)]
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    // Fetches a repository location
    //
    // Parameters:
    //   location: a URL (starting with "http") or a local path
    //
    // Returns: a Checkout whose path() is the repository root
    //
    // Errors:
    //   CloneFailure if git exits non-zero, InvalidPath if a local path
    //   does not exist
    pub async fn fetch(&self, location: &str) -> Result<Checkout> {
        if is_remote(location) {
            self.clone_shallow(location).await.map(Checkout::Cloned)
        } else {
            let path = PathBuf::from(location);
            if !path.exists() {
                return Err(RbError::InvalidPath(path));
            }
            debug!(path = %path.display(), "using local repository");
            Ok(Checkout::Local(path))
        }
    }

    async fn clone_shallow(&self, url: &str) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("tmp_repo_");
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        // stderr, so commands that print JSON keep a clean stdout
        eprintln!("Cloning repository to {}...", dir.path().display());
        debug!(url, "cloning repository");

        let output = Command::new(&self.git_program)
            .arg("clone")
            .arg("--depth=1")
            .arg(url)
            .arg(dir.path())
            .output()
            .await
            .map_err(|e| RbError::CloneFailure {
                url: url.to_string(),
                stderr: format!("could not run {}: {}", self.git_program, e),
            })?;

        if !output.status.success() {
            // `dir` goes out of scope here, which removes it
            return Err(RbError::CloneFailure {
                url: url.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(url, "repository cloned");
        Ok(dir)
    }
}

// Checks whether a location should be cloned
//
// "http://..." and "https://..." are both remote, everything else is a path.
fn is_remote(location: &str) -> bool {
    location.starts_with("http")
}
