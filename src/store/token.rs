// src/store/token.rs
// =============================================================================
// Creates a Datasette API token by shelling out to
// `datasette create-token <actor> --secret <secret>`.
//
// The token is signed with the instance's secret, so this only works for
// instances started with the same DATASETTE_SECRET.
// =============================================================================

use crate::error::{RbError, Result};
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_TOKEN_PROGRAM: &str = "datasette";

// Runs the token command and returns the token it prints
//
// Parameters:
//   program: the datasette executable
//   username: actor id the token is issued for
//   secret: signing secret; None means the user never supplied one
pub async fn create_token(program: &str, username: &str, secret: Option<&str>) -> Result<String> {
    let secret = secret
        .filter(|secret| !secret.is_empty())
        .ok_or(RbError::MissingCredentials("DATASETTE_SECRET"))?;

    debug!(program, username, "creating auth token");

    let output = Command::new(program)
        .arg("create-token")
        .arg(username)
        .arg("--secret")
        .arg(secret)
        .output()
        .await
        .map_err(|e| RbError::TokenCommand(format!("could not run {}: {}", program, e)))?;

    if !output.status.success() {
        return Err(RbError::TokenCommand(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
