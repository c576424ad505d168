//! Git operations for fetching remote projects
//!
//! Clones are shallow (`--depth 1`): only the current tree is scanned, so
//! history is never needed. Tokens reach git through a one-shot credential
//! helper reading an environment variable, so they never appear in the
//! command line or the clone's `.git/config`, and are masked in every error
//! message.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Username sent alongside an access token; hosts only check the token
const TOKEN_USERNAME: &str = "pyreqs";

/// Environment variable the credential helper reads the token from
const TOKEN_ENV: &str = "PYREQS_CLONE_TOKEN";

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git command failed: {message}")]
    CommandFailed { message: String },

    #[error("Failed to execute git: {source}")]
    Exec { source: std::io::Error },
}

/// Shallow-clone `repo_url` into `dest`, authenticating with `token` if given
///
/// On failure, cleans up any partial clone.
pub fn clone_with_token(repo_url: &str, token: Option<&str>, dest: &Path) -> Result<(), GitError> {
    let output = clone_command(repo_url, token, dest)
        .output()
        .map_err(|source| GitError::Exec { source })?;

    if output.status.success() {
        return Ok(());
    }

    cleanup_partial_clone(dest);
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(GitError::CommandFailed {
        message: mask_token(stderr.trim(), token),
    })
}

fn clone_command(repo_url: &str, token: Option<&str>, dest: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(["clone", "--depth", "1", "--quiet"])
        .arg(repo_url)
        .arg(dest)
        .env("GIT_TERMINAL_PROMPT", "0");

    if let Some(token) = token
        && !token.is_empty()
    {
        cmd.envs(credential_env(token));
    }
    cmd
}

/// Command-scoped git config installing a credential helper for `token`
///
/// The empty first entry clears helpers inherited from user or system
/// config. Only the `TOKEN_ENV` value carries the secret.
fn credential_env(token: &str) -> Vec<(String, String)> {
    let helper = format!(
        "!f() {{ test \"$1\" = get && echo username={} && echo \"password=${}\"; }}; f",
        TOKEN_USERNAME, TOKEN_ENV
    );
    vec![
        ("GIT_CONFIG_COUNT".to_string(), "2".to_string()),
        ("GIT_CONFIG_KEY_0".to_string(), "credential.helper".to_string()),
        ("GIT_CONFIG_VALUE_0".to_string(), String::new()),
        ("GIT_CONFIG_KEY_1".to_string(), "credential.helper".to_string()),
        ("GIT_CONFIG_VALUE_1".to_string(), helper),
        (TOKEN_ENV.to_string(), token.to_string()),
    ]
}

fn mask_token(message: &str, token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => message.replace(token, "***"),
        _ => message.to_string(),
    }
}

/// Remove a partial clone directory's contents if it exists
fn cleanup_partial_clone(dest: &Path) {
    if dest.exists() {
        let _ = std::fs::remove_dir_all(dest);
    }
}
