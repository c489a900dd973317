//! GitHub authentication
//!
//! Tokens come from the environment: `GH_TOKEN` first, then `GITHUB_TOKEN`.

use crate::error::{Error, Result};
use std::env;

const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Read a GitHub token from the environment
pub fn get_github_token() -> Result<String> {
    token_from(|var| env::var(var).ok())
}

/// Pick the first non-blank token, looking variables up with `lookup`
pub fn token_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
        .ok_or_else(|| {
            Error::Auth(format!(
                "no GitHub token found; set {}",
                TOKEN_VARS.join(" or ")
            ))
        })
}
