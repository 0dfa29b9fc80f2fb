//! GitHub user profiles: the record returned by `/users/{username}`,
//! the display defaults used by the card, and the source trait the
//! search controller fetches through.

pub mod client;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub use client::GitHubClient;

/// Public GitHub REST API root
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const NO_NAME: &str = "No Name";
const NO_BIO: &str = "No bio available";

/// A GitHub user profile as returned by `GET /users/{username}`.
///
/// Only the fields the card shows are kept; everything else in the
/// response body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    pub avatar_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,

    // Extra details shown under the stats when GitHub has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Why a profile lookup failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Any non-2xx response. 404, 403 (rate limit) and 5xx all read the same
    /// to the user; the status is kept for logging.
    #[error("User not found")]
    Status(StatusCode),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can look up a profile by username.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError>;
}

/// Build the lookup URL. The username goes into the path as typed.
pub fn profile_url(api_base: &str, username: &str) -> String {
    format!("{}/users/{}", api_base.trim_end_matches('/'), username)
}

/// Display name, or "No Name" when GitHub has none (missing or blank).
pub fn display_name(profile: &Profile) -> &str {
    non_empty(profile.name.as_deref()).unwrap_or(NO_NAME)
}

/// Bio, or "No bio available" when missing or blank.
pub fn display_bio(profile: &Profile) -> &str {
    non_empty(profile.bio.as_deref()).unwrap_or(NO_BIO)
}

pub fn handle(profile: &Profile) -> String {
    format!("@{}", profile.login)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Plain-text card, used by `--print`
pub fn render_card_text(profile: &Profile) -> String {
    let mut lines = vec![
        display_name(profile).to_string(),
        handle(profile),
        String::new(),
        display_bio(profile).to_string(),
        String::new(),
        format!(
            "Followers: {}  Following: {}  Repositories: {}",
            profile.followers, profile.following, profile.public_repos
        ),
        format!("Avatar: {}", profile.avatar_url),
    ];

    for (label, value) in extra_details(profile) {
        lines.push(format!("{}: {}", label, value));
    }

    lines.join("\n")
}

/// Optional details that are present and non-empty, in display order.
pub fn extra_details(profile: &Profile) -> Vec<(&'static str, &str)> {
    [
        ("Location", profile.location.as_deref()),
        ("Company", profile.company.as_deref()),
        ("Blog", profile.blog.as_deref()),
        ("Profile", profile.html_url.as_deref()),
        ("Joined", profile.created_at.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| non_empty(value).map(|v| (label, v)))
    .collect()
}
