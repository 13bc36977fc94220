use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One search hit, as much of it as a result card shows.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RepoSummary {
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,
    pub watchers_count: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Default)]
pub struct GitHubSearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<RepoSummary>,
}

/// Body GitHub sends back alongside 4xx/5xx statuses.
#[derive(Deserialize, Debug)]
pub struct GitHubErrorBody {
    pub message: String,
}

/// Named default searches used when no free text is given.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Popular,
    Trending,
    Recent,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Popular, Preset::Trending, Preset::Recent];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Popular => "popular",
            Preset::Trending => "trending",
            Preset::Recent => "recent",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// GitHub's relevance ranking (no sort parameter)
    BestMatch,
    #[default]
    Stars,
    Forks,
    Updated,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::BestMatch,
        SortKey::Stars,
        SortKey::Forks,
        SortKey::Updated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::BestMatch => "best-match",
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::Updated => "updated",
        }
    }

    /// Value for the `sort` query parameter; best-match sends none.
    pub fn api_param(self) -> Option<&'static str> {
        match self {
            SortKey::BestMatch => None,
            other => Some(other.as_str()),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
