use crate::error::FetchError;
use crate::query::SearchRequest;
use crate::types::{GitHubErrorBody, GitHubSearchResponse, RepoSummary};
use log::{debug, info};

/// Something that can answer a repository search.
pub trait SearchBackend {
    fn search(&self, request: &SearchRequest) -> Result<Vec<RepoSummary>, FetchError>;
}

pub struct GitHubClient {
    api_base: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl GitHubClient {
    pub fn new(api_base: &str, user_agent: &str, token: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(GitHubClient {
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            client,
        })
    }
}

impl SearchBackend for GitHubClient {
    fn search(&self, request: &SearchRequest) -> Result<Vec<RepoSummary>, FetchError> {
        let url = request.url(&self.api_base);
        debug!("GET {}", url);

        let mut req = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        let result = parse_search_body(status, &body)?;

        info!(
            "query {:?} page {}: {} of {} results{}",
            request.query,
            request.page,
            result.items.len(),
            result.total_count,
            if result.incomplete_results { " (incomplete)" } else { "" }
        );
        Ok(result.items)
    }
}

/// Turn a raw HTTP status and body into a search response.
pub fn parse_search_body(status: u16, body: &str) -> Result<GitHubSearchResponse, FetchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<GitHubErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| "no details".to_string());
        return Err(FetchError::Status { status, message });
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_yields_items() {
        let body = r#"{"total_count": 1, "incomplete_results": false, "items": [{
            "full_name": "a/b", "html_url": "https://github.com/a/b",
            "description": "x", "stargazers_count": 1, "forks_count": 0,
            "language": "Go", "watchers_count": 1,
            "updated_at": "2024-01-02T03:04:05Z"}]}"#;
        let parsed = parse_search_body(200, body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].language.as_deref(), Some("Go"));
    }

    #[test]
    fn rate_limit_carries_api_message() {
        let err = parse_search_body(403, r#"{"message": "API rate limit exceeded"}"#).unwrap_err();
        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API rate limit exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn html_body_is_a_decode_error() {
        let err = parse_search_body(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn blank_token_is_ignored() {
        let client = GitHubClient::new("https://api.github.com/", "gitfind-test", Some("  ".into())).unwrap();
        assert!(client.token.is_none());
        assert_eq!(client.api_base, "https://api.github.com");
    }
}
