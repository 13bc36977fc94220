use crate::types::{Preset, SortKey};
use chrono::{Duration, NaiveDate};

pub const RECENT_PUSHED_SINCE: &str = "2023-01-01";

/// Everything the user picked that shapes a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Already sanitized; see [`sanitize`].
    pub text: String,
    pub sort: SortKey,
    pub language: Option<String>,
    pub preset: Preset,
}

/// A fully resolved call to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub sort: SortKey,
    pub page: u32,
    pub per_page: u8,
}

/// Keep ASCII letters, digits and spaces only.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize a language filter; blank means no filter.
pub fn normalize_language(input: &str) -> Option<String> {
    let lang: String = input.chars().filter(|c| *c != '"').collect();
    let lang = lang.trim();
    if lang.is_empty() {
        None
    } else {
        Some(lang.to_string())
    }
}

pub fn default_clause(preset: Preset, today: NaiveDate) -> String {
    match preset {
        Preset::Popular => "stars:>500".to_string(),
        Preset::Trending => {
            let week_ago = today - Duration::days(7);
            format!("created:>{} stars:>100", week_ago.format("%Y-%m-%d"))
        }
        Preset::Recent => format!("pushed:>{}", RECENT_PUSHED_SINCE),
    }
}

pub fn build_query(criteria: &SearchCriteria, today: NaiveDate) -> String {
    let mut q = if criteria.text.is_empty() {
        default_clause(criteria.preset, today)
    } else {
        format!("{} in:name,description", criteria.text)
    };

    if let Some(lang) = &criteria.language {
        if lang.contains(char::is_whitespace) {
            q.push_str(&format!(" language:\"{}\"", lang));
        } else {
            q.push_str(&format!(" language:{}", lang));
        }
    }

    q
}

impl SearchRequest {
    pub fn new(criteria: &SearchCriteria, page: u32, per_page: u8, today: NaiveDate) -> Self {
        SearchRequest {
            query: build_query(criteria, today),
            sort: criteria.sort,
            page: page.max(1),
            per_page,
        }
    }

    pub fn url(&self, api_base: &str) -> String {
        let mut url = format!(
            "{}/search/repositories?q={}",
            api_base.trim_end_matches('/'),
            urlencoding::encode(&self.query)
        );
        if let Some(sort) = self.sort.api_param() {
            url.push_str(&format!("&sort={}", sort));
        }
        url.push_str(&format!(
            "&order=desc&page={}&per_page={}",
            self.page, self.per_page
        ));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn sanitize_strips_everything_but_alnum_and_space() {
        assert_eq!(sanitize("  rust-lang/rust! "), "rustlangrust");
        assert_eq!(sanitize("web <script>alert(1)</script>"), "web scriptalert1script");
        assert_eq!(sanitize("héllo wörld 42"), "hllo wrld 42");
        assert_eq!(sanitize("!!!"), "");
    }

    #[test]
    fn text_searches_name_and_description() {
        let criteria = SearchCriteria {
            text: sanitize("tokio runtime"),
            ..Default::default()
        };
        assert_eq!(
            build_query(&criteria, day("2024-03-10")),
            "tokio runtime in:name,description"
        );
    }

    #[test]
    fn empty_text_uses_preset_clause() {
        let today = day("2024-03-10");
        let mut criteria = SearchCriteria::default();
        assert_eq!(build_query(&criteria, today), "stars:>500");

        criteria.preset = Preset::Recent;
        assert_eq!(build_query(&criteria, today), "pushed:>2023-01-01");
    }

    #[test]
    fn trending_looks_back_exactly_one_week() {
        let criteria = SearchCriteria {
            preset: Preset::Trending,
            ..Default::default()
        };
        assert_eq!(
            build_query(&criteria, day("2024-03-03")),
            "created:>2024-02-25 stars:>100"
        );
        // across a year boundary
        assert_eq!(
            default_clause(Preset::Trending, day("2024-01-04")),
            "created:>2023-12-28 stars:>100"
        );
    }

    #[test]
    fn trending_uses_the_current_date() {
        let today = chrono::Utc::now().date_naive();
        let expected = (today - Duration::days(7)).format("%Y-%m-%d").to_string();
        let q = default_clause(Preset::Trending, today);
        assert!(q.contains(&format!("created:>{}", expected)));
        assert!(q.contains("stars:>100"));
    }

    #[test]
    fn language_is_appended_and_quoted_when_needed() {
        let mut criteria = SearchCriteria {
            text: "parser".into(),
            language: normalize_language(" Rust "),
            ..Default::default()
        };
        let today = day("2024-03-10");
        assert_eq!(
            build_query(&criteria, today),
            "parser in:name,description language:Rust"
        );

        criteria.language = normalize_language("Jupyter Notebook");
        assert!(build_query(&criteria, today).ends_with("language:\"Jupyter Notebook\""));

        assert_eq!(normalize_language("   "), None);
    }

    #[test]
    fn url_encodes_the_whole_query() {
        let criteria = SearchCriteria {
            language: normalize_language("C++"),
            ..Default::default()
        };
        let req = SearchRequest::new(&criteria, 2, 9, day("2024-03-10"));
        assert_eq!(
            req.url("https://api.github.com/"),
            "https://api.github.com/search/repositories?q=stars%3A%3E500%20language%3AC%2B%2B&sort=stars&order=desc&page=2&per_page=9"
        );
    }

    #[test]
    fn best_match_sends_no_sort() {
        let criteria = SearchCriteria {
            text: "cli".into(),
            sort: SortKey::BestMatch,
            ..Default::default()
        };
        let url = SearchRequest::new(&criteria, 1, 9, day("2024-03-10")).url("http://x");
        assert!(!url.contains("sort="));
        assert!(url.contains("&order=desc&page=1&per_page=9"));
    }

    #[test]
    fn page_never_drops_below_one() {
        let req = SearchRequest::new(&SearchCriteria::default(), 0, 9, day("2024-03-10"));
        assert_eq!(req.page, 1);
    }
}
