pub mod browse;
pub mod config;
pub mod misc;
pub mod search;

pub use browse::browse_command;
pub use config::config_command;
pub use misc::{display_banner, generate_completions};
pub use search::search_command;

use crate::config::GitFindConfig;
use crate::query::{normalize_language, sanitize, SearchCriteria};
use crate::types::{Preset, SortKey};
use clap::Args;

/// Selectors shared by `search` and `browse`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Sort order (defaults to the config's default_sort)
    #[arg(long, short = 's', value_enum)]
    pub sort: Option<SortKey>,
    /// Only show repositories written in this language
    #[arg(long, short = 'l')]
    pub lang: Option<String>,
    /// Default search used when no query text is given
    #[arg(long, short = 'p', value_enum)]
    pub preset: Option<Preset>,
    /// Plain output without colors
    #[arg(long)]
    pub no_color: bool,
}

impl FilterArgs {
    pub fn criteria(&self, config: &GitFindConfig, text: &str) -> SearchCriteria {
        SearchCriteria {
            text: sanitize(text),
            sort: self.sort.unwrap_or(config.default_sort),
            language: self.lang.as_deref().and_then(normalize_language),
            preset: self.preset.unwrap_or(config.default_preset),
        }
    }

    pub fn use_color(&self, config: &GitFindConfig) -> bool {
        config.color && !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_defaults() {
        let config = GitFindConfig {
            default_preset: Preset::Recent,
            default_sort: SortKey::Forks,
            ..Default::default()
        };

        let plain = FilterArgs::default().criteria(&config, "");
        assert_eq!(plain.preset, Preset::Recent);
        assert_eq!(plain.sort, SortKey::Forks);
        assert_eq!(plain.language, None);

        let args = FilterArgs {
            sort: Some(SortKey::Updated),
            lang: Some("Go".into()),
            preset: Some(Preset::Trending),
            no_color: true,
        };
        let criteria = args.criteria(&config, "web/server");
        assert_eq!(criteria.text, "webserver");
        assert_eq!(criteria.sort, SortKey::Updated);
        assert_eq!(criteria.language.as_deref(), Some("Go"));
        assert_eq!(criteria.preset, Preset::Trending);
        assert!(!args.use_color(&config));
    }
}
