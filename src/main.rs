mod chart;
mod commands;
mod config;
mod error;
mod github;
mod query;
mod render;
mod state;
mod types;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use commands::search::SearchOptions;
use commands::{
    browse_command, config_command, display_banner, generate_completions, search_command,
    FilterArgs,
};
use config::GitFindConfig;

#[derive(Parser)]
#[command(name = "gitfind")]
#[command(about = "Search GitHub repositories from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// GitHub token, raises the search rate limit
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// More log output on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once and print result cards plus a language chart
    #[command(short_flag = 'S', visible_alias = "s")]
    Search {
        /// Words to look for in names and descriptions; omit to use the preset
        query: Option<String>,
        /// Page of results to show
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Results per page (1-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        per_page: Option<u8>,
        /// Print a JSON report instead of cards
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Interactive session: type to search, slash commands to page and filter
    #[command(short_flag = 'B', visible_alias = "b")]
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show or create the settings file
    Config {
        /// Write a settings file with the defaults
        #[arg(long, conflicts_with = "path")]
        init: bool,
        /// Print where the settings file lives
        #[arg(long)]
        path: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let Some(command) = cli.command else {
        display_banner();
        return Ok(0);
    };

    match command {
        Commands::Search {
            query,
            page,
            per_page,
            json,
            filters,
        } => {
            let config = GitFindConfig::load();
            let opts = SearchOptions {
                query,
                page,
                per_page,
                json,
                filters,
            };
            search_command(opts, &config, cli.token)
        }
        Commands::Browse { filters } => {
            let config = GitFindConfig::load();
            browse_command(filters, &config, cli.token)?;
            Ok(0)
        }
        Commands::Config { init, path } => {
            config_command(init, path)?;
            Ok(0)
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(0)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };
    std::process::exit(exit_code);
}
