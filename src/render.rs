use crate::chart::{aggregate_languages, ChartSlot, LanguageChart, DEFAULT_WIDTH};
use crate::types::RepoSummary;
use chrono::Local;
use colored::Colorize;
use log::trace;
use std::io::{self, Write};

pub const ERROR_NOTICE: &str = "Failed to load repositories. Please try again.";
pub const EMPTY_TITLE: &str = "No repositories found";
pub const EMPTY_HINT: &str = "Try adjusting your search or filter criteria";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_LANGUAGE: &str = "N/A";

const LOADING: &str = "Loading repositories...";

/// The terminal surface: results, chart and loading indicator.
pub struct Screen<W: Write> {
    out: W,
    color: bool,
    /// stdout is a terminal; gates the loading line and screen clearing.
    live: bool,
    loading: bool,
    chart: ChartSlot,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, color: bool, live: bool) -> Self {
        Screen {
            out,
            color,
            live,
            loading: false,
            chart: ChartSlot::default(),
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn chart(&self) -> Option<&LanguageChart> {
        self.chart.current()
    }

    #[cfg(test)]
    pub fn charts_released(&self) -> usize {
        self.chart.released()
    }

    pub fn show_loading(&mut self) -> io::Result<()> {
        self.loading = true;
        if self.live {
            if self.color {
                write!(self.out, "{}", LOADING.dimmed())?;
            } else {
                write!(self.out, "{}", LOADING)?;
            }
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn hide_loading(&mut self) -> io::Result<()> {
        if self.loading && self.live {
            write!(self.out, "\r\x1B[2K")?;
            self.out.flush()?;
        }
        self.loading = false;
        Ok(())
    }

    pub fn scroll_to_top(&mut self) -> io::Result<()> {
        if self.live {
            write!(self.out, "\x1B[2J\x1B[1;1H")?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn show_repos(&mut self, repos: &[RepoSummary]) -> io::Result<()> {
        if repos.is_empty() {
            writeln!(self.out, "\n  {}", EMPTY_TITLE)?;
            writeln!(self.out, "  {}\n", EMPTY_HINT)?;
            return Ok(());
        }

        writeln!(self.out)?;
        for repo in repos {
            self.card(repo)?;
        }
        Ok(())
    }

    fn card(&mut self, repo: &RepoSummary) -> io::Result<()> {
        let name = if self.color {
            repo.full_name.bold().to_string()
        } else {
            repo.full_name.clone()
        };
        let updated = repo.updated_at.with_timezone(&Local).format("%x");

        writeln!(self.out, "  {}", name)?;
        writeln!(self.out, "    {}", repo.html_url)?;
        writeln!(
            self.out,
            "    {}",
            repo.description.as_deref().unwrap_or(NO_DESCRIPTION)
        )?;
        writeln!(
            self.out,
            "    ⭐ {}  ⑂ {}  {}",
            repo.stargazers_count,
            repo.forks_count,
            repo.language.as_deref().unwrap_or(NO_LANGUAGE)
        )?;
        writeln!(
            self.out,
            "    Updated: {}  👁 {}\n",
            updated, repo.watchers_count
        )
    }

    /// Rebuild the language chart from this page's items and draw it.
    pub fn update_chart(&mut self, repos: &[RepoSummary]) -> io::Result<()> {
        let counts = aggregate_languages(repos);
        trace!("redrawing chart, {} released so far", self.chart.released());
        let chart = self.chart.replace(&counts, DEFAULT_WIDTH);
        chart.draw(&mut self.out, self.color)?;
        writeln!(self.out)
    }

    pub fn show_error(&mut self) -> io::Result<()> {
        let notice = format!("⚠ {}", ERROR_NOTICE);
        if self.color {
            writeln!(self.out, "\n  {}\n", notice.red())
        } else {
            writeln!(self.out, "\n  {}\n", notice)
        }
    }
}
