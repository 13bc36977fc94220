use crate::types::RepoSummary;
use colored::Colorize;
use log::trace;
use serde::Serialize;
use std::io::{self, Write};

/// Segment colors, assigned by position and reused past the eighth language.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0x6f, 0x42, 0xc1),
    (0x20, 0xc9, 0x97),
    (0xff, 0xc1, 0x07),
    (0xdc, 0x35, 0x45),
    (0x00, 0x7b, 0xff),
    (0xfd, 0x7e, 0x14),
    (0xe8, 0x3e, 0x8c),
    (0x6c, 0x75, 0x7d),
];

// Fill glyphs for monochrome output, one per palette slot.
const GLYPHS: [char; 8] = ['█', '▓', '▒', '░', '#', '=', '+', '*'];

pub const DEFAULT_WIDTH: usize = 48;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

/// Count repositories per language, in order of first appearance.
/// Repositories without a language are skipped.
pub fn aggregate_languages(items: &[RepoSummary]) -> Vec<LanguageCount> {
    let mut counts: Vec<LanguageCount> = Vec::new();
    for lang in items.iter().filter_map(|r| r.language.as_deref()) {
        match counts.iter_mut().find(|c| c.language == lang) {
            Some(existing) => existing.count += 1,
            None => counts.push(LanguageCount {
                language: lang.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub language: String,
    pub count: usize,
    pub width: usize,
    pub slot: usize,
}

/// A drawn language-distribution chart.
#[derive(Debug)]
pub struct LanguageChart {
    segments: Vec<Segment>,
    total: usize,
}

impl LanguageChart {
    /// Every language gets at least one cell; the bar grows past `width`
    /// when there are more languages than cells.
    pub fn new(counts: &[LanguageCount], width: usize) -> Self {
        let width = width.max(counts.len());
        let total: usize = counts.iter().map(|c| c.count).sum();
        let mut segments = Vec::with_capacity(counts.len());
        let mut cumulative = 0;
        let mut drawn = 0;

        for (i, c) in counts.iter().enumerate() {
            cumulative += c.count;
            // rounded boundaries keep the summed width exact
            let boundary = (cumulative * width + total / 2) / total.max(1);
            segments.push(Segment {
                language: c.language.clone(),
                count: c.count,
                width: boundary - drawn,
                slot: i % PALETTE.len(),
            });
            drawn = boundary;
        }

        // width >= segment count, so a zero-width segment implies some
        // other segment holds at least two cells to give up
        while let Some(thin) = segments.iter().position(|s| s.width == 0) {
            let Some(widest) = (0..segments.len()).max_by_key(|&i| segments[i].width) else {
                break;
            };
            if segments[widest].width < 2 {
                break;
            }
            segments[widest].width -= 1;
            segments[thin].width = 1;
        }

        LanguageChart { segments, total }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Draw the bar with the legend below it.
    pub fn draw<W: Write>(&self, out: &mut W, color: bool) -> io::Result<()> {
        writeln!(out, "Languages on this page")?;
        if self.is_empty() {
            writeln!(out, "  (no language data)")?;
            return Ok(());
        }

        write!(out, "  ")?;
        for seg in &self.segments {
            write!(out, "{}", paint(&fill(seg.slot, seg.width, color), seg.slot, color))?;
        }
        writeln!(out)?;
        writeln!(out)?;

        for seg in &self.segments {
            let pct = seg.count as f64 * 100.0 / self.total as f64;
            writeln!(
                out,
                "  {} {:<20} {:>3}  ({:.1}%)",
                paint(&fill(seg.slot, 1, color), seg.slot, color),
                seg.language,
                seg.count,
                pct
            )?;
        }
        Ok(())
    }

    fn release(self) {
        trace!("releasing chart with {} segments", self.segments.len());
    }
}

fn fill(slot: usize, width: usize, color: bool) -> String {
    let glyph = if color { '█' } else { GLYPHS[slot] };
    std::iter::repeat(glyph).take(width).collect()
}

fn paint(text: &str, slot: usize, color: bool) -> String {
    if color {
        let (r, g, b) = PALETTE[slot];
        text.truecolor(r, g, b).to_string()
    } else {
        text.to_string()
    }
}

/// Holds at most one chart; the old one is released before the next is built.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<LanguageChart>,
    released: usize,
}

impl ChartSlot {
    pub fn replace(&mut self, counts: &[LanguageCount], width: usize) -> &LanguageChart {
        if let Some(old) = self.current.take() {
            old.release();
            self.released += 1;
        }
        self.current.insert(LanguageChart::new(counts, width))
    }

    pub fn current(&self) -> Option<&LanguageChart> {
        self.current.as_ref()
    }

    pub fn released(&self) -> usize {
        self.released
    }
}
