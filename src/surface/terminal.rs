//! Line-oriented terminal surface.
//!
//! Turns are printed in arrival order, streamed replies are flushed chunk by
//! chunk, and analysis charts are written as SVG files whose paths are
//! printed next to the summary. A one-line statistics panel follows every
//! handling cycle.

use super::Surface;
use crate::conversation::{AnalysisTurn, Message, SessionStats};
use crate::llm::MessageRole;
use crate::locale::Language;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use tracing::warn;

/// Controls handled by the surface itself, the way buttons would be. They
/// never reach the dialogue loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
    Clear,
    Quit,
}

impl SurfaceAction {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            ":clear" => Some(SurfaceAction::Clear),
            ":quit" | ":q" => Some(SurfaceAction::Quit),
            _ => None,
        }
    }
}

pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    language: Language,
    chart_dir: PathBuf,
    charts_saved: usize,
}

impl TerminalSurface<Stdout> {
    pub fn stdout(language: Language, chart_dir: impl Into<PathBuf>) -> Self {
        Self::new(io::stdout(), language, chart_dir)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, language: Language, chart_dir: impl Into<PathBuf>) -> Self {
        Self {
            out,
            language,
            chart_dir: chart_dir.into(),
            charts_saved: 0,
        }
    }

    pub fn print_banner(&mut self) {
        let _ = writeln!(self.out, "{}\n", self.language.banner());
        let _ = writeln!(self.out, "{}\n", self.language.usage());
    }

    pub fn notice(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    pub fn render_stats(&mut self, stats: &SessionStats) {
        let header = self.language.stats_header();
        if stats.total() == 0 {
            let _ = writeln!(self.out, "{} | {}", header, self.language.no_conversation_yet());
        } else {
            let [users, assistants, total] = self.language.stats_labels();
            let _ = writeln!(
                self.out,
                "{} | {} {} · {} {} · {} {}",
                header,
                users,
                stats.user_messages,
                assistants,
                stats.assistant_messages,
                total,
                stats.total()
            );
        }
        let _ = self.out.flush();
    }

    fn chart_path(&self, analysis: &AnalysisTurn) -> PathBuf {
        let stamp = analysis.created_at.format("%Y%m%d-%H%M%S");
        self.chart_dir
            .join(format!("analysis-{}-{}.svg", stamp, self.charts_saved + 1))
    }

    fn render_analysis(&mut self, analysis: &AnalysisTurn) {
        let path = self.chart_path(analysis);
        match analysis.chart.save(&path) {
            Ok(()) => {
                self.charts_saved += 1;
                let saved = self.language.chart_saved(&path.display().to_string());
                let _ = writeln!(self.out, "{}", saved);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not save chart");
                let failed = self.language.chart_save_failed(&path.display().to_string(), &e);
                let _ = writeln!(self.out, "{}", failed);
            }
        }
        let _ = writeln!(self.out, "{}", analysis.summary);
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render_message(&mut self, message: &Message) {
        match message {
            // Already visible on the input line.
            Message::Turn(turn) if turn.role == MessageRole::User => {}
            Message::Turn(turn) => {
                let _ = writeln!(self.out, "{}{}", self.language.assistant_label(), turn.content);
            }
            Message::Analysis(analysis) => self.render_analysis(analysis),
        }
        let _ = self.out.flush();
    }

    fn begin_stream(&mut self) {
        let _ = write!(self.out, "{}", self.language.assistant_label());
        let _ = self.out.flush();
    }

    fn render_chunk(&mut self, chunk: &str) {
        let _ = write!(self.out, "{}", chunk);
        let _ = self.out.flush();
    }

    fn end_stream(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}
