//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::{
    MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_REFRESH_NODES, SPINNER_TICK_MS,
};
use crate::lattice::configuration::Placement;
use crate::search::observer::SearchObserver;
use crate::search::outcome::SearchStats;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {prefix:.bold} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Boards: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for batch runs
///
/// Each board being solved gets a spinner. Once more than
/// [`MAX_INDIVIDUAL_PROGRESS_BARS`] boards are queued a batch bar is added
/// and only the most recent spinners stay on screen.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    /// (`file index`, spinner) for the visible window
    active: Vec<(usize, ProgressBar)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            active: Vec::new(),
        }
    }

    /// Prepare the display for `file_count` boards
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Show a spinner for a board and return the observer that drives it
    pub fn start_file(&mut self, index: usize, path: &Path) -> SearchProgress {
        if self.active.len() >= MAX_INDIVIDUAL_PROGRESS_BARS && !self.active.is_empty() {
            let (_, oldest) = self.active.remove(0);
            oldest.finish_and_clear();
            self.multi_progress.remove(&oldest);
        }

        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(SPINNER_STYLE.clone());
        spinner.set_prefix(display_name);
        spinner.set_message("searching");
        spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));

        self.active.push((index, spinner.clone()));
        SearchProgress::new(spinner)
    }

    /// Mark a board as done with a one-line summary
    pub fn complete_file(&mut self, index: usize, summary: &str) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some((_, spinner)) = self.active.iter().find(|(active, _)| *active == index) {
            spinner.finish_with_message(format!("✓ {summary}"));
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All boards processed");
        }
        let _ = self.multi_progress.clear();
    }
}

/// Search observer that writes live counters to a spinner
///
/// Clones share the spinner, so every worker of a parallel search reports
/// to the same line.
#[derive(Clone, Debug)]
pub struct SearchProgress {
    bar: ProgressBar,
}

impl SearchProgress {
    /// Drive `bar` from search events
    pub const fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }

    /// Observer that draws nothing
    pub fn hidden() -> Self {
        Self::new(ProgressBar::hidden())
    }

    /// Current spinner message
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl SearchObserver for SearchProgress {
    fn on_node(&mut self, stats: &SearchStats) {
        if stats.nodes % PROGRESS_REFRESH_NODES == 0 {
            self.bar.set_message(format!(
                "{} nodes, {} evaluations",
                stats.nodes, stats.evaluations
            ));
        }
    }

    fn on_evaluate(&mut self, placement: &Placement, covered: bool) {
        if covered {
            self.bar.set_message(format!("solved with {placement}"));
        }
    }
}
