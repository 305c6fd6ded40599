//! Multi-puzzle progress tracking with automatic batching for large runs

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display while puzzles are generated and solved
///
/// Shows one bar per puzzle (locked pieces out of total) for small runs and
/// adds a single batch bar once the run is larger than the visible window
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    puzzle_bars: Vec<ProgressBar>,
    /// Stores (`label`, `locked`, `total`) for rolling window display
    puzzle_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PUZZLE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.green/white}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            puzzle_bars: Vec::new(),
            puzzle_states: Vec::new(),
        }
    }

    /// Create bars for a run of `puzzle_count` puzzles
    pub fn initialize(&mut self, puzzle_count: usize) {
        if puzzle_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(puzzle_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..puzzle_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(PUZZLE_STYLE.clone());
            self.puzzle_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register a freshly generated puzzle
    pub fn start_puzzle(&mut self, index: usize, label: &str, pieces: usize) {
        if index >= self.puzzle_states.len() {
            self.puzzle_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.puzzle_states.get_mut(index) {
            *state = (label.to_string(), 0, pieces);
        }
        self.update_bars();
    }

    /// Report how many pieces of a puzzle are locked
    pub fn update_locked(&mut self, index: usize, locked: usize) {
        if let Some(state) = self.puzzle_states.get_mut(index) {
            state.1 = locked;
        }
        self.update_bars();
    }

    /// Mark a puzzle as finished
    pub fn complete_puzzle(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.puzzle_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Number of puzzles registered so far
    pub fn puzzles_started(&self) -> usize {
        self.puzzle_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .count()
    }

    // Shows the most recent puzzles in the fixed set of bars
    fn update_bars(&self) {
        let active: Vec<_> = self
            .puzzle_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, (label, locked, total)) in visible.iter().enumerate() {
            if let Some(bar) = self.puzzle_bars.get(bar_index) {
                bar.set_length(*total as u64);
                bar.set_position(*locked as u64);
                let width = total.to_string().len();
                bar.set_message(format!("{locked:>width$}/{total}"));
                bar.set_prefix(label.clone());
            }
        }

        for bar in self.puzzle_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
