//! Progress display for the correlation pass

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len} rows")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Row-by-row progress of one correlation pass
///
/// Hidden bars swallow updates, so quiet runs use the same code path.
pub struct CorrelationProgress {
    bar: ProgressBar,
}

impl CorrelationProgress {
    /// Create a bar over `rows` origin rows, hidden when `visible` is false
    pub fn new(rows: usize, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(rows as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(ROW_STYLE.clone());
        bar.set_message("Correlating");
        Self { bar }
    }

    /// Record the number of completed rows
    pub fn set_rows_done(&self, rows: usize) {
        self.bar.set_position(rows as u64);
    }

    /// Rows recorded so far
    pub fn rows_done(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
