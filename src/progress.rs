//! Progress bar display for batched enrichment

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for enrichment batches
pub struct BatchProgress {
    pb: ProgressBar,
}

impl BatchProgress {
    /// Create a new progress display with total batch count
    pub fn new(total_batches: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} batches {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total_batches);
        pb.set_style(style);
        Self { pb }
    }

    /// Hidden progress, for non-interactive output
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Update to show the batch being enriched
    pub fn start_batch(&self, index: usize, size: usize) {
        self.pb
            .set_message(format!("(batch {}: {} items)", index + 1, size));
    }

    pub fn finish_batch(&self) {
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
