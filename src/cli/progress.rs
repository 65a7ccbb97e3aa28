//! Progress display for title resolution.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Counts completed title lookups out of the total started.
pub struct TitleProgress {
    bar: ProgressBar,
}

impl TitleProgress {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        bar.set_message("Resolving titles");
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Record one finished lookup.
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Print a line above the bar without corrupting it.
    pub fn println(&self, message: &str) {
        self.bar.println(message);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Spinner shown while a document is parsed.
pub fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Truncate to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = s.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}
