//! Spinner shown while an external build runs.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::fmt::{CHECKMARK, CROSSMARK};

/// Spinner for a task without known duration; hidden when stderr is not a terminal
pub struct BuildSpinner {
    pb: ProgressBar,
}

impl BuildSpinner {
    /// Create and start a spinner with `message`
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::default_spinner()
            .template("   {spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);
        pb.set_style(spinner_style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// A spinner that never draws
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Stop with a success line
    pub fn succeed(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("   {} {}", CHECKMARK, message);
    }

    /// Stop with a failure line
    pub fn fail(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("   {} {}", CROSSMARK, style(message).red());
    }
}
