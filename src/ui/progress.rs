//! Phase progress reporting
//!
//! Adapts the coordinator's start/tick/end hook contract to an indicatif
//! spinner: the spinner is not self-animating, it advances once per
//! coordinator tick so the display reflects real poll activity.

use crate::executor::PhaseHooks;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Spinner-backed reporter for one phase (backup or copy).
pub struct PhaseReporter {
    label: String,
    bar: ProgressBar,
}

impl PhaseReporter {
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self {
            label: label.to_string(),
            bar,
        }
    }

    pub fn started(&self) {
        self.bar.set_message(format!("{}...", self.label));
        self.bar.tick();
    }

    pub fn ticked(&self) {
        self.bar.tick();
    }

    pub fn finished(&self) {
        self.bar.finish_with_message(format!("{} done", self.label));
    }

    /// Package this reporter as coordinator phase hooks.
    pub fn into_hooks(self) -> PhaseHooks {
        let reporter = Arc::new(self);
        let on_start = Arc::clone(&reporter);
        let on_tick = Arc::clone(&reporter);
        let on_end = reporter;

        PhaseHooks {
            on_start: Some(Box::new(move || on_start.started())),
            on_tick: Some(Box::new(move || on_tick.ticked())),
            on_end: Some(Box::new(move || on_end.finished())),
        }
    }
}
