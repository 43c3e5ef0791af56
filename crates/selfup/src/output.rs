//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use selfup_update::{Stage, StateObserver, UpdateState};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Prints a numbered line as the update pipeline enters each stage
#[derive(Debug, Clone, Copy, Default)]
pub struct StepObserver;

impl StepObserver {
    const STEPS: usize = 6;

    fn step(stage: Stage) -> (usize, &'static str) {
        match stage {
            Stage::CheckingVersion => (1, "Checking latest release"),
            Stage::Resolving => (2, "Resolving release assets"),
            Stage::Downloading => (3, "Downloading archive"),
            Stage::Verifying => (4, "Verifying checksum"),
            Stage::Extracting => (5, "Extracting binary"),
            Stage::Applying => (6, "Replacing installed binary"),
        }
    }

    /// Line printed when entering `stage`
    pub fn line(stage: Stage) -> String {
        let (n, label) = Self::step(stage);
        format!("[{}/{}] {}", n, Self::STEPS, label)
    }
}

impl StateObserver for StepObserver {
    fn on_transition(&self, _from: UpdateState, to: UpdateState) {
        if let Some(stage) = to.stage() {
            println!("{}", style(Self::line(stage)).dim());
        }
    }
}
