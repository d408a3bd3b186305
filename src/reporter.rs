use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use sevenz_batch::{BatchKind, BatchReporter, BatchResult, Error, ItemOutcome};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Console reporter: candidate list up front, a spinner while 7-Zip runs,
/// one line per item and a summary at the end.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn print_summary(&self, result: &BatchResult) {
        let failed = result.failed();
        let failed_text = format!("{} failed", failed);
        println!(
            "{} {} {}(s) processed, {} succeeded, {} in {}",
            "Done:".bold(),
            result.processed(),
            result.kind.noun(),
            format!("{}", result.succeeded()).green(),
            if failed > 0 {
                failed_text.red()
            } else {
                failed_text.normal()
            },
            HumanDuration(result.duration),
        );

        if failed > 0 {
            println!("{}", "Failed items:".red().bold());
            for outcome in result.failures() {
                println!("  {} {}", "✗".red(), outcome.item.display());
            }
        }
    }
}

impl BatchReporter for CliReporter {
    fn on_candidates(&self, kind: BatchKind, root: &Path, items: &[PathBuf]) {
        if items.is_empty() {
            println!(
                "No {}s found under {}",
                kind.noun(),
                root.display().to_string().cyan()
            );
            return;
        }

        println!(
            "Found {} {}(s) under {}:",
            format!("{}", items.len()).cyan(),
            kind.noun(),
            root.display().to_string().cyan()
        );
        for item in items {
            let shown = item.strip_prefix(root).unwrap_or(item);
            println!("  {}", shown.display());
        }
    }

    fn on_item_start(&self, index: usize, total: usize, item: &Path) {
        let pb = ProgressBar::new_spinner();
        let template = "{spinner:.cyan} [{prefix}] {msg} ({elapsed})";
        if let Ok(style) = ProgressStyle::with_template(template) {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_prefix(format!("{}/{}", index + 1, total));
        pb.set_message(item.display().to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_item_complete(&self, outcome: &ItemOutcome) {
        self.finish_bar();
        if outcome.succeeded() {
            let detail = match &outcome.archive {
                Some(archive) => format!(" -> {}", archive.display()),
                None => String::new(),
            };
            println!("  {} {}{}", "✓".green(), outcome.item.display(), detail);
        } else {
            println!("  {} {}", "✗".red(), outcome.item.display());
            for line in outcome.diagnostic.lines() {
                println!("      {}", line.red());
            }
        }
    }

    fn on_batch_halted(&self, partial: &BatchResult, error: &Error) {
        self.finish_bar();
        println!(
            "{} {} after {} {}(s): {}",
            "Stopped:".red().bold(),
            "batch aborted".red(),
            partial.processed(),
            partial.kind.noun(),
            error
        );
    }

    fn on_batch_complete(&self, result: &BatchResult) {
        self.finish_bar();
        self.print_summary(result);
    }
}
