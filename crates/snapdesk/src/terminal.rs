use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snapdesk_client::prelude::*;
use snapdesk_client::render::GENERATING;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Draws the panel on stdout.
///
/// Regions cannot be redrawn in place on a plain terminal, so every update
/// prints a fresh block. While an answer is being generated a spinner holds
/// the last line and other output is printed above it.
pub struct Terminal {
    interactive: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl Terminal {
    /// `interactive` shows a `>` prompt whenever the trigger is enabled.
    pub fn new(interactive: bool) -> Self {
        Terminal {
            interactive,
            spinner: Mutex::new(None),
        }
    }

    fn print(&self, text: &str) {
        match self.spinner.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(pb) => pb.println(text),
                None => println!("{text}"),
            },
            Err(_) => println!("{text}"),
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn snapshot_block(view: &SnapshotView) -> String {
    match view {
        SnapshotView::Waiting => view.to_string().dimmed().to_string(),
        SnapshotView::Failed => view.to_string().red().to_string(),
        SnapshotView::Ready(x) => format!(
            "{} {}  {} {}\n{} {}\n{} {}  {} {}  {} {}",
            "Ativo:".bold(),
            x.symbol,
            "Período:".bold(),
            x.interval,
            "Último preço:".bold(),
            x.price,
            "EMA9:".bold(),
            x.ema9,
            "EMA21:".bold(),
            x.ema21,
            "RSI14:".bold(),
            x.rsi14,
        ),
    }
}

pub fn outcome_line(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Answered(text) => text.clone(),
        Outcome::Refused(text) => text.yellow().to_string(),
        Outcome::Empty | Outcome::Failed => outcome.text().red().to_string(),
    }
}

impl Surface for Terminal {
    fn snapshot(&self, view: &SnapshotView) {
        self.print(&snapshot_block(view));
    }

    fn result(&self, view: &ResultView) {
        let Ok(mut current) = self.spinner.lock() else {
            println!("{view}");
            return;
        };
        match view {
            ResultView::Generating => {
                if let Some(pb) = current.take() {
                    pb.finish_and_clear();
                }
                *current = Some(spinner(GENERATING));
            }
            ResultView::Settled(outcome) => {
                if let Some(pb) = current.take() {
                    pb.finish_and_clear();
                }
                println!("{}", outcome_line(outcome));
            }
        }
    }

    fn trigger(&self, state: TriggerState) {
        if self.interactive && state == TriggerState::Enabled {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
    }
}
