use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*};
use log::LevelFilter;
use snapdesk_client::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use terminal::Terminal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

mod cli;
mod terminal;

fn preprocess(level: LevelFilter) {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.log_level.into());
    log::trace!("Command line input recorded: {cli:#?}");

    let mut config = PanelConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config.set_base_url(url)?;
    }
    if let Some(ms) = cli.interval_ms {
        config.poll_every = Duration::from_millis(ms);
    }
    let endpoints = config.endpoints()?;
    let client = build_client(&config.user_agent)?;

    // cli framework:
    // "> snapdesk <COMMAND>"
    match &cli.command {
        // "> snapdesk watch"
        // refresh the snapshot until interrupted
        Watch => {
            let terminal = Arc::new(Terminal::new(false));
            let poller = Poller::new(client, &endpoints, config.poll_every, terminal);
            tokio::select! {
                _ = poller.run() => {}
                _ = tokio::signal::ctrl_c() => log::info!("interrupted"),
            }
        }

        // "> snapdesk ask <QUESTION>..."
        // one question, one answer
        Ask { question } => {
            let terminal = Arc::new(Terminal::new(false));
            let submitter = Submitter::new(client, &endpoints, terminal);
            submitter.submit(&question.join(" ")).await;
        }

        // "> snapdesk panel"
        // snapshot refreshes in the background, questions from stdin
        Panel => {
            let terminal = Arc::new(Terminal::new(true));
            panel(client, &endpoints, config.poll_every, terminal).await?;
        }
    }

    Ok(())
}

async fn panel(
    client: Client,
    endpoints: &Endpoints,
    every: Duration,
    terminal: Arc<Terminal>,
) -> Result<()> {
    let poller = tokio::spawn(Poller::new(client.clone(), endpoints, every, terminal.clone()).run());
    let submitter = Submitter::new(client, endpoints, terminal.clone());
    terminal.trigger(submitter.trigger_state());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    in_flight.retain(|task| !task.is_finished());
                    let submitter = submitter.clone();
                    in_flight.push(tokio::spawn(async move {
                        if submitter.submit(&line).await.is_none() {
                            log::warn!("still waiting for the previous answer; question dropped");
                        }
                    }));
                }

                // stdin closed: let pending answers arrive before leaving
                None => {
                    settle(in_flight.drain(..)).await;
                    break;
                }
            },

            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupted");
                break;
            }
        }
    }

    poller.abort();
    Ok(())
}

/// Waits for every task, logging the ones that panicked or were cancelled.
/// Returns how many ended that way.
async fn settle(tasks: impl IntoIterator<Item = JoinHandle<()>>) -> usize {
    let mut abnormal = 0;
    for task in tasks {
        if let Err(e) = task.await {
            log::error!("question task ended abnormally: {e}");
            abnormal += 1;
        }
    }
    abnormal
}
