use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use nba_game_viewer::config::{Config, OutputFormat};
use nba_game_viewer::render::html::PageChange;
use nba_game_viewer::render::{HtmlRenderer, Renderer, TerminalRenderer};
use nba_game_viewer::{Controller, DateNavigator, HttpGameSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    Refresh,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Some(Command::Next),
            "p" | "prev" | "previous" => Some(Command::Previous),
            "r" | "refresh" => Some(Command::Refresh),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    init_logging(config.json_logs);
    info!(endpoint = %config.endpoint, start = %config.start_date, timezone = %config.timezone, "Starting game viewer");

    let source = Arc::new(HttpGameSource::new(config.endpoint.clone(), config.timeout()));
    match config.format {
        OutputFormat::Text => {
            let renderer = Arc::new(TerminalRenderer::new(std::io::stdout(), config.detailed));
            run(&config, source, renderer).await
        }
        OutputFormat::Html => {
            let renderer = Arc::new(HtmlRenderer::with_listener(|page, change| match change {
                PageChange::Date => println!("<!-- date: {} -->", page.date_label),
                PageChange::Loading => {
                    println!("<!-- loader display: {} -->", if page.loading { "flex" } else { "none" })
                }
                PageChange::Games => println!("{}", page.games_html),
            }));
            run(&config, source, renderer).await
        }
    }
}

async fn run<R: Renderer + 'static>(
    config: &Config,
    source: Arc<HttpGameSource>,
    renderer: Arc<R>,
) -> Result<(), Box<dyn Error>> {
    let controller = Arc::new(Controller::new(
        DateNavigator::new(config.start_date),
        source,
        renderer,
        config.timezone,
    ));

    if config.once {
        let outcome = controller.start().await;
        info!(?outcome, "Single load finished");
        return Ok(());
    }

    // Loads run in their own tasks so a slow response never blocks navigation.
    let initial = Arc::clone(&controller);
    tokio::spawn(async move { initial.start().await });

    eprintln!("Commands: n(ext), p(rev), r(efresh), q(uit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                warn!(input = %line.trim(), "Unknown command");
            }
            continue;
        };
        let controller = Arc::clone(&controller);
        match command {
            Command::Next => drop(tokio::spawn(async move { controller.next().await })),
            Command::Previous => drop(tokio::spawn(async move { controller.previous().await })),
            Command::Refresh => drop(tokio::spawn(async move { controller.refresh().await })),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let result = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
