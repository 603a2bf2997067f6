use anyhow::{Context, Result, bail};
use clap::Parser;
use classy_weather::sequencer::FetchSequencer;
use classy_weather::{AppConfig, WeatherApiClient, WeatherSource, Widget, logging, view};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

const EXIT_COMMAND: &str = "exit";

/// Classy weather lookup for your terminal
#[derive(Debug, Parser)]
#[command(name = "classy-weather", version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Fetch once, print the forecast and exit
    #[arg(long)]
    once: bool,

    /// Place to look up first (defaults to the configured location)
    location: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from_path(cli.config.clone())
        .with_context(|| "Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    debug!(
        "Using geocoding {} and forecast {}",
        config.services.geocoding_url, config.services.forecast_url
    );

    let client = WeatherApiClient::new(&config.services)?;
    let source: Arc<dyn WeatherSource> = Arc::new(client);
    let initial_query = cli
        .location
        .unwrap_or_else(|| config.defaults.location.clone());

    if cli.once {
        run_once(source.as_ref(), initial_query).await
    } else {
        run_interactive(source, initial_query).await
    }
}

async fn run_once(source: &dyn WeatherSource, query: String) -> Result<()> {
    let mut widget = Widget::new(query);
    widget.fetch_now(source).await;
    print!("{}", view::render(widget.state()));

    if let Some(error) = &widget.state().error {
        bail!("{error}");
    }
    Ok(())
}

/// Event loop: stdin lines are input events, fetch outcomes arrive on a
/// channel. Only this loop touches the widget.
async fn run_interactive(source: Arc<dyn WeatherSource>, query: String) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sequencer = FetchSequencer::new(source, tx);
    let mut widget = Widget::new(query);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    sequencer.start(widget.trigger());
    redraw(&widget)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.with_context(|| "Failed to read input")? else {
                    break;
                };
                let input = line.trim();
                if input == EXIT_COMMAND {
                    break;
                }

                let request = if input.is_empty() {
                    Some(widget.trigger())
                } else {
                    widget.set_query(input)
                };
                if let Some(request) = request {
                    sequencer.start(request);
                }
                redraw(&widget)?;
            }
            Some(outcome) = rx.recv() => {
                if widget.apply(outcome) {
                    redraw(&widget)?;
                }
            }
        }
    }

    info!("Goodbye");
    Ok(())
}

fn redraw(widget: &Widget) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout)?;
    write!(stdout, "{}", view::render(widget.state()))?;
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
