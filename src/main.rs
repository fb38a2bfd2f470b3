use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::sync::{mpsc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_cards::page::default_document;
use weather_cards::{ViewportSwitcher, WeatherConfig, WeatherPage};

/// Render the forecast page and print it as HTML
#[derive(Debug, Parser)]
#[command(name = "weather-cards", version, about, long_about = None)]
struct Cli {
    /// JSON config file (base_url, latitude, longitude, timezone)
    #[arg(short, long, env = "WEATHER_CARDS_CONFIG")]
    config: Option<PathBuf>,

    /// Window width at load time
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Window widths delivered as resize events after load, e.g. 320,1280
    #[arg(long, value_delimiter = ',')]
    resize: Vec<u32>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "weather_cards=info",
        1 => "weather_cards=debug",
        _ => "weather_cards=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WeatherConfig::load(cli.config.as_deref())?;
    tracing::info!(
        "Loading forecast for {}, {} ({})",
        config.latitude,
        config.longitude,
        config.timezone
    );

    let page = WeatherPage::from_config(config)?;
    let switcher = ViewportSwitcher::new()?;
    let document = Mutex::new(default_document());

    let (resizes, resize_events) = mpsc::unbounded_channel();
    for width in cli.resize {
        resizes.send(width)?;
    }
    drop(resizes);

    let (report, mode) = tokio::join!(
        page.load(&document),
        switcher.run(&document, cli.width, resize_events)
    );
    tracing::debug!(?mode, ?report, "Page load finished");

    println!("{}", document.into_inner().to_html());
    Ok(())
}
