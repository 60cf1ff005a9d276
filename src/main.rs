use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use photo_booth::{
    booth::{BoothEngine, DirectorySink, LogPresenter, StillImageSource},
    config::Config,
    filter::FilterKind,
};

#[derive(Parser)]
#[command(
    name = "photo-booth",
    version,
    about = "Countdown photo booth with classic color filters",
    long_about = "Photo-Booth counts down, captures a frame, applies the selected color filter, and stores the result as a lossless PNG. A still image stands in for the live camera."
)]
struct Cli {
    /// Input image serving as the camera frame (PNG, JPEG)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory where the captured photo is stored
    #[arg(short, long, default_value = "photos")]
    output: PathBuf,

    /// Filter to apply (none, grayscale, sepia, negative)
    #[arg(short, long, default_value = "none")]
    filter: String,

    /// Countdown start value (overrides the config file)
    #[arg(long)]
    count: Option<u32>,

    /// Countdown tick interval in milliseconds (overrides the config file)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Photo-Booth v{}", env!("CARGO_PKG_VERSION"));
    info!("Input: {:?}", cli.input);
    info!("Output: {:?}", cli.output);
    info!("Filter: {}", cli.filter);

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(count) = cli.count {
        config.capture.start_count = count;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.capture.tick_interval_ms = interval_ms;
    }
    config.output.directory = cli.output.clone();
    config.validate()?;

    let filter: FilterKind = cli.filter.parse()?;

    // Wire the collaborators and run one capture
    let source = StillImageSource::open(&cli.input)?;
    let sink = DirectorySink::new(config.output.directory.clone());
    let mut engine = BoothEngine::new(
        config,
        Box::new(source),
        Box::new(sink),
        Box::new(LogPresenter),
    );
    engine.select_filter(filter);

    engine.run_capture().await?;

    info!("Photo booth session complete!");
    Ok(())
}
