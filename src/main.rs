use anyhow::{Context, Result};
use clap::Parser;
use eventcard::config::OutputFormat;
use eventcard::{CardRenderer, CardSize, Config, output};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eventcard")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EVENTCARD_GIT_HASH"), ")"),
    about = "Render social media cards for events"
)]
struct Cli {
    /// JSON file with one event object or an array of events
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory the cards are written to (default from config)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<String>,

    /// Card size as WIDTHxHEIGHT; repeat for several sizes
    #[arg(long = "size", short = 's', value_name = "WxH", value_parser = parse_size)]
    sizes: Vec<CardSize>,

    /// Output encoding: png or jpg (default from config)
    #[arg(long, short = 'f', value_name = "FORMAT", value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Config file (default ~/.config/eventcard/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn parse_size(s: &str) -> Result<CardSize, String> {
    s.parse().map_err(|e: eventcard::CardError| e.to_string())
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_extension(s).ok_or_else(|| format!("unknown format '{s}' (expected png or jpg)"))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    let sizes = if cli.sizes.is_empty() {
        config
            .output
            .sizes
            .iter()
            .map(|s| s.parse::<CardSize>())
            .collect::<eventcard::Result<Vec<_>>>()
            .context("Invalid size in [output] sizes")?
    } else {
        cli.sizes
    };

    let events = eventcard::load_events(&cli.input)
        .with_context(|| format!("Failed to load events from {}", cli.input.display()))?;
    if events.is_empty() {
        log::warn!("No events found in {}", cli.input.display());
        return Ok(());
    }

    let directory = output::expand_tilde(&config.output.directory);
    let directory = output::ensure_directory_exists(&directory)?;
    let extension = config.output.format.extension();

    let renderer = CardRenderer::new(config)?;

    for (index, event) in events.iter().enumerate() {
        for &size in &sizes {
            let format = renderer.format_for(size);
            let path = directory.join(output::card_filename(format, index, size, extension));
            renderer
                .render_to_file(event, size, &path)
                .with_context(|| format!("Failed to render card for '{}' at {}", event.title, size))?;
            println!("Saved card at {}", path.display());
        }
    }

    Ok(())
}
