use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;
use clap::{Parser, Subcommand, ValueEnum};
use anyhow::{Result, Context};
use log::{debug, error};
use simple_logger::SimpleLogger;

use teamcity_progress::core::config::ReporterConfig;
use teamcity_progress::core::message::escape;
use teamcity_progress::core::runner::EventReplay;
use teamcity_progress::core::sink::{Sink, StdoutSink, WriterSink};
use teamcity_progress::reporters::{Reporter, teamcity::TeamCityReporter, text::TextReporter};


#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Teamcity)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging and text output
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors; text output prints just the summary
    #[arg(short, long)]
    quiet: bool,

    /// Reporter configuration (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored text output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}


#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// TeamCity service messages
    Teamcity,
    /// Plain text for a terminal
    Text,
}


#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines harness event log through a reporter
    Replay {
        /// Event log path, `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },

    /// Print a value escaped for a service message attribute
    Escape {
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };

    SimpleLogger::new()
        .with_level(log_level)
        .init()
        .context("Failed to initialize logger")?;

    debug!("teamcity-progress v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(2);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Replay { input } => {
            let config = match &cli.config {
                Some(path) => ReporterConfig::from_file(path).context("Failed to load config")?,
                None => ReporterConfig::default(),
            };
            replay(cli, input, config)
        }
        Commands::Escape { value } => {
            println!("{}", escape(value));
            Ok(())
        }
    }
}

fn replay(cli: &Cli, input: &str, config: ReporterConfig) -> Result<()> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(input)
            .with_context(|| format!("Failed to open event log {}", input))?;
        Box::new(BufReader::new(file))
    };

    let sink: Box<dyn Sink> = match &cli.output {
        Some(path) => Box::new(
            WriterSink::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(StdoutSink),
    };

    let color = config.color && !cli.no_color;
    let mut reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Teamcity => Box::new(TeamCityReporter::with_config(sink, config)),
        OutputFormat::Text => {
            Box::new(TextReporter::new(sink, cli.verbose, cli.quiet).with_color(color))
        }
    };

    EventReplay::new(reporter.as_mut())
        .replay(reader)
        .context("Failed to read event log")?;

    Ok(())
}
