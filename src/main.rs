use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use real_trends_report::io::fetch::HttpTableSource;
use real_trends_report::model::DataSubset;
use real_trends_report::{ReportConfig, ReportError, Result, report};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Report(args) => execute_report(args),
        Command::Urls(args) => {
            let config = args.resolve()?;
            for url in report::planned_locators(&config) {
                println!("{url}");
            }
            Ok(())
        }
    }
}

fn execute_report(args: ConfigArgs) -> Result<()> {
    let config = args.resolve()?;
    let source = HttpTableSource::new(&config)?;
    let today = chrono::Local::now().date_naive();
    let path = report::run_report(&source, &config, today)?;
    println!("{}", path.display());
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge and re-rank real-estate agent rankings into one workbook."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch every configured table and write the ranked workbook.
    Report(ConfigArgs),
    /// Print the table URLs a report run would fetch.
    Urls(ConfigArgs),
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// State slug to report on, e.g. `north-carolina`. Repeatable.
    #[arg(long = "state")]
    states: Vec<String>,

    /// Report on every state the site publishes.
    #[arg(long, conflicts_with = "states")]
    all_states: bool,

    /// Data subset to report on. Repeatable.
    #[arg(long = "subset", value_enum)]
    subsets: Vec<SubsetKind>,

    /// Directory the workbook is written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl ConfigArgs {
    fn resolve(self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };

        if self.all_states {
            config = config.with_all_states();
        } else if !self.states.is_empty() {
            config.states = self.states;
        }
        if !self.subsets.is_empty() {
            config.subsets = self.subsets.into_iter().map(DataSubset::from).collect();
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SubsetKind {
    Individuals,
    TeamsSmall,
    TeamsMedium,
    TeamsLarge,
    TeamsMega,
}

impl From<SubsetKind> for DataSubset {
    fn from(kind: SubsetKind) -> Self {
        match kind {
            SubsetKind::Individuals => DataSubset::Individuals,
            SubsetKind::TeamsSmall => DataSubset::TeamsSmall,
            SubsetKind::TeamsMedium => DataSubset::TeamsMedium,
            SubsetKind::TeamsLarge => DataSubset::TeamsLarge,
            SubsetKind::TeamsMega => DataSubset::TeamsMega,
        }
    }
}
