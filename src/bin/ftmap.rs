//! ftmap - Family Tree DNA project frequencies CLI
//!
//! Command-line interface for per-country project participation rates.

use clap::{Args, Parser, Subcommand, ValueEnum};
use familytreemap::data::{Roster, RosterOptions, TotalsTable};
use familytreemap::error::Result;
use familytreemap::pipeline::{Pipeline, PipelineConfig, PipelineOutput, ScaleMode};
use familytreemap::report::{frequencies_to_csv, tally_to_csv, totals_to_csv};
use familytreemap::tally::CountryTally;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// CLI-friendly scale mode enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliScaleMode {
    /// Number of project members per country
    Absolute,
    /// Percent of all testers from the country
    Relative,
    /// log2(count + 1), for display
    Log,
}

impl From<CliScaleMode> for ScaleMode {
    fn from(mode: CliScaleMode) -> Self {
        match mode {
            CliScaleMode::Absolute => ScaleMode::Absolute,
            CliScaleMode::Relative => ScaleMode::Relative,
            CliScaleMode::Log => ScaleMode::Log,
        }
    }
}

/// Relative country frequencies for Family Tree DNA projects
#[derive(Parser)]
#[command(name = "ftmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options for reading the project table.
#[derive(Args)]
struct ProjectArgs {
    /// Path to the project table (CSV)
    #[arg(short, long)]
    input: PathBuf,

    /// 0-based column that holds the country names
    #[arg(long, default_value = "2")]
    column: usize,

    /// The project table has no header row
    #[arg(long)]
    no_header: bool,
}

impl ProjectArgs {
    fn load(&self) -> Result<Roster> {
        let roster = Roster::from_csv(
            &self.input,
            RosterOptions {
                country_column: self.column,
                has_header: !self.no_header,
            },
        )?;
        info!(
            "Loaded {} participants ({} rows without a country)",
            roster.len(),
            roster.n_dropped()
        );
        Ok(roster)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-country frequencies for a project
    Run {
        #[command(flatten)]
        project: ProjectArgs,

        /// Output path for the frequencies CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Number of testers per country (CSV or JSON)
        #[arg(short, long)]
        totals: Option<PathBuf>,

        /// Add England, Wales, Scotland and Northern Ireland to United Kingdom
        #[arg(long)]
        sum_uk: bool,

        /// How values are expressed
        #[arg(long, value_enum, default_value = "relative")]
        scale: CliScaleMode,

        /// Only count countries with a known number of testers
        #[arg(long)]
        known_only: bool,

        /// Output path for the statistics report (skipped if absent)
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Run a pipeline from a YAML configuration file
    Pipeline {
        /// Path to pipeline configuration YAML
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        project: ProjectArgs,

        /// Output path for the frequencies CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Number of testers per country (CSV or JSON)
        #[arg(short, long)]
        totals: Option<PathBuf>,

        /// Output path for the statistics report
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Count project members per country
    Count {
        #[command(flatten)]
        project: ProjectArgs,

        /// Output path for the counts CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate an example pipeline configuration
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "pipeline.yaml")]
        output: PathBuf,

        /// Also write the example totals table here
        #[arg(long)]
        totals: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            project,
            output,
            totals,
            sum_uk,
            scale,
            known_only,
            stats,
        } => cmd_run(
            &project,
            &output,
            totals.as_deref(),
            sum_uk,
            scale.into(),
            known_only,
            stats.as_deref(),
        ),
        Commands::Pipeline {
            config,
            project,
            output,
            totals,
            stats,
        } => cmd_pipeline(&config, &project, &output, totals.as_deref(), stats.as_deref()),
        Commands::Count { project, output } => cmd_count(&project, &output),
        Commands::Example { output, totals } => cmd_example(&output, totals.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load totals, falling back to the example table when they are needed
/// but no file was given.
fn load_totals(path: Option<&Path>, needed: bool) -> Result<TotalsTable> {
    match path {
        Some(path) => {
            let totals = TotalsTable::from_path(path)?;
            info!("Loaded totals for {} countries", totals.len());
            Ok(totals)
        }
        None if needed => {
            warn!(
                "No totals given; provide the number of testers per country with --totals. \
                 Using example data instead."
            );
            Ok(TotalsTable::example())
        }
        None => Ok(TotalsTable::default()),
    }
}

fn write_outputs(output: &PipelineOutput, output_path: &Path, stats_path: Option<&Path>) -> Result<()> {
    info!("Writing {} countries to {:?}...", output.frequencies.len(), output_path);
    frequencies_to_csv(output_path, &output.frequencies)?;

    if let (Some(path), Some(report)) = (stats_path, &output.stats) {
        info!("Writing statistics to {:?}...", path);
        report.to_csv(path)?;

        let unreliable = report.unreliable();
        if !unreliable.is_empty() {
            info!(
                "  {} of {} countries below the acceptable sample size",
                unreliable.len(),
                report.len()
            );
        }
    }
    Ok(())
}

/// Compute frequencies with command-line options
fn cmd_run(
    project: &ProjectArgs,
    output_path: &Path,
    totals_path: Option<&Path>,
    sum_uk: bool,
    scale: ScaleMode,
    known_only: bool,
    stats_path: Option<&Path>,
) -> Result<()> {
    let needs_totals = scale.needs_totals() || known_only || stats_path.is_some();
    let totals = load_totals(totals_path, needs_totals)?;
    let roster = project.load()?;

    let mut pipeline = Pipeline::new().name("ftmap");
    if known_only {
        pipeline = pipeline.restrict_to_totals();
    }
    if sum_uk {
        pipeline = pipeline.merge_uk();
    }
    pipeline = pipeline.scale(scale);
    if stats_path.is_some() {
        pipeline = pipeline.with_stats();
    }

    info!("Running with {:?} scaling...", scale);
    let output = pipeline.run(&roster, &totals)?;
    write_outputs(&output, output_path, stats_path)?;

    info!("Done!");
    Ok(())
}

/// Run a pipeline from configuration
fn cmd_pipeline(
    config_path: &Path,
    project: &ProjectArgs,
    output_path: &Path,
    totals_path: Option<&Path>,
    stats_path: Option<&Path>,
) -> Result<()> {
    info!("Loading pipeline configuration from {:?}...", config_path);
    let config_str = std::fs::read_to_string(config_path)?;
    let config = PipelineConfig::from_yaml(&config_str)?;

    if config.stats && stats_path.is_none() {
        warn!("Pipeline builds statistics but no --stats path was given; skipping report");
    }
    let pipeline = Pipeline::from_config(&config).stats(stats_path.is_some());
    let totals = load_totals(totals_path, pipeline.needs_totals())?;
    let roster = project.load()?;

    info!("Running pipeline '{}'...", config.name);
    let output = pipeline.run(&roster, &totals)?;

    write_outputs(&output, output_path, stats_path)?;

    info!("Done!");
    Ok(())
}

/// Count project members per country
fn cmd_count(project: &ProjectArgs, output_path: &Path) -> Result<()> {
    let roster = project.load()?;
    let tally = CountryTally::from_roster(&roster);

    info!("Writing {} countries to {:?}...", tally.len(), output_path);
    tally_to_csv(output_path, &tally)?;
    Ok(())
}

/// Generate example configuration
fn cmd_example(output_path: &Path, totals_path: Option<&Path>) -> Result<()> {
    let pipeline = Pipeline::new()
        .name("uk-relative")
        .restrict_to_totals()
        .merge_uk()
        .scale(ScaleMode::Relative)
        .with_stats();
    let config = pipeline.to_config(Some(
        "Relative frequencies with UK regions merged, plus sampling statistics",
    ));
    std::fs::write(output_path, config.to_yaml()?)?;
    info!("Wrote example pipeline to {:?}", output_path);

    if let Some(path) = totals_path {
        totals_to_csv(path, &TotalsTable::example())?;
        info!("Wrote example totals to {:?}", path);
    }
    Ok(())
}
