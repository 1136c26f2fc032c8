//! `ddr-bel` command-line tool.
//!
//! Downloads the Data S4 archive, builds the disease association graph, and
//! prints its summary or exports it as node-link JSON, BEL, or Cypher.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ddr_bel::export::{self, ExportFormat};
use ddr_bel::{BuilderConfig, DataSource, Manager, TableLoader};

#[derive(Parser)]
#[command(name = "ddr-bel")]
#[command(about = "Disease-disease relationships as a BEL association graph", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the downloaded archive
    #[arg(long, env = "DDR_HOME", global = true)]
    data_dir: Option<PathBuf>,

    /// Read this archive instead of the one in the data directory
    #[arg(long, global = true)]
    archive: Option<PathBuf>,

    /// Largest s_AB still kept as an association
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, global = true)]
    min_separation: f64,

    /// Show a progress bar while building
    #[arg(long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the supplementary archive
    Download {
        /// Re-download even if the archive exists
        #[arg(long)]
        force: bool,
    },
    /// Print disease and association counts
    Summarize,
    /// Write the graph in an interchange format
    Export {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Bel,
    Cypher,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => ExportFormat::NodeLink,
            Format::Bel => ExportFormat::Bel,
            Format::Cypher => ExportFormat::Cypher,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ddr_bel=info,warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let source = DataSource::new(resolve_data_dir(cli.data_dir.clone())?);

    match &cli.command {
        Commands::Download { force } => {
            let path = source.ensure_downloaded(*force)?;
            println!("{}", path.display());
        }
        Commands::Summarize => {
            let manager = build(&cli, &source)?;
            println!("{}", manager.summarize());
        }
        Commands::Export { format, output } => {
            let manager = build(&cli, &source)?;
            let mut writer: Box<dyn Write> = match output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("creating {}", path.display()))?,
                )),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            export::export(manager.graph(), (*format).into(), &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// `--data-dir` / `DDR_HOME`, else `~/.bio2bel/ddr`.
fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let home = dirs::home_dir().context("cannot determine home directory; pass --data-dir")?;
    Ok(home.join(".bio2bel").join("ddr"))
}

fn build(cli: &Cli, source: &DataSource) -> Result<Manager> {
    let loader = TableLoader::default();
    let table = match &cli.archive {
        Some(path) => ddr_bel::source::load_archive(path, &loader)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            source.ensure_downloaded(false)?;
            source
                .open_table(&loader)
                .with_context(|| format!("reading {}", source.archive_path().display()))?
        }
    };
    info!(rows = table.len(), "table loaded");

    let config = BuilderConfig::default()
        .with_threshold(cli.min_separation)
        .with_progress(cli.progress);

    if !cli.progress {
        return Ok(Manager::from_table(&table, config));
    }

    let bar = ProgressBar::new(table.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("generating BEL {bar:40} {pos}/{len} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let manager = Manager::from_table_with_progress(&table, config, |_| bar.inc(1));
    bar.finish_and_clear();
    Ok(manager)
}
