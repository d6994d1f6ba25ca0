use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use mitsuke_core::{Binary, Family, FormatTag, MapLimits};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{Table, Tabled};

/// Identify binary formats from their headers
#[derive(Parser)]
#[command(
    name = "mitsuke",
    about = "Identify object files, executables, archives, Office documents and git packs",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one or more files
    Identify {
        /// Paths to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Reject files shorter than this many bytes
        #[arg(long, default_value_t = 0)]
        min_bytes: u64,

        /// Only map this many leading bytes of each file
        #[arg(long)]
        max_bytes: Option<u64>,
    },
    /// List every format tag the classifier can report
    Tags,
}

#[derive(Serialize, Tabled)]
struct Row {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Description")]
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tabled(skip)]
    error: Option<String>,
}

impl Row {
    fn from_binary(bin: &Binary) -> Self {
        Row {
            path: bin.path.clone(),
            tag: bin.format.tag.to_string(),
            family: bin.format.tag.family().to_string(),
            label: bin.format.label.clone(),
            error: None,
        }
    }

    fn from_error(path: &std::path::Path, err: &anyhow::Error) -> Self {
        Row {
            path: path.display().to_string(),
            tag: FormatTag::None.to_string(),
            family: Family::Unknown.to_string(),
            label: format!("error: {err:#}"),
            error: Some(format!("{err:#}")),
        }
    }

    fn colorize(mut self) -> Self {
        self.tag = if self.error.is_some() {
            self.tag.red().to_string()
        } else if self.tag == FormatTag::None.name() {
            self.tag.dimmed().to_string()
        } else {
            self.tag.green().bold().to_string()
        };
        self
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Identify {
            paths,
            json,
            min_bytes,
            max_bytes,
        } => {
            let limits = MapLimits {
                min_len: min_bytes,
                max_len: max_bytes,
            };

            let rows: Vec<Row> = paths
                .iter()
                .map(|path| match Binary::open_with(path, limits) {
                    Ok(bin) => Row::from_binary(&bin),
                    Err(err) => {
                        log::error!("{}: {err:#}", path.display());
                        Row::from_error(path, &err)
                    }
                })
                .collect();
            let failed = rows.iter().filter(|row| row.error.is_some()).count();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                let rows: Vec<Row> = rows.into_iter().map(Row::colorize).collect();
                println!("{}", Table::new(rows));
            }

            if failed > 0 {
                anyhow::bail!("{failed} of {} paths could not be read", paths.len());
            }
        }

        Command::Tags => {
            println!("{:<32} {:<12} {}", "Tag", "Family", "Description");
            println!("{}", "-".repeat(80));
            for tag in FormatTag::ALL {
                println!(
                    "{:<32} {:<12} {}",
                    tag.name(),
                    tag.family().to_string(),
                    tag.description()
                );
            }
        }
    }

    Ok(())
}
