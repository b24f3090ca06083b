use std::{fs::File, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use log::debug;
use serde::{Deserialize, Serialize};

mod error;
pub use error::ParserError;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name = "ancestral-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// ancestral-rs: ancestor synthesis + Li-Stephens threading over a
/// haplotype panel.
pub struct Cli {
    /// Set the verbosity level (-v -vv -vvv).
    ///
    /// -v: Info | -vv: Debug | -vvv: Trace. Warnings are emitted by default
    /// even without this flag; use --quiet to suppress them.
    #[clap(short = 'v', long, parse(from_occurrences), global = true)]
    pub verbose: u8,

    /// Disable warnings; only errors are displayed.
    #[clap(short = 'q', long, global = true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Serialize command line arguments to a `.yaml` file under
    /// `--output-dir`, named `{current time}-{subcommand}.yaml`.
    pub fn serialize(&self) -> Result<(), ParserError> {
        let serialized = serde_yaml::to_string(&self)?;
        debug!("\n---- Command line args ----\n{serialized}\n---");

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S");
        let output_file = match &self.commands {
            Commands::BuildAncestors { common, .. } => {
                format!("{}/{current_time}-build-ancestors.yaml", common.output_dir.display())
            }
            Commands::Thread { common, .. } => {
                format!("{}/{current_time}-thread.yaml", common.output_dir.display())
            }
            Commands::FromYaml { .. } => return Ok(()),
        };

        std::fs::write(&output_file, serialized)
            .map_err(|source| ParserError::Write { path: output_file, source })
    }

    /// Deserialize a previously-serialized `.yaml` file back into `Self`,
    /// letting a run be reproduced exactly.
    pub fn deserialize(yaml: &PathBuf) -> Result<Self, ParserError> {
        let file = File::open(yaml)
            .map_err(|source| ParserError::Read { path: yaml.display().to_string(), source })?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Synthesize ancestral haplotypes from a genotype matrix grouped by
    /// derived-allele frequency.
    BuildAncestors {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        build: BuildAncestorsArgs,
    },
    /// Thread a query haplotype through a prefix of a reference panel under
    /// the Li-Stephens model.
    Thread {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        thread: ThreadArgs,
    },
    /// Re-run a previously serialized `.yaml` configuration.
    FromYaml { yaml: PathBuf },
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub struct Common {
    /// Directory where output files (and the serialized `.yaml` echo of
    /// this invocation) are written.
    #[clap(short, long, default_value = "ancestral-rs-output")]
    pub output_dir: PathBuf,

    /// Overwrite existing output files.
    #[clap(short = 'w', long)]
    pub overwrite: bool,
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub struct BuildAncestorsArgs {
    /// Whitespace-separated genotype matrix: one line per site, columns
    /// `site_id frequency genotype_0 .. genotype_{num_samples-1}`.
    #[clap(short, long)]
    pub genotypes: PathBuf,

    /// Number of samples (columns) in `--genotypes`.
    #[clap(short = 'n', long)]
    pub num_samples: u32,

    /// File to write synthesized ancestors to, one per line, as
    /// `start end allele_0 .. allele_{num_sites-1}`.
    #[clap(short, long)]
    pub out: PathBuf,
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub struct ThreadArgs {
    /// Whitespace-separated haplotype matrix: one line per haplotype, each
    /// line `num_sites` alleles wide.
    #[clap(short, long)]
    pub panel: PathBuf,

    /// File of `num_sites` real-valued site positions, one per line.
    #[clap(short = 's', long)]
    pub positions: PathBuf,

    /// Total length of the modeled segment.
    #[clap(short = 'L', long)]
    pub sequence_length: f64,

    /// Index of the panel row to thread as the query.
    #[clap(short = 'i', long)]
    pub haplotype_index: u32,

    /// Size of the copying-source prefix of the panel.
    #[clap(short = 'k', long)]
    pub panel_size: u32,

    /// Per-unit-distance recombination rate.
    #[clap(short = 'r', long, default_value = "1e-8")]
    pub recombination_rate: f64,

    /// Per-site error probability.
    #[clap(short = 'e', long, default_value = "1e-8")]
    pub error_probability: f64,

    /// File to write the copying path and mutation list to.
    #[clap(short, long)]
    pub out: PathBuf,
}
