use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "evmerge",
    about = "Merge timestamp-ordered partitions of an event store into one ordered index",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate random workloads, merge them, and verify the result
    Run(RunArgs),
    /// Write a random workload to a JSON file
    Generate(GenerateArgs),
    /// Merge a workload file into an ordered index sequence
    Merge(MergeArgs),
    /// Check an index sequence against a workload file
    Verify(VerifyArgs),
}

/// Workload shape overrides shared by `run` and `generate`.
#[derive(Args, Default)]
pub struct WorkloadArgs {
    /// TOML harness config; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub max_partitions: Option<usize>,
    #[arg(long)]
    pub max_extra_events: Option<usize>,
    #[arg(long)]
    pub max_increment: Option<u32>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,
    /// Enable overlap and sortedness checks
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct MergeArgs {
    #[arg(short, long)]
    pub input: PathBuf,
    /// Write indices here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[arg(short, long)]
    pub input: PathBuf,
    #[arg(long)]
    pub indices: PathBuf,
}
