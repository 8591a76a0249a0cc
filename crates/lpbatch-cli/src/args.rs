use std::path::PathBuf;

use clap::Parser;
use lpbatch_harness::{DEFAULT_INPUT, DEFAULT_THREADS, Mode, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "lpbatch", version)]
#[command(about = "Solve a batch of LP problems in parallel or serial mode", long_about = None)]
pub struct HarnessArgs {
    /// Solve on a worker pool (default)
    #[arg(long, conflicts_with = "serial")]
    pub parallel: bool,
    /// Solve problems one after another
    #[arg(long)]
    pub serial: bool,
    /// Worker threads for parallel mode
    #[arg(long, value_name = "N", default_value_t = DEFAULT_THREADS, value_parser = parse_threads)]
    pub threads: usize,
    /// JSON batch file to solve
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub file: PathBuf,
    /// Directory the answer file is appended to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
    /// Log dispatch and per-problem details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl HarnessArgs {
    pub fn mode(&self) -> Mode {
        if self.serial {
            Mode::Serial
        } else {
            Mode::Parallel {
                threads: self.threads,
            }
        }
    }

    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            input: self.file.clone(),
            out_dir: self.out_dir.clone(),
            mode: self.mode(),
        }
    }
}

fn parse_threads(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Parser, Debug)]
#[command(name = "lpgen", version)]
#[command(about = "Generate a random batch of LP problems", long_about = None)]
pub struct GenerateArgs {
    /// Number of problems to generate
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,
    /// Output JSON file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub output: PathBuf,
    /// Seed for a reproducible batch
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(short, long)]
    pub verbose: bool,
}
