use anyhow::{Context, Result};
use clap::Parser;
use lpbatch_cli::args::HarnessArgs;
use lpbatch_cli::logging::init_tracing;

fn main() -> Result<()> {
    let args = HarnessArgs::parse();
    init_tracing(args.verbose);

    let config = args.to_config();
    let stats = lpbatch_harness::run(&config)
        .with_context(|| format!("batch run over {} failed", config.input.display()))?;

    lpbatch_harness::print_report(&stats, config.mode);
    Ok(())
}
