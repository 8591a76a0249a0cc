use anyhow::{Context, Result};
use clap::Parser;
use lpbatch_cli::args::GenerateArgs;
use lpbatch_cli::logging::init_tracing;
use lpbatch_harness::generate::{generate_problems, write_problems};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<()> {
    let args = GenerateArgs::parse();
    init_tracing(args.verbose);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let problems = generate_problems(args.count, &mut rng);
    write_problems(&args.output, &problems)
        .with_context(|| format!("writing {}", args.output.display()))?;

    tracing::debug!(count = problems.len(), "generated batch");
    println!("Generated {} LP problems", problems.len());
    println!("Saved to {}", args.output.display());
    Ok(())
}
