use clap::Parser;
use tracing_subscriber::EnvFilter;

use snpeff_wrapper::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on debug/verbosity flags
    let filter = if cli.debug {
        EnvFilter::new("snpeff_wrapper=debug,info")
    } else if cli.verbose {
        EnvFilter::new("snpeff_wrapper=info")
    } else {
        EnvFilter::new("snpeff_wrapper=warn")
    };

    // stdout may carry the annotated VCF, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    cli::run(cli)
}
