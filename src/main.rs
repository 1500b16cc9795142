use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cukemerge::cli::merge::MergeRun;
use cukemerge::cli::{self, Cli};
use cukemerge::{config, methods, report};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("cukemerge=debug")
    } else if cli.quiet {
        EnvFilter::new("cukemerge=error")
    } else {
        EnvFilter::new("cukemerge=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    info!("cukemerge v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        cli::Commands::Merge(args) => {
            let run = MergeRun::new(args)?;
            let merged = run.run()?;

            // Output the report
            match run.format.as_str() {
                "json" => {
                    if let Some(ref path) = args.out {
                        report::json::write(&merged, path)?;
                        info!("Report written to {}", path.display());
                    } else {
                        println!("{}", report::json::render(&merged)?);
                    }
                }
                _ => {
                    report::terminal::render(&merged);
                    if let Some(ref path) = args.out {
                        report::json::write(&merged, path)?;
                        info!("JSON report also written to {}", path.display());
                    }
                }
            }

            // Exit code based on merged outcome
            if args.fail_on_failed && merged.has_failures() {
                std::process::exit(1);
            }
        }
        cli::Commands::Init => {
            config::init_config()?;
        }
        cli::Commands::ListMethods => {
            methods::list_methods();
        }
    }

    Ok(())
}
