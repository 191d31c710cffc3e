use bundle_compare::cli::{Cli, Commands};
use bundle_compare::cmd;
use clap::Parser;
use std::process;

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Some(Commands::Measure(args)) => cmd::cmd_measure(config, args),
        Some(Commands::Chart(args)) => cmd::cmd_chart(config, args),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("bundle-compare v{}", env!("CARGO_PKG_VERSION"));
            println!("Production JavaScript payload comparison\n");
            println!("Usage: bundle-compare <COMMAND>\n");
            println!("Commands:");
            println!("  measure      Build and measure every application, then write the report");
            println!("  chart        Render the persisted report as an SVG bar chart");
            println!("  completions  Generate shell completions");
            println!("\nRun 'bundle-compare <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use bundle_compare::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
