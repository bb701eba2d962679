use clap::Parser;
use size_snapshot::cli::{Cli, Commands};
use size_snapshot::cmd;
use std::process;

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Measure(args)) => cmd::cmd_measure(&args),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("size-snapshot v{}", env!("CARGO_PKG_VERSION"));
            println!("JavaScript bundle size tracker\n");
            println!("Usage: size-snapshot <COMMAND>\n");
            println!("Commands:");
            println!("  measure      Measure built files and write or verify the size snapshot");
            println!("  completions  Generate shell completions");
            println!("\nRun 'size-snapshot <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use size_snapshot::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
