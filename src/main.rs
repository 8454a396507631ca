use clap::Parser;
use std::process;
use vars_validate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    match vars_validate::run_command(&cli) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
