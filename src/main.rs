use usagemon::cli::{parse_args, run_cli_command, USAGE};

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    run_cli_command(command)
}
