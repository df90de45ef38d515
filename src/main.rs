use anyhow::Result;
use clap::Parser;
use fencepack::logger::{self, LogTarget};
use fencepack::{cli, workflow};

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    let log_target = match (&cli_args.log_file, cli_args.all) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Silent,
    };
    logger::initialize_logger(log_target)?;

    // Delegate the main application logic to the workflow module
    if !workflow::run_fencepack(cli_args)? {
        std::process::exit(1);
    }
    Ok(())
}
