use clap::Parser;
use rr_core::cli::{run, Cli};
use rr_core::logging::init_logging;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);
    run(cli).into()
}
