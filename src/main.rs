use clap::Parser;

use svg_align::cli::{Cli, Commands};
use svg_align::commands::{run_check, run_init, run_rules};
use svg_align::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Init(args) => run_init(args),
        Commands::Rules(args) => run_rules(args, &cli),
    };

    std::process::exit(exit_code);
}
