mod cli;
mod util;

use clap::Parser;
use treeprune_lib::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Prune {
            root,
            config,
            trash,
            dry_run,
            log,
            report,
        } => cli::prune::handle_prune_command(
            cli::prune::PruneArgs {
                root,
                config,
                trash,
                dry_run,
                log,
                report,
            },
            cli.verbose,
            cli.quiet,
        ),

        cli::Commands::Check { config, platform } => {
            cli::check::handle_check_command(config, platform, cli.quiet)
        }

        cli::Commands::Restore { root, trash } => {
            cli::restore::handle_restore_command(&root, &trash, cli.quiet)
        }

        cli::Commands::Shape { platform } => cli::shape::handle_shape_command(platform),
    }
}
