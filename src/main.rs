//! annealer CLI
//!
//! Usage: annealer <COMMAND>
//!
//! Commands:
//!   compile     Resolve every built release into a compiled one and update the lock
//!   candidates  List the releases that still need compiling

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    let result = match cli.command {
        Commands::Compile {
            stemcell_file,
            upload_target_id,
            releases_dir,
            annealfile,
        } => commands::compile::cmd_compile(
            json,
            stemcell_file,
            upload_target_id,
            releases_dir,
            &annealfile,
        ),
        Commands::Candidates { annealfile } => {
            commands::candidates::cmd_candidates(json, &annealfile)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::error::print_error(&err, json);
            ExitCode::from(commands::error::exit_code(&err))
        }
    }
}
