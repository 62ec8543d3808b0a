use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// annealer - fetch or compile the releases of a lockfile for its stemcell
#[derive(Parser, Debug)]
#[command(name = "annealer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where release sources come from
#[derive(Args, Debug, Clone)]
pub struct AnnealfileArgs {
    /// Annealfile declaring the release sources; its lock sits beside it
    #[arg(long, default_value = "Annealfile")]
    pub annealfile: PathBuf,

    /// TOML file of variables for `$(variable "name")` placeholders
    #[arg(long = "variables-file", value_name = "FILE")]
    pub variables_files: Vec<PathBuf>,

    /// Single variable as key=value (overrides variables files)
    #[arg(long = "variable", value_name = "KEY=VALUE")]
    pub variables: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every built release into a compiled one and update the lock
    Compile {
        /// Stemcell tarball to compile against
        #[arg(long, value_name = "TGZ")]
        stemcell_file: PathBuf,

        /// Release source that receives compiled releases
        #[arg(long, value_name = "ID")]
        upload_target_id: Option<String>,

        /// Directory for downloaded and exported tarballs
        #[arg(long, value_name = "DIR")]
        releases_dir: Option<PathBuf>,

        #[command(flatten)]
        annealfile: AnnealfileArgs,
    },

    /// List the releases that still need compiling, without touching anything
    Candidates {
        #[command(flatten)]
        annealfile: AnnealfileArgs,
    },
}
