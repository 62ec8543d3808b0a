//! Compilation platform implementations

mod bosh_cli;
mod stemcell_tarball;

pub use bosh_cli::BoshCliPlatform;
pub use stemcell_tarball::read_stemcell_manifest;
