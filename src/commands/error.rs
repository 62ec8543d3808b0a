//! Reporting a failed command and choosing its exit status

use serde_json::json;

use annealer::config::ConfigError;
use annealer::{ErrorKind, ResolveError};

/// Exit status by failure class; anything unclassified exits 1
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(resolve) = err.downcast_ref::<ResolveError>() {
        return match resolve.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::Transport => 3,
            ErrorKind::Integrity => 4,
            ErrorKind::Cleanup => 5,
            ErrorKind::Interrupted => 130,
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return 2;
    }
    1
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        println!("{}", error_json(err));
        return;
    }
    eprintln!("[ERROR] {err:#}");
}

fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let resolve = err.downcast_ref::<ResolveError>();
    json!({
        "event": "error",
        "kind": resolve.map(|e| e.kind().to_string()),
        "release": resolve.and_then(ResolveError::release).map(ToString::to_string),
        "message": format!("{err:#}"),
    })
}
