//! Console Event Sink
//!
//! Human-readable progress lines on stderr. Colors are only used when the
//! caller says the stream is a terminal.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{Color, Stylize};

use crate::domain::ports::{ResolveEvent, ResolveEventSink};

const SUCCESS: Color = Color::Green;
const WARNING: Color = Color::Yellow;
const INFO: Color = Color::Cyan;
const DIM: Color = Color::DarkGrey;

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl ConsoleEventSink {
    pub fn stderr(color: bool) -> Self {
        Self::with_writer(io::stderr(), color)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, color: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color,
        }
    }
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}

/// One line for an event, or nothing for events too chatty to print
pub fn render_event(event: &ResolveEvent, color: bool) -> Option<String> {
    let ok = || paint("ok", SUCCESS, color);
    let line = match event {
        ResolveEvent::Started {
            lockfile,
            release_count,
        } => format!(
            "Resolving {release_count} releases from {}",
            lockfile.display()
        ),
        ResolveEvent::Classified {
            publishable,
            candidates,
        } => format!("{publishable} already compiled, {candidates} built"),
        ResolveEvent::AllCompiled => format!(
            "{} all releases are already compiled",
            paint("done", SUCCESS, color)
        ),
        ResolveEvent::CacheSearchStarted { .. } => return None,
        ResolveEvent::CacheHit { release, source_id } => {
            format!("  {} {release} found in {source_id}", ok())
        }
        ResolveEvent::CacheMiss { release } => {
            format!("  {} {release} needs compiling", paint("--", DIM, color))
        }
        ResolveEvent::CompilationNeeded { count } => {
            format!("Compiling {count} releases")
        }
        ResolveEvent::SessionCreated { deployment } => {
            format!("  deployment {}", paint(deployment, INFO, color))
        }
        ResolveEvent::ReleaseUploaded { release } => format!("  {} uploaded {release}", ok()),
        ResolveEvent::StemcellUploaded { stemcell } => {
            format!("  {} uploaded stemcell {stemcell}", ok())
        }
        ResolveEvent::Deployed { .. } => format!("  {} compiled", ok()),
        ResolveEvent::ReleaseExported { release, path } => {
            format!("  {} exported {release} to {}", ok(), path.display())
        }
        ResolveEvent::DeploymentDeleted { deployment } => {
            format!("  {} deleted {deployment}", ok())
        }
        ResolveEvent::Warning { message } => {
            format!("{} {message}", paint("warning:", WARNING, color))
        }
        ResolveEvent::ReleasePublished {
            release,
            source_id,
            remote_path,
        } => format!("  {} published {release} to {source_id}:{remote_path}", ok()),
        ResolveEvent::Completed { lockfile, updated } => format!(
            "{} updated {updated} entries in {}",
            paint("done", SUCCESS, color),
            lockfile.display()
        ),
    };
    Some(line)
}

impl ResolveEventSink for ConsoleEventSink {
    fn on_event(&self, event: ResolveEvent) {
        let Some(line) = render_event(&event, self.color) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}
