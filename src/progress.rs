//! Render progress reporting.
//!
//! Reports observable progress during `seo render` so users see which
//! pages are being generated and how much is left. Progress is emitted on
//! **stderr** so stdout remains parseable for scripts.

use std::io::Write;

/// A single progress event for a batch render.
#[derive(Clone, Debug)]
pub enum RenderProgressEvent {
    /// Page list is being resolved from the catalog (no total yet).
    Discovering,
    /// Render phase: n pages processed out of total.
    Rendering { page: String, n: u64, total: u64 },
}

/// Reports render progress. Implementations write to stderr (human or JSON).
pub trait RenderProgressReporter {
    /// Emit a progress event. Called from the render loop.
    fn report(&self, event: RenderProgressEvent);
}

/// Human-friendly progress on stderr: "render services/ac-repair/riyadh  12 / 99 pages".
pub struct StderrProgress;

impl RenderProgressReporter for StderrProgress {
    fn report(&self, event: RenderProgressEvent) {
        let line = match &event {
            RenderProgressEvent::Discovering => "render  discovering pages...\n".to_string(),
            RenderProgressEvent::Rendering { page, n, total } => {
                format!(
                    "render {}  {} / {} pages\n",
                    page,
                    format_number(*n),
                    format_number(*total)
                )
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl RenderProgressReporter for JsonProgress {
    fn report(&self, event: RenderProgressEvent) {
        let obj = match &event {
            RenderProgressEvent::Discovering => serde_json::json!({
                "event": "progress",
                "phase": "discovering"
            }),
            RenderProgressEvent::Rendering { page, n, total } => serde_json::json!({
                "event": "progress",
                "phase": "rendering",
                "page": page,
                "n": n,
                "total": total
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl RenderProgressReporter for NoProgress {
    fn report(&self, _event: RenderProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode. Caller passes it to the renderer.
    pub fn reporter(&self) -> Box<dyn RenderProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1), "1");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
