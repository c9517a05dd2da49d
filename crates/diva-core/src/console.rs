use std::sync::{Arc, Mutex};

// ─── Console ──────────────────────────────────────────────────────────────

/// Line-oriented sink for performance output.
///
/// Production code writes to stdout. Tests use [`Console::capture`] to get a
/// shared buffer and assert on the exact lines a diva emitted.
#[derive(Clone)]
pub struct Console {
    target: Target,
}

#[derive(Clone)]
enum Target {
    Stdout,
    Capture(Arc<Mutex<Vec<String>>>),
}

impl Console {
    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
        }
    }

    /// A console that records lines in memory, plus a handle to read them.
    pub fn capture() -> (Self, Captured) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let console = Self {
            target: Target::Capture(Arc::clone(&lines)),
        };
        (console, Captured { lines })
    }

    /// Write one line.
    pub fn line(&self, text: &str) {
        match &self.target {
            Target::Stdout => println!("{text}"),
            Target::Capture(lines) => {
                if let Ok(mut l) = lines.lock() {
                    l.push(text.to_string());
                }
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target {
            Target::Stdout => f.write_str("Console(stdout)"),
            Target::Capture(_) => f.write_str("Console(capture)"),
        }
    }
}

/// Read side of a capturing [`Console`].
#[derive(Clone)]
pub struct Captured {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Captured {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}
