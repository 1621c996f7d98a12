//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use stride_sdk::{ApiError, ErrorKind, Record};

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print the top-level fields of a record as key-value pairs.
    pub fn record(&self, record: &Record) {
        if self.json {
            return;
        }
        match record {
            Record::Object(fields) => {
                for (key, value) in fields {
                    self.kv(key, &format_value(value));
                }
            }
            other => self.kv("value", &format_value(other)),
        }
    }

    /// Print the details of a failed call.
    pub fn api_error(&self, error: &ApiError) {
        if self.json {
            return;
        }
        for msg in error.validation_messages() {
            self.list_item(msg);
        }
        self.debug(&format!(
            "{} (status {})",
            kind_badge(&error.kind),
            error.status.map_or_else(|| "none".to_string(), |s| s.to_string())
        ));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored label for a failure kind.
pub fn kind_badge(kind: &ErrorKind) -> String {
    let name = kind.name();
    match kind {
        ErrorKind::NetworkUnavailable | ErrorKind::ServerError => style(name).yellow().to_string(),
        ErrorKind::AuthenticationExpired | ErrorKind::Forbidden => style(name).red().to_string(),
        ErrorKind::ValidationFailed(_) | ErrorKind::NotFound => style(name).cyan().to_string(),
        ErrorKind::Unknown => style(name).dim().to_string(),
    }
}

/// Render a JSON value on one line, without quotes around plain strings.
pub fn format_value(value: &Record) -> String {
    match value {
        Record::String(s) => s.clone(),
        Record::Null => "-".to_string(),
        other => other.to_string(),
    }
}
