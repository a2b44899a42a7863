//! Audit logger implementation.
//!
//! Entries go to an append-only file, to stderr, or both, as structured
//! text lines or JSON Lines. Stdout is never used: it carries program
//! output, which must stay byte-exact.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::entry::{AuditEntry, Outcome, Severity};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the audit logger.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Audit log file; `None` writes to stderr only.
    pub log_path: Option<PathBuf>,
    /// Minimum severity to log.
    pub min_severity: Severity,
    /// Also echo entries to stderr when logging to a file.
    pub echo_stderr: bool,
    pub format: AuditFormat,
}

/// Output format for audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditFormat {
    /// Structured text lines.
    #[default]
    Text,
    /// One JSON object per line.
    JsonLines,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            min_severity: Severity::Info,
            echo_stderr: false,
            format: AuditFormat::Text,
        }
    }
}

impl AuditConfig {
    /// Log to the given file.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            log_path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Log to stderr.
    pub fn stderr() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: AuditFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }
}

// =============================================================================
// Audit Logger
// =============================================================================

/// Thread-safe audit logger.
pub struct AuditLogger {
    config: AuditConfig,
    writer: Mutex<Option<BufWriter<File>>>,
    sequence: AtomicU64,
}

impl AuditLogger {
    /// Create a logger, opening the log file in append mode if one is set.
    pub fn new(config: AuditConfig) -> io::Result<Self> {
        let writer = match &config.log_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(BufWriter::new(file))
            }
            None => None,
        };

        Ok(Self {
            config,
            writer: Mutex::new(writer),
            sequence: AtomicU64::new(0),
        })
    }

    /// Create a logger that writes to the specified path.
    pub fn with_path(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(AuditConfig::file(path))
    }

    /// Create a logger that only writes to stderr.
    pub fn stderr_only() -> Self {
        Self {
            config: AuditConfig::stderr(),
            writer: Mutex::new(None),
            sequence: AtomicU64::new(0),
        }
    }

    /// Render an entry in the configured format, without the newline.
    pub fn render(&self, seq: u64, entry: &AuditEntry) -> io::Result<String> {
        Ok(match self.config.format {
            AuditFormat::Text => format!("{:08} | {}", seq, entry.format_line()),
            AuditFormat::JsonLines => entry.to_json().map_err(io::Error::from)?,
        })
    }

    /// Log an audit entry.
    pub fn log(&self, entry: AuditEntry) -> io::Result<()> {
        if entry.severity < self.config.min_severity {
            return Ok(());
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let line = self.render(seq, &entry)?;

        let mut to_file = false;
        if let Ok(mut guard) = self.writer.lock() {
            if let Some(ref mut w) = *guard {
                writeln!(w, "{}", line)?;
                w.flush()?;
                to_file = true;
            }
        }

        if !to_file || self.config.echo_stderr {
            eprintln!("{}", line);
        }

        Ok(())
    }

    /// Create a quick info entry and log it.
    pub fn info(
        &self,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        description: &str,
    ) -> io::Result<()> {
        self.log(AuditEntry::new(action, entity_type, entity_id, description))
    }

    /// Create a quick error entry and log it.
    pub fn error(
        &self,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        description: &str,
    ) -> io::Result<()> {
        self.log(
            AuditEntry::new(action, entity_type, entity_id, description)
                .with_severity(Severity::Error)
                .with_outcome(Outcome::Failure),
        )
    }

    pub fn flush(&self) -> io::Result<()> {
        if let Ok(mut guard) = self.writer.lock() {
            if let Some(ref mut w) = *guard {
                w.flush()?;
            }
        }
        Ok(())
    }

    /// Number of entries logged so far.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }
}

// =============================================================================
// Correlation ID Generation
// =============================================================================

/// Generate a unique correlation ID.
///
/// Format: `{prefix}-{timestamp_ms}-{counter}`
pub fn generate_correlation_id(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let count = COUNTER.fetch_add(1, Ordering::SeqCst);

    format!("{}-{:013x}-{:04x}", prefix, timestamp, count & 0xFFFF)
}
