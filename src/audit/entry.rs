//! Audit entry types.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

// =============================================================================
// Core Types
// =============================================================================

/// Severity level for audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Severity {
    /// Normal operation.
    #[serde(rename = "INFO")]
    Info = 0,
    /// Something went wrong but the run continued.
    #[serde(rename = "WARN")]
    Warning = 1,
    /// The run was aborted.
    #[serde(rename = "ERROR")]
    Error = 2,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Parse a severity name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INFO" => Some(Severity::Info),
            "WARN" | "WARNING" => Some(Severity::Warning),
            "ERROR" | "ERR" => Some(Severity::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS",
            Outcome::Failure => "FAILURE",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCategory {
    /// Start and end of top-level runs.
    Run,
    /// Function definitions and imports.
    Function,
    /// Shell directives.
    Shell,
    /// Reported diagnostics.
    Diagnostic,
    /// Interactive sessions.
    Session,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Run => "RUN",
            ActionCategory::Function => "FUNCTION",
            ActionCategory::Shell => "SHELL",
            ActionCategory::Diagnostic => "DIAGNOSTIC",
            ActionCategory::Session => "SESSION",
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Audit Entry
// =============================================================================

/// An immutable audit log entry.
///
/// Captures WHAT happened to WHICH entity, WHEN, and with what OUTCOME.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    /// Unique identifier for this entry within the process.
    pub id: u64,
    /// UTC timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Action performed (e.g. "RUN_START", "IMPORT", "SHELL").
    pub action: String,
    pub category: ActionCategory,
    /// Type of entity involved (e.g. "Program", "Function", "Resource").
    pub entity_type: String,
    /// Identifier of the entity (e.g. a function name or file path).
    pub entity_id: String,
    pub description: String,
    pub severity: Severity,
    pub outcome: Outcome,
    /// Shared by every entry of one run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_us: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl AuditEntry {
    /// Create a new informational, successful entry.
    pub fn new(
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            id: COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst),
            timestamp_ms,
            action: action.into(),
            category: ActionCategory::Run,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            description: description.into(),
            severity: Severity::Info,
            outcome: Outcome::Success,
            correlation_id: None,
            duration_us: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: ActionCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Mark the entry as a failure at the given severity.
    pub fn failed(self, severity: Severity) -> Self {
        self.with_severity(severity).with_outcome(Outcome::Failure)
    }

    pub fn with_correlation(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_duration_us(mut self, us: u64) -> Self {
        self.duration_us = Some(us);
        self
    }

    /// Add a metadata key-value pair.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.insert(key.into(), value.to_string());
        self
    }

    /// Format the timestamp as ISO 8601 (UTC).
    pub fn timestamp_iso(&self) -> String {
        let secs = self.timestamp_ms / 1000;
        let ms = self.timestamp_ms % 1000;
        let (year, month, day) = civil_from_days((secs / 86_400) as i64);
        let time_of_day = secs % 86_400;
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year,
            month,
            day,
            time_of_day / 3600,
            (time_of_day % 3600) / 60,
            time_of_day % 60,
            ms
        )
    }

    /// Format as a single structured log line.
    ///
    /// Format: `TIMESTAMP | SEVERITY | CATEGORY | ACTION | ENTITY | OUTCOME | DESCRIPTION [extras]`
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "{} | {:5} | {:10} | {:12} | {}:{} | {:7} | {}",
            self.timestamp_iso(),
            self.severity.as_str(),
            self.category.as_str(),
            self.action,
            self.entity_type,
            self.entity_id,
            self.outcome.as_str(),
            self.description,
        );

        if let Some(us) = self.duration_us {
            if us >= 1_000_000 {
                line.push_str(&format!(" [{:.2}s]", us as f64 / 1_000_000.0));
            } else if us >= 1_000 {
                line.push_str(&format!(" [{:.2}ms]", us as f64 / 1_000.0));
            } else {
                line.push_str(&format!(" [{}us]", us));
            }
        }

        if let Some(ref cid) = self.correlation_id {
            line.push_str(&format!(" [cid:{}]", cid));
        }

        if !self.metadata.is_empty() {
            let meta: Vec<String> = self
                .metadata
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            line.push_str(&format!(" {{{}}}", meta.join(", ")));
        }

        line
    }

    /// Serialize as a single JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Days since 1970-01-01 to a proleptic Gregorian `(year, month, day)`.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
