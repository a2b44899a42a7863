//! Global audit logger singleton.

use std::sync::OnceLock;

use super::entry::AuditEntry;
use super::logger::{AuditConfig, AuditLogger};

static GLOBAL_LOGGER: OnceLock<AuditLogger> = OnceLock::new();

/// Initialize the global audit logger.
pub fn init_global_logger(config: AuditConfig) -> std::io::Result<()> {
    let logger = AuditLogger::new(config)?;
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::AlreadyExists, "Logger already initialized"))
}

/// Get a reference to the global logger (if initialized).
pub fn global_logger() -> Option<&'static AuditLogger> {
    GLOBAL_LOGGER.get()
}

/// Whether audit entries are being recorded.
pub fn audit_enabled() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Log to the global logger (no-op if not initialized).
pub fn audit(entry: AuditEntry) {
    if let Some(logger) = global_logger() {
        if let Err(e) = logger.log(entry) {
            tracing::warn!(error = %e, "failed to write audit entry");
        }
    }
}
