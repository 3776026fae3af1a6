//! Tracing/logging setup shared by deckforge binaries.

/// Initialize process-wide tracing for a long-running service (JSON on stdout).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize tracing for a one-shot command: logs go to stderr so stdout
/// stays clean for the command's result.
pub fn init_for_cli() {
    tracing::init_for_cli();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
