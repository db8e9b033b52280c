// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording for transaction outcomes.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics.

use metrics::describe_counter;

/// Register all transaction metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!("trellis_tx_begun_total", "Transactions begun");
    describe_counter!("trellis_tx_committed_total", "Transactions committed");
    describe_counter!("trellis_tx_rolled_back_total", "Transactions rolled back");
    describe_counter!(
        "trellis_tx_suspensions_total",
        "Transaction suspensions (requires_new, not_supported)"
    );
    describe_counter!(
        "trellis_tx_savepoints_total",
        "Savepoints created for nested scopes"
    );
}

pub(crate) fn record_begin(read_only: bool) {
    let mode = if read_only { "read_only" } else { "read_write" };
    metrics::counter!("trellis_tx_begun_total", "mode" => mode).increment(1);
}

pub(crate) fn record_commit() {
    metrics::counter!("trellis_tx_committed_total").increment(1);
}

pub(crate) fn record_rollback(cause: &'static str) {
    metrics::counter!("trellis_tx_rolled_back_total", "cause" => cause).increment(1);
}

pub(crate) fn record_suspension() {
    metrics::counter!("trellis_tx_suspensions_total").increment(1);
}

pub(crate) fn record_savepoint() {
    metrics::counter!("trellis_tx_savepoints_total").increment(1);
}
