//! Domain invariants for the Ark records.
//!
//! Predicates over a single record, plus transition checks comparing the
//! record before and after an operation. The codec runs the record checks
//! on every decode and the service runs the transition checks before commit.

use super::entities::{AnalyticsRecord, EscrowRecord};
use crate::errors::ArkError;

/// Counter equals list length: `government_count == governments.len()`.
pub fn invariant_government_count(record: &AnalyticsRecord) -> bool {
    record.government_count == record.governments.len() as u64
}

/// `poll_count == approved_count + rejected_count`, without overflow.
pub fn invariant_poll_tally(record: &AnalyticsRecord) -> bool {
    record
        .approved_count
        .checked_add(record.rejected_count)
        .is_some_and(|sum| sum == record.poll_count)
}

/// `total_trades == trades.len()` and `total_services == services.len()`.
pub fn invariant_escrow_counts(record: &EscrowRecord) -> bool {
    record.total_trades == record.trades.len() as u64
        && record.total_services == record.services.len() as u64
}

/// No list holds more entries than its declared capacity.
pub fn invariant_within_capacity(record: &EscrowRecord) -> bool {
    record.trades.len() <= record.trades.capacity() as usize
        && record.services.len() <= record.services.capacity() as usize
}

/// Collects every violated analytics invariant.
pub fn analytics_violations(record: &AnalyticsRecord) -> Vec<String> {
    let mut violations = Vec::new();
    if !invariant_government_count(record) {
        violations.push(format!(
            "government_count {} != governments.len() {}",
            record.government_count,
            record.governments.len()
        ));
    }
    if !invariant_poll_tally(record) {
        violations.push(format!(
            "poll_count {} != approved {} + rejected {}",
            record.poll_count, record.approved_count, record.rejected_count
        ));
    }
    if record.governments.len() > record.governments.capacity() as usize {
        violations.push(format!(
            "governments holds {} entries, capacity {}",
            record.governments.len(),
            record.governments.capacity()
        ));
    }
    violations
}

/// Collects every violated escrow invariant.
pub fn escrow_violations(record: &EscrowRecord) -> Vec<String> {
    let mut violations = Vec::new();
    if !invariant_escrow_counts(record) {
        violations.push(format!(
            "total_trades {} / trades.len() {}, total_services {} / services.len() {}",
            record.total_trades,
            record.trades.len(),
            record.total_services,
            record.services.len()
        ));
    }
    if !invariant_within_capacity(record) {
        violations.push("list length exceeds declared capacity".to_string());
    }
    violations
}

/// An analytics transition only grows counters and appends to the list.
pub fn analytics_transition_violations(
    before: &AnalyticsRecord,
    after: &AnalyticsRecord,
) -> Vec<String> {
    let mut violations = Vec::new();
    if after.authority != before.authority || after.created_at != before.created_at {
        violations.push("authority and created_at are immutable".to_string());
    }
    if after.government_count < before.government_count
        || after.poll_count < before.poll_count
        || after.approved_count < before.approved_count
        || after.rejected_count < before.rejected_count
        || after.points < before.points
    {
        violations.push("analytics counter decreased".to_string());
    }
    if after.governments.capacity() != before.governments.capacity()
        || !before.governments.is_prefix_of(&after.governments)
    {
        violations.push("governments list was rewritten".to_string());
    }
    violations
}

/// An escrow transition only grows counters and appends to the lists.
pub fn escrow_transition_violations(before: &EscrowRecord, after: &EscrowRecord) -> Vec<String> {
    let mut violations = Vec::new();
    if after.authority != before.authority || after.created_at != before.created_at {
        violations.push("authority and created_at are immutable".to_string());
    }
    if after.total_trades < before.total_trades
        || after.total_services < before.total_services
        || after.total_fees_collected < before.total_fees_collected
        || after.total_amount_transferred < before.total_amount_transferred
    {
        violations.push("escrow counter decreased".to_string());
    }
    if after.trades.capacity() != before.trades.capacity()
        || !before.trades.is_prefix_of(&after.trades)
    {
        violations.push("trades list was rewritten".to_string());
    }
    if after.services.capacity() != before.services.capacity()
        || !before.services.is_prefix_of(&after.services)
    {
        violations.push("services list was rewritten".to_string());
    }
    violations
}

/// Folds a violation list into `InvariantViolation`.
pub fn into_result(violations: Vec<String>) -> Result<(), ArkError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArkError::InvariantViolation(violations.join("; ")))
    }
}
