//! Checked counter arithmetic.
//!
//! Every counter in the program is a `u64` that only moves up. Increments go
//! through these helpers so an overflow surfaces as [`ArkError::Overflow`]
//! naming the field, instead of wrapping or panicking.

use crate::errors::ArkError;

/// `value + by`, or `Overflow { field }`.
pub fn checked_add(value: u64, by: u64, field: &'static str) -> Result<u64, ArkError> {
    value.checked_add(by).ok_or(ArkError::Overflow { field })
}

/// `value + 1`, or `Overflow { field }`.
pub fn increment(value: u64, field: &'static str) -> Result<u64, ArkError> {
    checked_add(value, 1, field)
}
