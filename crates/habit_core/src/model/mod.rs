//! Habit domain model.
//!
//! # Responsibility
//! - Define the records shared by the store, the streak engine and callers.
//! - Own the validation rules for habit names and periodicity values.
//!
//! # Invariants
//! - Periodicity is exactly one of `daily` or `weekly`.
//! - Habit names are trimmed and never empty.
//! - Dates are naive calendar dates; no timezone is attached.

pub mod habit;
