//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the `HabitStore` contract the engine and services are written against.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes validate habit records before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateName`) in
//!   addition to DB transport errors.

pub mod habit_repo;
