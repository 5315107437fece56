//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls and the streak/status engine into use-case APIs.
//! - Keep the CLI decoupled from storage details.

pub mod habit_service;
