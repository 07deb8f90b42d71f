//! Use-case facades.
//!
//! # Responsibility
//! - Orchestrate repository calls into record-level operations.
//! - Keep the front end decoupled from SQL and from the wall clock.

pub mod clock;
pub mod department_service;
pub mod doctor_service;
