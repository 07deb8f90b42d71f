//! Domain model for hospital staff records.
//!
//! # Responsibility
//! - Define the doctor record and its department reference.
//! - Keep derivations (age, identifier) free of storage concerns.
//!
//! # Invariants
//! - Every doctor is identified by a `DoctorId` that never changes.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod department;
pub mod doctor;
