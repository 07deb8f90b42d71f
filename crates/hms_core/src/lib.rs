//! Core logic for the hospital management doctor records screen.
//! This crate owns the record invariants; front ends only collect input and
//! render results.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::Department;
pub use model::doctor::{
    calculate_age, format_date_of_birth, parse_date_of_birth, DoctorId, DoctorRecord,
    DoctorValidationError, Gender, DOCTOR_TITLES, MAX_YEARS_OF_EXPERIENCE,
};
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::doctor_repo::{DoctorRepository, SqliteDoctorRepository};
pub use repo::{RepoError, RepoResult};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::department_service::{DepartmentService, DepartmentServiceError};
pub use service::doctor_service::{
    DeleteConfirmation, DoctorService, DoctorServiceError, DoctorServiceResult, DoctorUpdate,
    NewDoctor,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
