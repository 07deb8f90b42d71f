//! Doctor record facade.
//!
//! # Responsibility
//! - Provide create/update/delete/search/list use-cases over doctor records.
//! - Resolve department references and derive age and doctor ID.
//!
//! # Invariants
//! - Create and update only write a department that exists at write time,
//!   together with that department's current name.
//! - Update, delete and search report `DoctorNotFound` for unknown IDs
//!   before touching any row.
//! - Delete never removes a row without `DeleteConfirmation::Confirmed`.

use crate::model::doctor::{
    calculate_age, normalize_optional, validate_date_of_birth, validate_experience, DoctorId,
    DoctorRecord, DoctorValidationError, Gender,
};
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::doctor_repo::DoctorRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::clock::{Clock, SystemClock};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for doctor use-cases.
#[derive(Debug)]
pub enum DoctorServiceError {
    /// Referenced department does not exist.
    InvalidDepartment(String),
    /// Referenced doctor does not exist.
    DoctorNotFound(String),
    /// Delete was requested without explicit confirmation.
    DeletionNotConfirmed(String),
    /// Generated ID is already taken (two creates within the same minute).
    DuplicateDoctorId(DoctorId),
    Validation(DoctorValidationError),
    Repo(RepoError),
    /// Write succeeded but the read-back did not find the row.
    InconsistentState(&'static str),
}

impl Display for DoctorServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDepartment(id) => write!(f, "Invalid Department ID: `{id}`"),
            Self::DoctorNotFound(id) => write!(f, "Invalid Doctor ID: `{id}`"),
            Self::DeletionNotConfirmed(id) => {
                write!(f, "deletion of doctor `{id}` was not confirmed")
            }
            Self::DuplicateDoctorId(id) => write!(
                f,
                "doctor ID `{id}` is already in use; retry after the current minute"
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent doctor state: {details}"),
        }
    }
}

impl Error for DoctorServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DoctorServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::DoctorNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DoctorValidationError> for DoctorServiceError {
    fn from(value: DoctorValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type DoctorServiceResult<T> = Result<T, DoctorServiceError>;

/// Input for a new doctor record. Age and ID are derived, department name
/// is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub blood_group: String,
    pub department_id: String,
    pub contact_number_1: String,
    pub contact_number_2: Option<String>,
    pub aadhar_or_voter_id: String,
    pub email_id: String,
    pub qualification: String,
    pub specialisation: String,
    pub years_of_experience: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// New values for the mutable subset of a doctor record.
///
/// Name, gender, date of birth, blood group and government ID are not
/// part of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorUpdate {
    pub department_id: String,
    pub contact_number_1: String,
    pub contact_number_2: Option<String>,
    pub email_id: String,
    pub qualification: String,
    pub specialisation: String,
    pub years_of_experience: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

impl DoctorUpdate {
    /// Starts an update that keeps every mutable field as currently stored.
    pub fn from_record(record: &DoctorRecord) -> Self {
        Self {
            department_id: record.department_id.clone(),
            contact_number_1: record.contact_number_1.clone(),
            contact_number_2: record.contact_number_2.clone(),
            email_id: record.email_id.clone(),
            qualification: record.qualification.clone(),
            specialisation: record.specialisation.clone(),
            years_of_experience: record.years_of_experience,
            address: record.address.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            pin_code: record.pin_code.clone(),
        }
    }
}

/// Explicit user intent required by [`DoctorService::delete_doctor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    NotConfirmed,
}

impl From<bool> for DeleteConfirmation {
    fn from(value: bool) -> Self {
        if value {
            Self::Confirmed
        } else {
            Self::NotConfirmed
        }
    }
}

/// Doctor facade over doctor and department repositories.
pub struct DoctorService<R, D, C = SystemClock>
where
    R: DoctorRepository,
    D: DepartmentRepository,
    C: Clock,
{
    repo: R,
    departments: D,
    clock: C,
}

impl<R, D> DoctorService<R, D, SystemClock>
where
    R: DoctorRepository,
    D: DepartmentRepository,
{
    /// Creates a service that reads the host's local time.
    pub fn new(repo: R, departments: D) -> Self {
        Self::with_clock(repo, departments, SystemClock)
    }
}

impl<R, D, C> DoctorService<R, D, C>
where
    R: DoctorRepository,
    D: DepartmentRepository,
    C: Clock,
{
    pub fn with_clock(repo: R, departments: D, clock: C) -> Self {
        Self {
            repo,
            departments,
            clock,
        }
    }

    /// Creates a doctor record and returns it as stored.
    ///
    /// # Errors
    /// - `InvalidDepartment` when `department_id` has no department row.
    /// - `Validation` for a blank name, a future date of birth or
    ///   experience outside `0..=100`.
    /// - `DuplicateDoctorId` when another doctor was created in the same minute.
    pub fn create_doctor(&self, input: NewDoctor) -> DoctorServiceResult<DoctorRecord> {
        let now = self.clock.now();
        let today = now.date();

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DoctorValidationError::BlankName.into());
        }
        validate_date_of_birth(input.date_of_birth, today)?;
        validate_experience(input.years_of_experience)?;

        let department_name =
            self.resolve_department_name("doctor_create", &input.department_id)?;

        let id = DoctorId::generate(now);
        if self.repo.doctor_exists(id.as_str())? {
            warn!(
                "event=doctor_create module=doctor status=rejected reason=duplicate_id doctor_id={}",
                id
            );
            return Err(DoctorServiceError::DuplicateDoctorId(id));
        }

        let record = DoctorRecord {
            id,
            name,
            age: calculate_age(input.date_of_birth, today),
            gender: input.gender,
            date_of_birth: input.date_of_birth,
            blood_group: input.blood_group,
            department_id: input.department_id.trim().to_string(),
            department_name,
            contact_number_1: input.contact_number_1,
            contact_number_2: normalize_optional(input.contact_number_2),
            aadhar_or_voter_id: input.aadhar_or_voter_id,
            email_id: input.email_id,
            qualification: input.qualification,
            specialisation: input.specialisation,
            years_of_experience: input.years_of_experience,
            address: input.address,
            city: input.city,
            state: input.state,
            pin_code: input.pin_code,
        };

        let id = self.repo.create_doctor(&record)?;
        info!(
            "event=doctor_create module=doctor status=ok doctor_id={} department_id={}",
            id, record.department_id
        );
        self.repo
            .get_doctor(id.as_str())?
            .ok_or(DoctorServiceError::InconsistentState(
                "created doctor not found in read-back",
            ))
    }

    /// Overwrites the mutable subset of an existing record.
    ///
    /// Age is recomputed from the stored date of birth, and the department
    /// name is refreshed from `update.department_id`.
    pub fn update_doctor(
        &self,
        id: &str,
        update: DoctorUpdate,
    ) -> DoctorServiceResult<DoctorRecord> {
        let existing = self.require_doctor("doctor_update", id)?;
        validate_experience(update.years_of_experience)?;
        let department_name =
            self.resolve_department_name("doctor_update", &update.department_id)?;

        let record = DoctorRecord {
            age: calculate_age(existing.date_of_birth, self.clock.today()),
            department_id: update.department_id.trim().to_string(),
            department_name,
            contact_number_1: update.contact_number_1,
            contact_number_2: normalize_optional(update.contact_number_2),
            email_id: update.email_id,
            qualification: update.qualification,
            specialisation: update.specialisation,
            years_of_experience: update.years_of_experience,
            address: update.address,
            city: update.city,
            state: update.state,
            pin_code: update.pin_code,
            ..existing
        };

        self.repo.update_doctor(&record)?;
        info!(
            "event=doctor_update module=doctor status=ok doctor_id={} department_id={}",
            record.id, record.department_id
        );
        self.repo
            .get_doctor(id)?
            .ok_or(DoctorServiceError::InconsistentState(
                "updated doctor not found in read-back",
            ))
    }

    /// Removes a record once the caller has confirmed it.
    ///
    /// Returns the removed record. An unknown ID is reported before the
    /// confirmation is checked.
    pub fn delete_doctor(
        &self,
        id: &str,
        confirmation: DeleteConfirmation,
    ) -> DoctorServiceResult<DoctorRecord> {
        let existing = self.require_doctor("doctor_delete", id)?;
        if confirmation != DeleteConfirmation::Confirmed {
            info!(
                "event=doctor_delete module=doctor status=skipped reason=not_confirmed doctor_id={}",
                id
            );
            return Err(DoctorServiceError::DeletionNotConfirmed(id.to_string()));
        }

        self.repo.delete_doctor(id)?;
        info!("event=doctor_delete module=doctor status=ok doctor_id={id}");
        Ok(existing)
    }

    /// Looks up one record by ID.
    pub fn search_doctor(&self, id: &str) -> DoctorServiceResult<DoctorRecord> {
        self.require_doctor("doctor_search", id)
    }

    /// Returns every record in insertion order.
    pub fn list_doctors(&self) -> RepoResult<Vec<DoctorRecord>> {
        self.repo.list_doctors()
    }

    /// Returns whether a doctor row with `id` exists.
    pub fn verify_doctor_id(&self, id: &str) -> RepoResult<bool> {
        self.repo.doctor_exists(id)
    }

    fn require_doctor(&self, event: &str, id: &str) -> DoctorServiceResult<DoctorRecord> {
        match self.repo.get_doctor(id)? {
            Some(record) => Ok(record),
            None => {
                warn!("event={event} module=doctor status=rejected reason=unknown_doctor");
                Err(DoctorServiceError::DoctorNotFound(id.to_string()))
            }
        }
    }

    fn resolve_department_name(
        &self,
        event: &str,
        department_id: &str,
    ) -> DoctorServiceResult<String> {
        let department_id = department_id.trim();
        match self.departments.get_department(department_id)? {
            Some(department) => Ok(department.name),
            None => {
                warn!("event={event} module=doctor status=rejected reason=unknown_department");
                Err(DoctorServiceError::InvalidDepartment(
                    department_id.to_string(),
                ))
            }
        }
    }
}
