//! Department lookup facade.
//!
//! Departments are only seeded and read here; doctor writes resolve them
//! through [`DepartmentRepository`].

use crate::model::department::Department;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum DepartmentServiceError {
    /// `id` or `name` was empty after trimming.
    BlankField(&'static str),
    DuplicateDepartment(String),
    Repo(RepoError),
}

impl Display for DepartmentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "department {field} cannot be empty"),
            Self::DuplicateDepartment(id) => write!(f, "department `{id}` already exists"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DepartmentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DepartmentServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct DepartmentService<D: DepartmentRepository> {
    repo: D,
}

impl<D: DepartmentRepository> DepartmentService<D> {
    pub fn new(repo: D) -> Self {
        Self { repo }
    }

    /// Registers a department with a caller-chosen ID.
    pub fn create_department(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Department, DepartmentServiceError> {
        let id = id.trim();
        let name = name.trim();
        if id.is_empty() {
            return Err(DepartmentServiceError::BlankField("id"));
        }
        if name.is_empty() {
            return Err(DepartmentServiceError::BlankField("name"));
        }
        if self.repo.department_exists(id)? {
            return Err(DepartmentServiceError::DuplicateDepartment(id.to_string()));
        }

        let department = Department::new(id, name);
        self.repo.create_department(&department)?;
        info!("event=department_create module=department status=ok department_id={id}");
        Ok(department)
    }

    pub fn get_department(&self, id: &str) -> RepoResult<Option<Department>> {
        self.repo.get_department(id.trim())
    }

    pub fn list_departments(&self) -> RepoResult<Vec<Department>> {
        self.repo.list_departments()
    }

    pub fn verify_department_id(&self, id: &str) -> RepoResult<bool> {
        self.repo.department_exists(id.trim())
    }
}
