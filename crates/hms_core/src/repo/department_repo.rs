//! Department repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Resolve department references used by doctor writes.
//! - Seed and list `department_record` rows.

use crate::model::department::Department;
use crate::repo::{ensure_table_shape, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const DEPARTMENT_COLUMNS: [&str; 2] = ["id", "name"];

/// Repository interface for department lookups.
pub trait DepartmentRepository {
    fn create_department(&self, department: &Department) -> RepoResult<()>;
    fn get_department(&self, id: &str) -> RepoResult<Option<Department>>;
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
    fn department_exists(&self, id: &str) -> RepoResult<bool>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Constructs a repository after checking `department_record` is present.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_shape(conn, "department_record", &DEPARTMENT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_department(&self, department: &Department) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO department_record (id, name) VALUES (?1, ?2);",
            params![department.id.as_str(), department.name.as_str()],
        )?;
        Ok(())
    }

    fn get_department(&self, id: &str) -> RepoResult<Option<Department>> {
        let department = self
            .conn
            .query_row(
                "SELECT id, name FROM department_record WHERE id = ?1;",
                [id],
                parse_department_row,
            )
            .optional()?;
        Ok(department)
    }

    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM department_record ORDER BY id ASC;")?;
        let departments = stmt
            .query_map([], parse_department_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    fn department_exists(&self, id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM department_record WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
