//! Doctor repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map `DoctorRecord` field-by-field onto `doctor_record` columns.
//! - Keep the update column set limited to the mutable subset.
//!
//! # Invariants
//! - `id`, `name`, `gender`, `date_of_birth`, `blood_group` and
//!   `aadhar_or_voter_id` are written only by `create_doctor`.
//! - Read paths reject rows that fail `DoctorRecord::validate()` or hold
//!   unparseable gender/date text instead of masking them.

use crate::model::doctor::{
    format_date_of_birth, parse_date_of_birth, DoctorId, DoctorRecord, Gender,
};
use crate::repo::{ensure_table_shape, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const DOCTOR_COLUMNS: [&str; 19] = [
    "id",
    "name",
    "age",
    "gender",
    "date_of_birth",
    "blood_group",
    "department_id",
    "department_name",
    "contact_number_1",
    "contact_number_2",
    "aadhar_or_voter_id",
    "email_id",
    "qualification",
    "specialisation",
    "years_of_experience",
    "address",
    "city",
    "state",
    "pin_code",
];

const DOCTOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    age,
    gender,
    date_of_birth,
    blood_group,
    department_id,
    department_name,
    contact_number_1,
    contact_number_2,
    aadhar_or_voter_id,
    email_id,
    qualification,
    specialisation,
    years_of_experience,
    address,
    city,
    state,
    pin_code
FROM doctor_record";

/// Repository interface for doctor record operations.
pub trait DoctorRepository {
    fn create_doctor(&self, doctor: &DoctorRecord) -> RepoResult<DoctorId>;
    /// Overwrites the mutable subset of the row identified by `doctor.id`.
    fn update_doctor(&self, doctor: &DoctorRecord) -> RepoResult<()>;
    fn get_doctor(&self, id: &str) -> RepoResult<Option<DoctorRecord>>;
    /// Full scan in insertion order.
    fn list_doctors(&self) -> RepoResult<Vec<DoctorRecord>>;
    fn delete_doctor(&self, id: &str) -> RepoResult<()>;
    fn doctor_exists(&self, id: &str) -> RepoResult<bool>;
}

/// SQLite-backed doctor repository.
pub struct SqliteDoctorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDoctorRepository<'conn> {
    /// Constructs a repository after checking the `doctor_record` layout.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_shape(conn, "doctor_record", &DOCTOR_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl DoctorRepository for SqliteDoctorRepository<'_> {
    fn create_doctor(&self, doctor: &DoctorRecord) -> RepoResult<DoctorId> {
        doctor.validate()?;

        self.conn.execute(
            "INSERT INTO doctor_record (
                id,
                name,
                age,
                gender,
                date_of_birth,
                blood_group,
                department_id,
                department_name,
                contact_number_1,
                contact_number_2,
                aadhar_or_voter_id,
                email_id,
                qualification,
                specialisation,
                years_of_experience,
                address,
                city,
                state,
                pin_code
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19);",
            params![
                doctor.id.as_str(),
                doctor.name.as_str(),
                doctor.age,
                doctor.gender.as_str(),
                format_date_of_birth(doctor.date_of_birth),
                doctor.blood_group.as_str(),
                doctor.department_id.as_str(),
                doctor.department_name.as_str(),
                doctor.contact_number_1.as_str(),
                doctor.contact_number_2.as_deref(),
                doctor.aadhar_or_voter_id.as_str(),
                doctor.email_id.as_str(),
                doctor.qualification.as_str(),
                doctor.specialisation.as_str(),
                doctor.years_of_experience,
                doctor.address.as_str(),
                doctor.city.as_str(),
                doctor.state.as_str(),
                doctor.pin_code.as_str(),
            ],
        )?;

        Ok(doctor.id.clone())
    }

    fn update_doctor(&self, doctor: &DoctorRecord) -> RepoResult<()> {
        doctor.validate()?;

        let changed = self.conn.execute(
            "UPDATE doctor_record
             SET
                age = ?1,
                department_id = ?2,
                department_name = ?3,
                contact_number_1 = ?4,
                contact_number_2 = ?5,
                email_id = ?6,
                qualification = ?7,
                specialisation = ?8,
                years_of_experience = ?9,
                address = ?10,
                city = ?11,
                state = ?12,
                pin_code = ?13
             WHERE id = ?14;",
            params![
                doctor.age,
                doctor.department_id.as_str(),
                doctor.department_name.as_str(),
                doctor.contact_number_1.as_str(),
                doctor.contact_number_2.as_deref(),
                doctor.email_id.as_str(),
                doctor.qualification.as_str(),
                doctor.specialisation.as_str(),
                doctor.years_of_experience,
                doctor.address.as_str(),
                doctor.city.as_str(),
                doctor.state.as_str(),
                doctor.pin_code.as_str(),
                doctor.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(doctor.id.to_string()));
        }

        Ok(())
    }

    fn get_doctor(&self, id: &str) -> RepoResult<Option<DoctorRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCTOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_doctor_row(row)?));
        }

        Ok(None)
    }

    fn list_doctors(&self) -> RepoResult<Vec<DoctorRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCTOR_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut doctors = Vec::new();
        while let Some(row) = rows.next()? {
            doctors.push(parse_doctor_row(row)?);
        }

        Ok(doctors)
    }

    fn delete_doctor(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM doctor_record WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn doctor_exists(&self, id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM doctor_record WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_doctor_row(row: &Row<'_>) -> RepoResult<DoctorRecord> {
    let id: String = row.get("id")?;

    let gender_text: String = row.get("gender")?;
    let gender = gender_text.parse::<Gender>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid gender `{gender_text}` in doctor_record.gender for {id}"
        ))
    })?;

    let dob_text: String = row.get("date_of_birth")?;
    let date_of_birth = parse_date_of_birth(&dob_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{dob_text}` in doctor_record.date_of_birth for {id}"
        ))
    })?;

    let doctor = DoctorRecord {
        id: DoctorId::new(id),
        name: row.get("name")?,
        age: row.get("age")?,
        gender,
        date_of_birth,
        blood_group: row.get("blood_group")?,
        department_id: row.get("department_id")?,
        department_name: row.get("department_name")?,
        contact_number_1: row.get("contact_number_1")?,
        contact_number_2: row.get("contact_number_2")?,
        aadhar_or_voter_id: row.get("aadhar_or_voter_id")?,
        email_id: row.get("email_id")?,
        qualification: row.get("qualification")?,
        specialisation: row.get("specialisation")?,
        years_of_experience: row.get("years_of_experience")?,
        address: row.get("address")?,
        city: row.get("city")?,
        state: row.get("state")?,
        pin_code: row.get("pin_code")?,
    };
    doctor.validate()?;
    Ok(doctor)
}
