//! Doctor record domain model.
//!
//! # Responsibility
//! - Define the nineteen-field doctor record persisted in `doctor_record`.
//! - Own the pure derivations: age from date of birth, timestamp-based ID.
//!
//! # Invariants
//! - `id` is generated once at creation and never rewritten.
//! - `age` equals `calculate_age(date_of_birth, today)` as of the last write.
//! - `years_of_experience` stays within `0..=MAX_YEARS_OF_EXPERIENCE`.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Text format used to store and display dates of birth.
pub const DATE_OF_BIRTH_FORMAT: &str = "%d-%m-%Y";
/// Upper bound accepted for `years_of_experience`.
pub const MAX_YEARS_OF_EXPERIENCE: u32 = 100;

/// Column titles used when records are shown to users, in column order.
pub const DOCTOR_TITLES: [&str; 19] = [
    "Doctor ID",
    "Name",
    "Age",
    "Gender",
    "Date of birth (DD-MM-YYYY)",
    "Blood group",
    "Department ID",
    "Department name",
    "Contact number",
    "Alternate contact number",
    "Aadhar ID / Voter ID",
    "Email ID",
    "Qualification",
    "Specialisation",
    "Years of experience",
    "Address",
    "City",
    "State",
    "PIN code",
];

const DOCTOR_ID_PREFIX: &str = "DR";
const DOCTOR_ID_TIME_FORMAT: &str = "%H%M-%d%m%y";

static DOCTOR_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^DR-\d{4}-\d{6}$").expect("valid doctor id regex"));

/// Stable doctor identifier, e.g. `DR-0930-170324`.
///
/// Generated from the local wall clock at creation time (`HHMM-DDMMYY`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(String);

impl DoctorId {
    /// Wraps an existing identifier (from storage or user input) as-is.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds the identifier for a record created at `now`.
    pub fn generate(now: NaiveDateTime) -> Self {
        Self(format!(
            "{DOCTOR_ID_PREFIX}-{}",
            now.format(DOCTOR_ID_TIME_FORMAT)
        ))
    }

    /// Returns whether `value` has the `DR-HHMM-DDMMYY` shape.
    pub fn is_well_formed(value: &str) -> bool {
        DOCTOR_ID_RE.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DoctorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DoctorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Other];

    /// Storage/display text; also the value kept in `doctor_record.gender`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Other => "Other",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DoctorValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DoctorValidationError::InvalidGender(trimmed.to_string()))
    }
}

/// Field-level validation failures for doctor input and persisted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorValidationError {
    BlankName,
    InvalidGender(String),
    InvalidDateOfBirth(String),
    DateOfBirthInFuture {
        date_of_birth: NaiveDate,
        today: NaiveDate,
    },
    ExperienceOutOfRange(u32),
}

impl Display for DoctorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "doctor name cannot be empty"),
            Self::InvalidGender(value) => {
                write!(f, "invalid gender `{value}`; expected Female|Male|Other")
            }
            Self::InvalidDateOfBirth(value) => {
                write!(f, "invalid date of birth `{value}`; expected DD-MM-YYYY")
            }
            Self::DateOfBirthInFuture {
                date_of_birth,
                today,
            } => write!(
                f,
                "date of birth {} is after today ({})",
                format_date_of_birth(*date_of_birth),
                format_date_of_birth(*today)
            ),
            Self::ExperienceOutOfRange(years) => write!(
                f,
                "years of experience {years} is out of range 0..={MAX_YEARS_OF_EXPERIENCE}"
            ),
        }
    }
}

impl Error for DoctorValidationError {}

/// Full doctor record as stored in `doctor_record`, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: DoctorId,
    pub name: String,
    /// Derived; see [`calculate_age`].
    pub age: u32,
    pub gender: Gender,
    #[serde(with = "date_of_birth_text")]
    pub date_of_birth: NaiveDate,
    pub blood_group: String,
    pub department_id: String,
    /// Snapshot of `department_record.name` taken at write time.
    pub department_name: String,
    pub contact_number_1: String,
    pub contact_number_2: Option<String>,
    /// Government ID (Aadhar or voter ID).
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

impl DoctorRecord {
    /// Checks the invariants that hold regardless of the current date.
    pub fn validate(&self) -> Result<(), DoctorValidationError> {
        if self.name.trim().is_empty() {
            return Err(DoctorValidationError::BlankName);
        }
        validate_experience(self.years_of_experience)
    }

    /// Display values lined up with [`DOCTOR_TITLES`].
    pub fn display_row(&self) -> [String; 19] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.gender.to_string(),
            format_date_of_birth(self.date_of_birth),
            self.blood_group.clone(),
            self.department_id.clone(),
            self.department_name.clone(),
            self.contact_number_1.clone(),
            self.contact_number_2.clone().unwrap_or_default(),
            self.aadhar_or_voter_id.clone(),
            self.email_id.clone(),
            self.qualification.clone(),
            self.specialisation.clone(),
            self.years_of_experience.to_string(),
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.pin_code.clone(),
        ]
    }
}

/// Age in whole years on `today` for someone born on `date_of_birth`.
///
/// The birthday only counts once `today`'s (month, day) reaches it, so a
/// 29 February birthday is reached on 1 March in non-leap years. Dates of
/// birth after `today` yield 0.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - date_of_birth.year();
    if (date_of_birth.month(), date_of_birth.day()) > (today.month(), today.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Parses a `DD-MM-YYYY` date of birth.
pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate, DoctorValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_OF_BIRTH_FORMAT)
        .map_err(|_| DoctorValidationError::InvalidDateOfBirth(trimmed.to_string()))
}

pub fn format_date_of_birth(date: NaiveDate) -> String {
    date.format(DATE_OF_BIRTH_FORMAT).to_string()
}

/// Rejects dates of birth after `today`.
pub fn validate_date_of_birth(
    date_of_birth: NaiveDate,
    today: NaiveDate,
) -> Result<(), DoctorValidationError> {
    if date_of_birth > today {
        return Err(DoctorValidationError::DateOfBirthInFuture {
            date_of_birth,
            today,
        });
    }
    Ok(())
}

pub fn validate_experience(years: u32) -> Result<(), DoctorValidationError> {
    if years > MAX_YEARS_OF_EXPERIENCE {
        return Err(DoctorValidationError::ExperienceOutOfRange(years));
    }
    Ok(())
}

/// Treats blank optional text input as absent.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

mod date_of_birth_text {
    use super::{format_date_of_birth, parse_date_of_birth};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date_of_birth(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_date_of_birth(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{calculate_age, parse_date_of_birth, DoctorId, Gender};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn age_counts_birthday_once_reached() {
        let dob = date(1980, 6, 15);
        assert_eq!(calculate_age(dob, date(2024, 6, 14)), 43);
        assert_eq!(calculate_age(dob, date(2024, 6, 15)), 44);
        assert_eq!(calculate_age(dob, date(2024, 12, 31)), 44);
    }

    #[test]
    fn age_for_leap_day_birth_rolls_over_on_first_of_march() {
        let dob = date(2000, 2, 29);
        assert_eq!(calculate_age(dob, date(2023, 2, 28)), 22);
        assert_eq!(calculate_age(dob, date(2023, 3, 1)), 23);
        assert_eq!(calculate_age(dob, date(2024, 2, 29)), 24);
    }

    #[test]
    fn age_is_zero_for_same_day_or_future_birth() {
        assert_eq!(calculate_age(date(2024, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(calculate_age(date(2025, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn generated_id_uses_hour_minute_and_day_month_year() {
        let now = date(2024, 3, 7).and_hms_opt(9, 5, 42).unwrap();
        let id = DoctorId::generate(now);
        assert_eq!(id.as_str(), "DR-0905-070324");
        assert!(DoctorId::is_well_formed(id.as_str()));
    }

    #[test]
    fn id_shape_check_rejects_other_layouts() {
        assert!(!DoctorId::is_well_formed("DR-905-070324"));
        assert!(!DoctorId::is_well_formed("dr-0905-070324"));
        assert!(!DoctorId::is_well_formed("DR-0905-07032024"));
        assert!(!DoctorId::is_well_formed(" DR-0905-070324"));
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn date_of_birth_uses_day_month_year() {
        assert_eq!(parse_date_of_birth("05-11-1975").unwrap(), date(1975, 11, 5));
        assert!(parse_date_of_birth("1975-11-05").is_err());
        assert!(parse_date_of_birth("31-02-1975").is_err());
    }
}
