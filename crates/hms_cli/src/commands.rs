//! Command-line surface for the records screen.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hms_core::{parse_date_of_birth, DoctorUpdate, Gender, NewDoctor};
use std::path::PathBuf;

/// Hospital management: doctor records
#[derive(Parser, Debug)]
#[command(name = "hms", version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file holding department and doctor records
    #[arg(long, env = "HMS_DB_PATH", default_value = "hms.sqlite3", global = true)]
    pub db: PathBuf,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "HMS_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "HMS_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add, update, delete, search or list doctor records
    #[command(subcommand)]
    Doctor(DoctorCommand),
    /// Register or list departments
    #[command(subcommand)]
    Department(DepartmentCommand),
}

#[derive(Subcommand, Debug)]
pub enum DoctorCommand {
    /// Add a new doctor record
    Add(AddDoctorArgs),
    /// Update contact, department and practice details of a doctor
    Update(UpdateDoctorArgs),
    /// Delete a doctor record after confirmation
    Delete {
        /// Doctor ID, e.g. DR-0930-170324
        id: String,
        /// Confirm deletion without prompting
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show one doctor record
    Search {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Show all doctor records
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DepartmentCommand {
    /// Register a department
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Show all departments
    List,
}

#[derive(Args, Debug)]
pub struct AddDoctorArgs {
    /// Full name
    #[arg(long)]
    pub name: String,
    /// Female|Male|Other
    #[arg(long)]
    pub gender: Gender,
    /// Date of birth (DD-MM-YYYY)
    #[arg(long = "dob", value_parser = parse_date_of_birth)]
    pub date_of_birth: NaiveDate,
    #[arg(long)]
    pub blood_group: String,
    #[arg(long)]
    pub department_id: String,
    /// Contact number
    #[arg(long)]
    pub contact: String,
    /// Alternate contact number
    #[arg(long)]
    pub alt_contact: Option<String>,
    /// Aadhar ID / Voter ID
    #[arg(long)]
    pub gov_id: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub qualification: String,
    #[arg(long)]
    pub specialisation: String,
    /// Years of experience (0-100)
    #[arg(long, default_value_t = 0)]
    pub experience: u32,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub pin_code: String,
}

impl From<AddDoctorArgs> for NewDoctor {
    fn from(args: AddDoctorArgs) -> Self {
        NewDoctor {
            name: args.name,
            gender: args.gender,
            date_of_birth: args.date_of_birth,
            blood_group: args.blood_group,
            department_id: args.department_id,
            contact_number_1: args.contact,
            contact_number_2: args.alt_contact,
            aadhar_or_voter_id: args.gov_id,
            email_id: args.email,
            qualification: args.qualification,
            specialisation: args.specialisation,
            years_of_experience: args.experience,
            address: args.address,
            city: args.city,
            state: args.state,
            pin_code: args.pin_code,
        }
    }
}

/// Omitted options keep the stored value; `--alt-contact ""` clears it.
#[derive(Args, Debug)]
pub struct UpdateDoctorArgs {
    /// Doctor ID, e.g. DR-0930-170324
    pub id: String,
    #[arg(long)]
    pub department_id: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub alt_contact: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub qualification: Option<String>,
    #[arg(long)]
    pub specialisation: Option<String>,
    #[arg(long)]
    pub experience: Option<u32>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub pin_code: Option<String>,
}

impl UpdateDoctorArgs {
    /// Layers the given options over `current`.
    pub fn apply_to(self, mut current: DoctorUpdate) -> DoctorUpdate {
        fn replace(slot: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        replace(&mut current.department_id, self.department_id);
        replace(&mut current.contact_number_1, self.contact);
        if let Some(alt_contact) = self.alt_contact {
            current.contact_number_2 = Some(alt_contact);
        }
        replace(&mut current.email_id, self.email);
        replace(&mut current.qualification, self.qualification);
        replace(&mut current.specialisation, self.specialisation);
        if let Some(years) = self.experience {
            current.years_of_experience = years;
        }
        replace(&mut current.address, self.address);
        replace(&mut current.city, self.city);
        replace(&mut current.state, self.state);
        replace(&mut current.pin_code, self.pin_code);
        current
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DoctorCommand};
    use clap::{CommandFactory, Parser};
    use hms_core::{DoctorUpdate, Gender, NewDoctor};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_gender_and_day_month_year_birth_date() {
        let cli = Cli::try_parse_from([
            "hms",
            "doctor",
            "add",
            "--name",
            "Asha Rao",
            "--gender",
            "female",
            "--dob",
            "15-06-1980",
            "--blood-group",
            "O+",
            "--department-id",
            "DEP-CARD",
            "--contact",
            "9876543210",
            "--gov-id",
            "1234",
            "--email",
            "asha@example.org",
            "--qualification",
            "MBBS",
            "--specialisation",
            "Cardiology",
            "--experience",
            "18",
            "--address",
            "12 Lake Road",
            "--city",
            "Pune",
            "--state",
            "Maharashtra",
            "--pin-code",
            "411001",
        ])
        .unwrap();

        let Command::Doctor(DoctorCommand::Add(args)) = cli.command else {
            panic!("expected doctor add");
        };
        let input = NewDoctor::from(args);
        assert_eq!(input.gender, Gender::Female);
        assert_eq!(input.date_of_birth.to_string(), "1980-06-15");
        assert_eq!(input.years_of_experience, 18);
        assert_eq!(input.contact_number_2, None);
    }

    #[test]
    fn add_rejects_iso_birth_date() {
        let err = Cli::try_parse_from([
            "hms", "doctor", "add", "--name", "X", "--gender", "Male", "--dob", "1980-06-15",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let cli = Cli::try_parse_from([
            "hms",
            "doctor",
            "update",
            "DR-0930-150624",
            "--city",
            "Mumbai",
            "--alt-contact",
            "",
        ])
        .unwrap();
        let Command::Doctor(DoctorCommand::Update(args)) = cli.command else {
            panic!("expected doctor update");
        };

        let current = DoctorUpdate {
            department_id: "DEP-CARD".to_string(),
            contact_number_1: "9876543210".to_string(),
            contact_number_2: Some("020-5551234".to_string()),
            email_id: "asha@example.org".to_string(),
            qualification: "MBBS".to_string(),
            specialisation: "Cardiology".to_string(),
            years_of_experience: 18,
            address: "12 Lake Road".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            pin_code: "411001".to_string(),
        };
        let merged = args.apply_to(current.clone());

        assert_eq!(merged.city, "Mumbai");
        assert_eq!(merged.contact_number_2.as_deref(), Some(""));
        assert_eq!(merged.department_id, current.department_id);
        assert_eq!(merged.years_of_experience, 18);
    }

    #[test]
    fn global_db_option_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["hms", "doctor", "list", "--db", "/tmp/records.sqlite3"])
            .unwrap();
        assert_eq!(cli.db.to_str(), Some("/tmp/records.sqlite3"));
    }
}
