//! `hms` command-line front end for doctor records.
//!
//! # Responsibility
//! - Collect record input from arguments and render results.
//! - Open one connection per invocation and drop it when the operation ends.

mod commands;
mod render;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use commands::{Cli, Command, DepartmentCommand, DoctorCommand};
use hms_core::db::open_db;
use hms_core::{
    default_log_level, init_logging, DeleteConfirmation, DepartmentService, DoctorRecord,
    DoctorService, DoctorServiceError, DoctorUpdate, SqliteDepartmentRepository,
    SqliteDoctorRepository,
};
use log::info;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        start_logging(cli.log_level.as_deref(), log_dir)?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open records database `{}`", cli.db.display()))?;
    info!("event=cli_command module=cli status=start");

    match cli.command {
        Command::Doctor(command) => run_doctor(&conn, command),
        Command::Department(command) => run_department(&conn, command),
    }
}

fn start_logging(level: Option<&str>, log_dir: &Path) -> Result<()> {
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| anyhow!("log directory `{}` is not valid UTF-8", log_dir.display()))?;
    init_logging(level.unwrap_or_else(|| default_log_level()), log_dir).map_err(|err| anyhow!(err))
}

fn doctor_service(
    conn: &Connection,
) -> Result<DoctorService<SqliteDoctorRepository<'_>, SqliteDepartmentRepository<'_>>> {
    Ok(DoctorService::new(
        SqliteDoctorRepository::try_new(conn)?,
        SqliteDepartmentRepository::try_new(conn)?,
    ))
}

fn run_doctor(conn: &Connection, command: DoctorCommand) -> Result<()> {
    let service = doctor_service(conn)?;

    match command {
        DoctorCommand::Add(args) => {
            let created = service.create_doctor(args.into())?;
            println!(
                "Doctor details saved successfully. Your Doctor ID is: {}",
                created.id
            );
        }
        DoctorCommand::Update(args) => {
            let current = service.search_doctor(&args.id)?;
            let id = args.id.clone();
            let update = args.apply_to(DoctorUpdate::from_record(&current));
            let updated = service.update_doctor(&id, update)?;
            println!("{}\n", render::render_record(&updated));
            println!("Doctor details updated successfully.");
        }
        DoctorCommand::Delete { id, yes } => {
            let current = service.search_doctor(&id)?;
            println!("{}\n", render::render_record(&current));
            let confirmed = yes || confirm_on_stdin(&id)?;
            match service.delete_doctor(&id, DeleteConfirmation::from(confirmed)) {
                Ok(_) => println!("Doctor details deleted successfully."),
                Err(DoctorServiceError::DeletionNotConfirmed(_)) => {
                    println!("Deletion not confirmed; record kept.");
                }
                Err(err) => return Err(err.into()),
            }
        }
        DoctorCommand::Search { id, json } => {
            let record = service.search_doctor(&id)?;
            print_records(std::slice::from_ref(&record), json, true)?;
        }
        DoctorCommand::List { json } => {
            let records = service.list_doctors()?;
            print_records(&records, json, false)?;
        }
    }

    Ok(())
}

fn run_department(conn: &Connection, command: DepartmentCommand) -> Result<()> {
    let service = DepartmentService::new(SqliteDepartmentRepository::try_new(conn)?);

    match command {
        DepartmentCommand::Add { id, name } => {
            let department = service.create_department(&id, &name)?;
            println!(
                "Department `{}` ({}) saved successfully.",
                department.id, department.name
            );
        }
        DepartmentCommand::List => {
            println!(
                "{}",
                render::render_departments(&service.list_departments()?)
            );
        }
    }

    Ok(())
}

fn print_records(records: &[DoctorRecord], json: bool, single: bool) -> Result<()> {
    if json {
        let text = match records {
            [record] if single => serde_json::to_string_pretty(record)?,
            _ => serde_json::to_string_pretty(records)?,
        };
        println!("{text}");
    } else if let ([record], true) = (records, single) {
        println!("{}", render::render_record(record));
    } else {
        println!("{}", render::render_table(records));
    }
    Ok(())
}

fn confirm_on_stdin(id: &str) -> Result<bool> {
    print!("Type `yes` to confirm deletion of {id}: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
