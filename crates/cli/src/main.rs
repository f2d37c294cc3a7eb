use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use api_shared::{HealthService, DEFAULT_PAGE_LIMIT};
use clap::{Parser, Subcommand};
use neurocase_core::{
    config::{busy_timeout_from_env_value, database_path_from_env_value},
    db, CoreConfig, NonEmptyText, PatientCreate, PatientService, RecordId, ReportService,
    VitalsService,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "neurocase")]
#[command(about = "neurocase stroke-intake record CLI")]
struct Cli {
    /// SQLite database file (overrides NEUROCASE_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the CLI is wired up
    Health,
    /// Create or upgrade the database schema
    Migrate,
    /// List patients, one page at a time
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Show one patient
    Show {
        /// Patient id
        id: String,
    },
    /// Register a patient
    CreatePatient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sex: String,
        #[arg(long)]
        age: Option<i32>,
        #[arg(long)]
        chief_complaint: Option<String>,
        #[arg(long)]
        medical_history: Option<String>,
        /// NIH Stroke Scale total
        #[arg(long)]
        nihss: Option<i32>,
    },
    /// List a patient's vitals readings
    Vitals {
        /// Patient id
        id: String,
    },
    /// Print the report projection for a patient
    Report {
        /// Patient id
        id: String,
    },
    /// Delete a patient and everything recorded against them
    DeletePatient {
        /// Patient id
        id: String,
    },
}

/// Resolve the store configuration from `--db` or the environment.
fn config(db_override: Option<PathBuf>) -> anyhow::Result<CoreConfig> {
    let database_path = db_override.unwrap_or_else(|| {
        database_path_from_env_value(std::env::var("NEUROCASE_DB_PATH").ok())
    });
    let busy_timeout =
        busy_timeout_from_env_value(std::env::var("NEUROCASE_BUSY_TIMEOUT_MS").ok())?;
    Ok(CoreConfig::new(database_path, busy_timeout)?)
}

/// Bring the database up to date.
///
/// # Returns
/// The schema version recorded in the database after migrating.
fn migrate(cfg: &CoreConfig) -> anyhow::Result<i64> {
    db::migrate(cfg).with_context(|| {
        format!(
            "failed to migrate database {}",
            cfg.database_path().display()
        )
    })
}

/// Configuration for a command that reads or writes records.
fn open_store(db_override: Option<PathBuf>) -> anyhow::Result<Arc<CoreConfig>> {
    let cfg = config(db_override)?;
    migrate(&cfg)?;
    Ok(Arc::new(cfg))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Health) => {
            println!("{}", HealthService::check_health().message);
        }
        Some(Commands::Migrate) => {
            let cfg = config(cli.db)?;
            let version = migrate(&cfg)?;
            println!(
                "Database {} is at schema version {}",
                cfg.database_path().display(),
                version
            );
        }
        Some(Commands::List { skip, limit }) => {
            let page = PatientService::new(open_store(cli.db)?).list_patients(skip, limit)?;
            if page.patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in &page.patients {
                    println!(
                        "ID: {}, Name: {}, Sex: {}, Age: {}",
                        patient.id,
                        patient.fields.name,
                        patient.fields.sex,
                        patient
                            .fields
                            .age
                            .map_or_else(|| "-".to_string(), |a| a.to_string())
                    );
                }
                println!("Showing {} of {}", page.patients.len(), page.count);
            }
        }
        Some(Commands::Show { id }) => {
            let id = RecordId::parse(&id)?;
            print_json(&PatientService::new(open_store(cli.db)?).get_patient(id)?)?;
        }
        Some(Commands::CreatePatient {
            name,
            sex,
            age,
            chief_complaint,
            medical_history,
            nihss,
        }) => {
            let payload = PatientCreate {
                name: NonEmptyText::new(name).context("name")?,
                age,
                sex: NonEmptyText::new(sex).context("sex")?,
                chief_complaint,
                medical_history,
                nihss_score: nihss,
            };
            let created = PatientService::new(open_store(cli.db)?).create_patient(payload)?;
            println!("Created patient with ID: {}", created.id);
        }
        Some(Commands::Vitals { id }) => {
            let id = RecordId::parse(&id)?;
            print_json(&VitalsService::new(open_store(cli.db)?).get_vitals_by_patient(id)?)?;
        }
        Some(Commands::Report { id }) => {
            let id = RecordId::parse(&id)?;
            print_json(&ReportService::new(open_store(cli.db)?).report_for_patient(id)?)?;
        }
        Some(Commands::DeletePatient { id }) => {
            let id = RecordId::parse(&id)?;
            let summary = PatientService::new(open_store(cli.db)?).delete_patient(id)?;
            println!(
                "Deleted patient {} ({} vitals, {} lab results, {} consultations)",
                id, summary.vitals, summary.lab_results, summary.consultations
            );
        }
        None => {
            println!("Use 'neurocase --help' for commands");
        }
    }

    Ok(())
}
